//! 레지스트리 인덱스 범위 분할.
//!
//! `[resume_offset, total)`을 길이 `chunk_size` 이하의 연속된
//! 반열림 구간들로 나눕니다. 마지막 구간만 짧을 수 있습니다.

use crate::error::CollectorError;
use crate::Result;

/// 워커 하나가 처리하는 인덱스 구간 `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairJob {
    pub start: u64,
    pub end: u64,
    /// 대상 레지스트리 이름
    pub exchange: String,
}

impl PairJob {
    /// 구간 길이
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// 작업 목록을 순서대로 생성하는 이터레이터.
#[derive(Debug, Clone)]
pub struct JobPartitioner {
    next: u64,
    total: u64,
    chunk_size: u64,
    exchange: String,
}

impl JobPartitioner {
    /// 분할기 생성. `chunk_size`가 0이면 설정 에러입니다.
    ///
    /// `total < chunk_size`이면 청크 크기를 `total`로 줄입니다.
    pub fn new(
        resume_offset: u64,
        total: u64,
        chunk_size: u64,
        exchange: impl Into<String>,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(CollectorError::Config(
                "chunk size must be greater than zero".to_string(),
            ));
        }

        let chunk_size = if total > 0 && total < chunk_size {
            total
        } else {
            chunk_size
        };

        Ok(Self {
            next: resume_offset,
            total,
            chunk_size,
            exchange: exchange.into(),
        })
    }

    /// 실제 적용되는 청크 크기
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }
}

impl Iterator for JobPartitioner {
    type Item = PairJob;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }

        let start = self.next;
        let end = start.saturating_add(self.chunk_size).min(self.total);
        self.next = end;

        Some(PairJob {
            start,
            end,
            exchange: self.exchange.clone(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = job_count(self.next, self.total, self.chunk_size) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for JobPartitioner {}

/// `ceil((total - resume_offset) / chunk_size)`, `total <= resume_offset`면 0
pub fn job_count(resume_offset: u64, total: u64, chunk_size: u64) -> u64 {
    if total <= resume_offset || chunk_size == 0 {
        return 0;
    }
    (total - resume_offset).div_ceil(chunk_size)
}
