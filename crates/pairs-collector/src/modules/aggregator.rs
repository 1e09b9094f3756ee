//! 작업 결과 취합.
//!
//! 순서 보장 모드에서는 작업 시작 인덱스 순서대로만 데이터셋에 붙입니다.
//! 먼저 끝난 뒤쪽 작업은 앞쪽 작업이 도착할 때까지 버퍼에 둡니다.
//! 그래서 데이터셋 레코드는 레지스트리 인덱스 오름차순을 유지합니다.

use pairs_core::PairDataset;
use std::collections::BTreeMap;
use tracing::{debug, error};

use super::worker::JobResult;
use crate::stats::CollectionStats;

/// 결과 취합기.
#[derive(Debug)]
pub struct ResultAggregator {
    ordered: bool,
    /// 다음으로 붙일 작업의 시작 인덱스 (순서 보장 모드)
    next_start: u64,
    pending: BTreeMap<u64, JobResult>,
    stats: CollectionStats,
}

impl ResultAggregator {
    /// `first_start`는 첫 작업의 시작 인덱스 (재개 오프셋).
    pub fn new(first_start: u64, ordered: bool) -> Self {
        Self {
            ordered,
            next_start: first_start,
            pending: BTreeMap::new(),
            stats: CollectionStats::new(),
        }
    }

    /// 결과 하나를 받아 붙일 수 있는 만큼 데이터셋에 붙입니다.
    pub fn accept(&mut self, result: JobResult, dataset: &mut PairDataset) {
        if !self.ordered {
            self.apply(result, dataset);
            return;
        }

        self.pending.insert(result.job.start, result);
        while let Some(ready) = self.pending.remove(&self.next_start) {
            self.next_start = ready.job.end;
            self.apply(ready, dataset);
        }

        if !self.pending.is_empty() {
            debug!(
                waiting_for = self.next_start,
                buffered = self.pending.len(),
                "앞선 작업 대기 중"
            );
        }
    }

    /// 아직 붙이지 못한 작업 수
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// 취합 종료 후 통계 반환
    pub fn finish(self) -> CollectionStats {
        self.stats
    }

    fn apply(&mut self, result: JobResult, dataset: &mut PairDataset) {
        let JobResult {
            job,
            records,
            skipped,
            error,
        } = result;

        if let Some(e) = error {
            error!(
                start = job.start,
                end = job.end,
                exchange = %job.exchange,
                error = %e,
                "작업 전체 실패"
            );
            self.stats.failed_jobs += 1;
        }

        let added = records.len() as u64;
        self.stats.total += added + skipped;
        self.stats.success += added;
        self.stats.errors += skipped;
        self.stats.jobs += 1;

        dataset.append(records);
        debug!(
            start = job.start,
            end = job.end,
            added,
            dataset_len = dataset.len(),
            "작업 결과 반영"
        );
    }
}
