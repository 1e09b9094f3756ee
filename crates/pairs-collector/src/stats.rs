//! 수집 통계 및 진행 카운터.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// 수집 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 총 조회 시도 횟수 (성공 + 실패)
    pub total: u64,
    /// 데이터셋에 추가된 레코드 수
    pub success: u64,
    /// 건너뛴 인덱스 수 (조회 실패)
    pub errors: u64,
    /// 처리한 작업 수
    pub jobs: usize,
    /// 작업 전체가 실패한 작업 수
    pub failed_jobs: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            success = self.success,
            errors = self.errors,
            jobs = self.jobs,
            failed_jobs = self.failed_jobs,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}

/// 워커 간 공유되는 조회 시도 카운터.
///
/// 관측용이며 제어 흐름에는 영향을 주지 않습니다.
#[derive(Debug, Default)]
pub struct FetchProgress {
    attempts: AtomicU64,
}

impl FetchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시도 1회 기록 후 누적 시도 수 반환
    pub fn record_attempt(&self) -> u64 {
        self.attempts.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 현재까지의 누적 시도 수
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
}
