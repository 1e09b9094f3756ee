//! 작업 큐를 소비하는 워커.
//!
//! 각 워커는 작업 하나를 꺼내 구간의 모든 인덱스를 순서대로 조회하고,
//! 작업마다 정확히 하나의 `JobResult`를 결과 큐로 보냅니다.

use pairs_core::PairRecord;
use pairs_registry::{PairRegistry, RegistryError};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use super::normalize;
use super::partition::PairJob;
use crate::stats::FetchProgress;

/// 작업 하나의 처리 결과.
#[derive(Debug)]
pub struct JobResult {
    /// 결과를 만든 작업
    pub job: PairJob,
    /// 조회에 성공한 레코드 (인덱스 오름차순)
    pub records: Vec<PairRecord>,
    /// 조회에 실패해 건너뛴 인덱스 수
    pub skipped: u64,
    /// 작업 전체 실패 시 마지막 조회 에러. 일부 실패에는 설정되지 않음.
    pub error: Option<RegistryError>,
}

impl JobResult {
    /// 작업 전체가 실패했는지 여부
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// 작업 하나를 처리합니다.
///
/// 인덱스 조회 실패는 로그 후 건너뛰고 나머지 인덱스를 계속 조회합니다.
pub async fn process_job(
    registry: &dyn PairRegistry,
    job: PairJob,
    progress: &FetchProgress,
) -> JobResult {
    debug!(start = job.start, end = job.end, "작업 시작");

    let mut records = Vec::with_capacity(job.len() as usize);
    let mut skipped = 0u64;
    let mut last_error = None;

    for index in job.start..job.end {
        let fetched = registry.fetch_by_index(index).await;
        let attempts = progress.record_attempt();

        match fetched {
            Ok(raw) => {
                records.push(normalize::to_record(registry, raw).await);
                debug!(index, total_fetched = attempts, "페어 조회 완료");
            }
            Err(e) => {
                warn!(index, error = %e, "페어 조회 실패, 건너뜀");
                skipped += 1;
                last_error = Some(e);
            }
        }
    }

    let error = if skipped > 0 && skipped == job.len() {
        last_error
    } else {
        None
    };

    JobResult {
        job,
        records,
        skipped,
        error,
    }
}

/// 워커 루프.
///
/// 작업 큐가 닫히고 비면 종료합니다.
pub async fn run_worker(
    worker_id: usize,
    registry: Arc<dyn PairRegistry>,
    jobs: Arc<Mutex<mpsc::Receiver<PairJob>>>,
    results: mpsc::Sender<JobResult>,
    progress: Arc<FetchProgress>,
) {
    let mut processed = 0usize;

    loop {
        let job = {
            let mut rx = jobs.lock().await;
            rx.recv().await
        };

        let Some(job) = job else {
            break;
        };

        let result = process_job(registry.as_ref(), job, &progress).await;
        processed += 1;

        if results.send(result).await.is_err() {
            warn!(worker_id, "결과 큐가 닫힘, 워커 종료");
            break;
        }
    }

    info!(
        worker_id,
        jobs = processed,
        total_fetched = progress.attempts(),
        "워커 종료"
    );
}
