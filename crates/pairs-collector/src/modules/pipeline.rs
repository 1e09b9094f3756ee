//! 동시 수집 파이프라인.
//!
//! 구성:
//! - 생산자 태스크: 분할된 작업을 작업 큐에 넣고 큐를 닫음
//! - 워커 `W = min(concurrency, 작업 수)`개: 공유 큐에서 작업을 꺼내 처리
//! - 호출 태스크: 작업 수만큼 결과를 받아 데이터셋에 반영
//!
//! 두 큐 모두 용량이 `W`인 bounded 채널이라 생산자가 워커보다 앞서
//! 나가지 않으며, 생산자를 별도 태스크로 두어 작업 수가 많아도
//! 결과 큐가 막히지 않습니다.

use futures::future::join_all;
use pairs_core::PairDataset;
use pairs_registry::PairRegistry;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use super::aggregator::ResultAggregator;
use super::partition::JobPartitioner;
use super::worker::{run_worker, JobResult};
use crate::config::PipelineConfig;
use crate::error::CollectorError;
use crate::stats::{CollectionStats, FetchProgress};
use crate::Result;

/// `[dataset.resume_offset(), total)` 구간을 수집해 데이터셋에 붙입니다.
///
/// 모든 작업의 결과를 받은 뒤에만 반환합니다. 개별 인덱스 실패는 통계에만
/// 반영되고, 결과 큐가 작업 수보다 먼저 닫히면 `Pipeline` 에러입니다.
pub async fn run_pipeline(
    registry: Arc<dyn PairRegistry>,
    dataset: &mut PairDataset,
    total: u64,
    config: &PipelineConfig,
) -> Result<CollectionStats> {
    config.validate()?;

    let started = Instant::now();
    let resume_offset = dataset.resume_offset();
    let partitioner =
        JobPartitioner::new(resume_offset, total, config.chunk_size, registry.name())?;
    let job_total = partitioner.len();

    if job_total == 0 {
        info!(resume_offset, total, "새로 수집할 페어 없음");
        let mut stats = CollectionStats::new();
        stats.elapsed = started.elapsed();
        return Ok(stats);
    }

    let worker_count = config.concurrency.min(job_total).max(1);
    info!(
        exchange = registry.name(),
        resume_offset,
        total,
        jobs = job_total,
        workers = worker_count,
        chunk_size = partitioner.chunk_size(),
        ordered = config.ordered,
        "파이프라인 시작"
    );

    let (job_tx, job_rx) = mpsc::channel(worker_count);
    let (result_tx, mut result_rx) = mpsc::channel::<JobResult>(worker_count);
    let job_rx = Arc::new(Mutex::new(job_rx));
    let progress = Arc::new(FetchProgress::new());

    let mut handles = Vec::with_capacity(worker_count + 1);
    for worker_id in 0..worker_count {
        handles.push(tokio::spawn(run_worker(
            worker_id,
            Arc::clone(&registry),
            Arc::clone(&job_rx),
            result_tx.clone(),
            Arc::clone(&progress),
        )));
    }
    drop(result_tx);

    handles.push(tokio::spawn(async move {
        for job in partitioner {
            if job_tx.send(job).await.is_err() {
                break;
            }
        }
        debug!("모든 작업 전달 완료");
    }));

    let mut aggregator = ResultAggregator::new(resume_offset, config.ordered);
    for received in 0..job_total {
        let Some(result) = result_rx.recv().await else {
            return Err(CollectorError::Pipeline(format!(
                "result queue closed after {} of {} jobs",
                received, job_total
            )));
        };
        aggregator.accept(result, dataset);
    }

    for joined in join_all(handles).await {
        joined.map_err(|e| CollectorError::Pipeline(format!("task failed: {}", e)))?;
    }

    if aggregator.pending() > 0 {
        return Err(CollectorError::Pipeline(format!(
            "{} job results could not be placed in order",
            aggregator.pending()
        )));
    }

    let mut stats = aggregator.finish();
    stats.elapsed = started.elapsed();
    debug!(
        attempts = progress.attempts(),
        total = stats.total,
        "조회 시도 집계"
    );

    Ok(stats)
}
