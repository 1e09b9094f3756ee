//! 페어 수집 모듈.

pub mod aggregator;
pub mod checkpoint;
pub mod collect;
pub mod normalize;
pub mod partition;
pub mod pipeline;
pub mod worker;

pub use aggregator::ResultAggregator;
pub use checkpoint::{load_dataset, save_dataset};
pub use collect::{collect_pairs, collect_with_registry};
pub use partition::{job_count, JobPartitioner, PairJob};
pub use pipeline::run_pipeline;
pub use worker::{process_job, run_worker, JobResult};
