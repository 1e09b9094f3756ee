//! 페어 수집 워크플로우.
//!
//! 1. 레지스트리 연결 (설정 에러는 여기서 바로 실패)
//! 2. 이전 데이터셋 로드
//! 3. 레지스트리 전체 페어 수 조회
//! 4. 파이프라인 실행
//! 5. 데이터셋 저장 (새 레코드가 없어도 저장)

use chrono::Utc;
use pairs_registry::{connect_registry, PairRegistry};
use std::sync::Arc;
use tracing::{info, warn};

use super::checkpoint::{load_dataset, save_dataset};
use super::pipeline::run_pipeline;
use crate::stats::CollectionStats;
use crate::{CollectorConfig, Result};

/// 설정된 레지스트리에서 새 페어를 수집합니다.
pub async fn collect_pairs(config: &CollectorConfig) -> Result<CollectionStats> {
    let settings = &config.registry;
    let registry = connect_registry(
        settings.dex,
        settings.chain_id,
        settings.version,
        settings.rpc_config(),
    )?;

    collect_with_registry(registry, config).await
}

/// 주어진 레지스트리로 수집 워크플로우를 실행합니다.
pub async fn collect_with_registry(
    registry: Arc<dyn PairRegistry>,
    config: &CollectorConfig,
) -> Result<CollectionStats> {
    let mut dataset = load_dataset(&config.input_file).await?;
    let resume_offset = dataset.resume_offset();

    let total = registry.total_count().await?;
    info!(
        exchange = registry.name(),
        chain_id = registry.chain_id(),
        total,
        existing = resume_offset,
        "레지스트리 페어 수 조회"
    );
    if total < resume_offset {
        warn!(
            total,
            existing = resume_offset,
            "데이터셋이 레지스트리보다 많은 레코드를 가지고 있음"
        );
    }

    let stats = run_pipeline(registry, &mut dataset, total, &config.pipeline).await?;

    if stats.success > 0 {
        dataset.mark_revised(Utc::now());
    }
    save_dataset(&config.output_file, &dataset).await?;

    info!(
        path = %config.output_file.display(),
        records = dataset.len(),
        version = %dataset.version,
        "데이터셋 저장 완료"
    );
    if stats.errors > 0 {
        // 건너뛴 인덱스만큼 레코드 수가 레지스트리 인덱스보다 작아짐
        warn!(
            skipped = stats.errors,
            "일부 인덱스를 건너뜀, 다음 재개 위치가 레지스트리 인덱스와 어긋남"
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PipelineConfig, RegistrySettings};
    use crate::error::CollectorError;
    use pairs_registry::DexFamily;
    use std::path::Path;

    fn config(dir: &Path, dex: DexFamily, chain_id: u64, version: u32) -> CollectorConfig {
        CollectorConfig {
            input_file: dir.join("pairs.json"),
            output_file: dir.join("pairs.json"),
            registry: RegistrySettings {
                dex,
                chain_id,
                version,
                node_url: "http://127.0.0.1:1".to_string(),
                rpc_timeout_secs: 1,
            },
            pipeline: PipelineConfig {
                concurrency: 2,
                chunk_size: 2,
                ordered: true,
            },
        }
    }

    #[tokio::test]
    async fn test_unknown_factory_fails_before_touching_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), DexFamily::PancakeSwap, 1, 2);

        let err = collect_pairs(&config).await.unwrap_err();

        assert!(matches!(err, CollectorError::Registry(_)));
        assert!(err.is_config_error());
        assert!(!config.output_file.exists());
    }

    #[tokio::test]
    async fn test_unreachable_node_propagates_registry_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), DexFamily::Uniswap, 1, 2);

        let err = collect_pairs(&config).await.unwrap_err();

        assert!(matches!(err, CollectorError::Registry(_)));
        assert!(!err.is_config_error());
        assert!(!config.output_file.exists());
    }
}
