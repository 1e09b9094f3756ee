//! 인메모리 레지스트리를 사용한 수집 워크플로우 통합 테스트.

use async_trait::async_trait;
use pairs_collector::config::{PipelineConfig, RegistrySettings};
use pairs_collector::modules::{collect_with_registry, load_dataset};
use pairs_collector::{CollectorConfig, CollectorError};
use pairs_core::{Address, PairDataset};
use pairs_registry::{
    DexFamily, PairRegistry, RawPair, RegistryError, RegistryResult, SimulatedRegistry,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn collector_config(dir: &Path, concurrency: usize, chunk_size: u64) -> CollectorConfig {
    CollectorConfig {
        input_file: dir.join("dex_pairs.json"),
        output_file: dir.join("dex_pairs.json"),
        registry: RegistrySettings {
            dex: DexFamily::Uniswap,
            chain_id: 1,
            version: 2,
            node_url: "http://127.0.0.1:8545".to_string(),
            rpc_timeout_secs: 30,
        },
        pipeline: PipelineConfig {
            concurrency,
            chunk_size,
            ordered: true,
        },
    }
}

fn pair_addresses(dataset: &PairDataset) -> Vec<Address> {
    dataset.tokens.iter().map(|r| r.address).collect()
}

fn generated_address(index: u64) -> Address {
    SimulatedRegistry::address_for(1_000_000 + index)
}

/// 페어 수 조회부터 항상 실패하는 레지스트리.
struct UnreachableRegistry;

#[async_trait]
impl PairRegistry for UnreachableRegistry {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn chain_id(&self) -> u64 {
        1
    }

    async fn total_count(&self) -> RegistryResult<u64> {
        Err(RegistryError::NetworkError("connection refused".to_string()))
    }

    async fn fetch_by_index(&self, _index: u64) -> RegistryResult<RawPair> {
        Err(RegistryError::NetworkError("connection refused".to_string()))
    }

    async fn fetch_token_symbol(&self, _token: Address) -> RegistryResult<String> {
        Err(RegistryError::NetworkError("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_fresh_run_collects_every_pair() {
    let dir = tempfile::tempdir().unwrap();
    let config = collector_config(dir.path(), 2, 2);
    let registry = Arc::new(SimulatedRegistry::new(1).with_generated_pairs(5));

    let stats = collect_with_registry(registry.clone(), &config).await.unwrap();

    assert_eq!(stats.jobs, 3);
    assert_eq!(stats.success, 5);
    assert_eq!(stats.errors, 0);

    let saved = load_dataset(&config.output_file).await.unwrap();
    assert_eq!(saved.len(), 5);
    assert_eq!(saved.version.to_string(), "1.1.0");
    assert_eq!(
        pair_addresses(&saved),
        (0..5).map(generated_address).collect::<Vec<_>>()
    );
    assert_eq!(saved.tokens[4].name, "Uniswap V2 - TK9/TK10");

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config.output_file).unwrap()).unwrap();
    assert_eq!(raw["tokens"][0]["chainId"], 1);
    assert_eq!(raw["tokens"][0]["decimals"], 18);
}

#[tokio::test]
async fn test_resume_starts_at_existing_record_count() {
    let dir = tempfile::tempdir().unwrap();
    let config = collector_config(dir.path(), 3, 2);

    let first = Arc::new(SimulatedRegistry::new(1).with_generated_pairs(3));
    collect_with_registry(first, &config).await.unwrap();

    let second = Arc::new(SimulatedRegistry::new(1).with_generated_pairs(8));
    let stats = collect_with_registry(second.clone(), &config).await.unwrap();

    let fetched = second.fetched_indices();
    assert_eq!(fetched.iter().min(), Some(&3));
    assert_eq!(
        fetched.iter().copied().collect::<HashSet<_>>(),
        (3..8).collect::<HashSet<_>>()
    );
    assert_eq!(stats.success, 5);

    let saved = load_dataset(&config.output_file).await.unwrap();
    assert_eq!(saved.len(), 8);
    assert_eq!(saved.version.to_string(), "1.2.0");
    assert_eq!(
        pair_addresses(&saved),
        (0..8).map(generated_address).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_exhausted_registry_rewrites_dataset_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = collector_config(dir.path(), 2, 2);
    let registry = Arc::new(SimulatedRegistry::new(1).with_generated_pairs(4));
    collect_with_registry(registry, &config).await.unwrap();
    let before = load_dataset(&config.input_file).await.unwrap();

    // 레지스트리가 데이터셋보다 작아도 아무것도 조회하지 않음
    config.output_file = dir.path().join("copy.json");
    let smaller = Arc::new(SimulatedRegistry::new(1).with_generated_pairs(2));
    let stats = collect_with_registry(smaller.clone(), &config).await.unwrap();

    assert_eq!(stats.jobs, 0);
    assert!(smaller.fetched_indices().is_empty());

    let after = load_dataset(&config.output_file).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test(start_paused = true)]
async fn test_ordered_and_unordered_runs_agree_on_contents() {
    let build = || {
        Arc::new(
            SimulatedRegistry::new(1)
                .with_generated_pairs(12)
                .with_latency(|index| Duration::from_millis(240 - index * 20)),
        )
    };

    let ordered_dir = tempfile::tempdir().unwrap();
    let ordered_config = collector_config(ordered_dir.path(), 4, 3);
    collect_with_registry(build(), &ordered_config).await.unwrap();
    let ordered = load_dataset(&ordered_config.output_file).await.unwrap();

    let unordered_dir = tempfile::tempdir().unwrap();
    let mut unordered_config = collector_config(unordered_dir.path(), 4, 3);
    unordered_config.pipeline.ordered = false;
    collect_with_registry(build(), &unordered_config)
        .await
        .unwrap();
    let unordered = load_dataset(&unordered_config.output_file).await.unwrap();

    let expected: Vec<_> = (0..12).map(generated_address).collect();
    assert_eq!(pair_addresses(&ordered), expected);
    assert_eq!(
        pair_addresses(&unordered).into_iter().collect::<HashSet<_>>(),
        expected.into_iter().collect::<HashSet<_>>()
    );
}

#[tokio::test]
async fn test_failed_indices_are_skipped_and_counted() {
    let dir = tempfile::tempdir().unwrap();
    let config = collector_config(dir.path(), 2, 2);
    let registry = Arc::new(
        SimulatedRegistry::new(1)
            .with_generated_pairs(6)
            .fail_index(2)
            .fail_index(3)
            .fail_index(5),
    );

    let stats = collect_with_registry(registry, &config).await.unwrap();

    // [2,4)는 작업 전체 실패, [4,6)은 일부 실패
    assert_eq!(stats.failed_jobs, 1);
    assert_eq!(stats.errors, 3);
    assert_eq!(stats.success, 3);
    assert_eq!(stats.total, 6);

    let saved = load_dataset(&config.output_file).await.unwrap();
    assert_eq!(
        pair_addresses(&saved),
        vec![generated_address(0), generated_address(1), generated_address(4)]
    );
}

#[tokio::test]
async fn test_zero_address_token_named_unk() {
    let dir = tempfile::tempdir().unwrap();
    let config = collector_config(dir.path(), 1, 300);
    let weth = SimulatedRegistry::address_for(42);
    let registry = Arc::new(
        SimulatedRegistry::new(1)
            .with_pair(RawPair {
                index: 0,
                address: SimulatedRegistry::address_for(900),
                token0: weth,
                token1: Address::zero(),
                name: "Uniswap V2".to_string(),
                symbol: "UNI-V2".to_string(),
                decimals: 18,
            })
            .with_symbol(weth, "WETH"),
    );

    collect_with_registry(registry, &config).await.unwrap();

    let saved = load_dataset(&config.output_file).await.unwrap();
    assert_eq!(saved.tokens[0].name, "Uniswap V2 - WETH/UNK");
    assert_eq!(saved.tokens[0].token1, Address::zero());
}

#[tokio::test]
async fn test_null_lists_in_existing_file_resume_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = collector_config(dir.path(), 2, 2);
    std::fs::write(
        &config.input_file,
        r#"{
            "name": "Legacy Pairs",
            "timestamp": "2021-05-01T00:00:00Z",
            "version": {"major": 1, "minor": 0, "patch": 0},
            "keywords": null,
            "tokens": null
        }"#,
    )
    .unwrap();
    let registry = Arc::new(SimulatedRegistry::new(1).with_generated_pairs(2));

    collect_with_registry(registry.clone(), &config).await.unwrap();

    assert_eq!(registry.fetched_indices().iter().min(), Some(&0));
    let saved = load_dataset(&config.output_file).await.unwrap();
    assert_eq!(saved.name, "Legacy Pairs");
    assert_eq!(saved.len(), 2);
    assert!(saved.keywords.is_empty());
}

#[tokio::test]
async fn test_corrupt_checkpoint_aborts_before_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let config = collector_config(dir.path(), 2, 2);
    std::fs::write(&config.input_file, "[1, 2").unwrap();
    let registry = Arc::new(SimulatedRegistry::new(1).with_generated_pairs(2));

    let err = collect_with_registry(registry.clone(), &config)
        .await
        .unwrap_err();

    assert!(matches!(err, CollectorError::CheckpointFormat { .. }));
    assert!(registry.fetched_indices().is_empty());
}

#[tokio::test]
async fn test_count_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = collector_config(dir.path(), 2, 2);

    let err = collect_with_registry(Arc::new(UnreachableRegistry), &config)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CollectorError::Registry(RegistryError::NetworkError(_))
    ));
    assert!(!config.output_file.exists());
}
