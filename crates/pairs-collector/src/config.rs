//! 환경변수 기반 설정 모듈.
//!
//! `.env` 파일과 환경변수에서 기본값을 읽고, CLI 플래그가 있으면 덮어씁니다.

use pairs_registry::{DexFamily, RpcConfig};
use std::path::PathBuf;
use tracing::warn;

use crate::error::CollectorError;
use crate::Result;

/// 입력/출력 파일 기본 경로
pub const DEFAULT_DATASET_FILE: &str = "dex_pairs.json";

/// 작업(Job) 하나가 담당하는 인덱스 수 기본값
pub const DEFAULT_CHUNK_SIZE: u64 = 300;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 이전 실행 결과(체크포인트) 경로
    pub input_file: PathBuf,
    /// 결과 저장 경로
    pub output_file: PathBuf,
    /// 레지스트리 접속 설정
    pub registry: RegistrySettings,
    /// 파이프라인 설정
    pub pipeline: PipelineConfig,
}

/// 레지스트리 접속 설정
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    /// 레지스트리 계열
    pub dex: DexFamily,
    /// 체인 ID
    pub chain_id: u64,
    /// 팩토리 버전
    pub version: u32,
    /// JSON-RPC 노드 URL
    pub node_url: String,
    /// RPC 요청 타임아웃 (초)
    pub rpc_timeout_secs: u64,
}

/// 파이프라인 설정
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 동시 워커 수 (실제 워커 수는 작업 수를 넘지 않음)
    pub concurrency: usize,
    /// 작업당 인덱스 수
    pub chunk_size: u64,
    /// true면 작업 시작 인덱스 순서로 결과를 합침, false면 완료 순서
    pub ordered: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            ordered: true,
        }
    }
}

impl PipelineConfig {
    /// 설정 값 검증
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(CollectorError::Config(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(CollectorError::Config(
                "worker concurrency must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl RegistrySettings {
    /// RPC 클라이언트 설정으로 변환
    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig::new(self.node_url.clone()).with_timeout_secs(self.rpc_timeout_secs)
    }
}

/// CLI에서 넘어온 설정 덮어쓰기 값
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub cores: Option<usize>,
    pub dex_exchange: Option<String>,
    pub chain_id: Option<u64>,
    pub dex_version: Option<u32>,
    pub chunk_size: Option<u64>,
    pub unordered: bool,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let node_url = std::env::var("NODE_URL").map_err(|_| {
            CollectorError::Config("NODE_URL 환경변수가 설정되지 않았습니다".to_string())
        })?;

        let dex = parse_dex(
            &std::env::var("PAIRS_DEX_EXCHANGE").unwrap_or_else(|_| "uniswap".to_string()),
        )?;

        Ok(Self {
            input_file: env_var_parse("PAIRS_INPUT_FILE", PathBuf::from(DEFAULT_DATASET_FILE)),
            output_file: env_var_parse("PAIRS_OUTPUT_FILE", PathBuf::from(DEFAULT_DATASET_FILE)),
            registry: RegistrySettings {
                dex,
                chain_id: env_var_parse("PAIRS_CHAIN_ID", 1),
                version: env_var_parse("PAIRS_DEX_VERSION", 2),
                node_url,
                rpc_timeout_secs: env_var_parse("RPC_TIMEOUT_SECS", 30),
            },
            pipeline: PipelineConfig {
                concurrency: env_var_parse("PAIRS_CORES", default_concurrency()),
                chunk_size: env_var_parse("PAIRS_CHUNK_SIZE", DEFAULT_CHUNK_SIZE),
                ordered: true,
            },
        })
    }

    /// CLI 값 적용 후 검증
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(path) = overrides.input_file {
            self.input_file = path;
        }
        if let Some(path) = overrides.output_file {
            self.output_file = path;
        }
        if let Some(cores) = overrides.cores {
            self.pipeline.concurrency = cores;
        }
        if let Some(dex) = overrides.dex_exchange {
            self.registry.dex = parse_dex(&dex)?;
        }
        if let Some(chain_id) = overrides.chain_id {
            self.registry.chain_id = chain_id;
        }
        if let Some(version) = overrides.dex_version {
            self.registry.version = version;
        }
        if let Some(chunk_size) = overrides.chunk_size {
            self.pipeline.chunk_size = chunk_size;
        }
        if overrides.unordered {
            self.pipeline.ordered = false;
        }

        self.pipeline.validate()?;
        Ok(self)
    }
}

/// 기본 워커 수: 사용 가능한 병렬성의 절반 (최소 1)
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() / 2)
        .unwrap_or(1)
        .max(1)
}

fn parse_dex(value: &str) -> Result<DexFamily> {
    value
        .parse()
        .map_err(|e: pairs_registry::RegistryError| CollectorError::Config(e.to_string()))
}

/// 환경변수에서 값을 파싱 (없거나 해석 실패 시 기본값 사용)
fn env_var_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_env_value(key, std::env::var(key).ok(), default)
}

/// 설정된 값을 해석하지 못하면 경고를 남기고 기본값을 사용합니다.
fn parse_env_value<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            warn!(key, value = %raw, error = %e, "환경변수 값을 해석할 수 없음, 기본값 사용");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CollectorConfig {
        CollectorConfig {
            input_file: PathBuf::from(DEFAULT_DATASET_FILE),
            output_file: PathBuf::from(DEFAULT_DATASET_FILE),
            registry: RegistrySettings {
                dex: DexFamily::Uniswap,
                chain_id: 1,
                version: 2,
                node_url: "http://127.0.0.1:8545".to_string(),
                rpc_timeout_secs: 30,
            },
            pipeline: PipelineConfig::default(),
        }
    }

    #[test]
    fn test_default_concurrency_at_least_one() {
        assert!(default_concurrency() >= 1);
    }

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.chunk_size, 300);
        assert!(config.ordered);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = PipelineConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CollectorError::Config(_))));
    }

    #[test]
    fn test_overrides_applied() {
        let config = base_config()
            .with_overrides(ConfigOverrides {
                output_file: Some(PathBuf::from("out.json")),
                cores: Some(8),
                dex_exchange: Some("pancakeswap".to_string()),
                chain_id: Some(56),
                unordered: true,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(config.input_file, PathBuf::from(DEFAULT_DATASET_FILE));
        assert_eq!(config.output_file, PathBuf::from("out.json"));
        assert_eq!(config.pipeline.concurrency, 8);
        assert_eq!(config.registry.dex, DexFamily::PancakeSwap);
        assert_eq!(config.registry.chain_id, 56);
        assert!(!config.pipeline.ordered);
    }

    #[test]
    fn test_unknown_dex_is_config_error() {
        let err = base_config()
            .with_overrides(ConfigOverrides {
                dex_exchange: Some("sushiswap".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_zero_cores_rejected() {
        let err = base_config()
            .with_overrides(ConfigOverrides {
                cores: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_rpc_config_carries_timeout() {
        let mut config = base_config();
        config.registry.rpc_timeout_secs = 5;
        let rpc = config.registry.rpc_config();
        assert_eq!(rpc.timeout_secs, 5);
        assert_eq!(rpc.node_url, "http://127.0.0.1:8545");
    }

    #[test]
    fn test_env_value_parsed_when_valid() {
        assert_eq!(parse_env_value("PAIRS_DEX_VERSION", Some("3".to_string()), 2u32), 3);
        assert_eq!(parse_env_value("PAIRS_CORES", Some(" 8 ".to_string()), 1usize), 8);
        assert_eq!(parse_env_value("PAIRS_CHAIN_ID", None, 56u64), 56);
    }

    #[test]
    fn test_malformed_env_value_falls_back_to_default() {
        assert_eq!(parse_env_value("PAIRS_DEX_VERSION", Some("3x".to_string()), 2u32), 2);
        assert_eq!(parse_env_value("PAIRS_CORES", Some("abc".to_string()), 4usize), 4);
        assert_eq!(parse_env_value("PAIRS_CHUNK_SIZE", Some(String::new()), 300u64), 300);
    }
}
