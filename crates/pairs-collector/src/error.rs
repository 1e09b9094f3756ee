//! 에러 타입 정의.

use pairs_registry::RegistryError;
use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 에러 (작업 시작 전 치명적)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 레지스트리 에러
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// 체크포인트 파일 입출력 에러
    #[error("Checkpoint I/O error ({path}): {source}")]
    CheckpointIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 체크포인트 파일 파싱/직렬화 에러
    #[error("Checkpoint format error ({path}): {source}")]
    CheckpointFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// 파이프라인 내부 에러 (워커 비정상 종료 등)
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl CollectorError {
    /// 레지스트리 설정 에러도 설정 에러로 취급합니다.
    pub fn is_config_error(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Registry(e) => e.is_config_error(),
            _ => false,
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
