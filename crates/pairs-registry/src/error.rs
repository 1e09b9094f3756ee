//! 레지스트리 에러 타입.

use ethers::providers::{ProviderError, RpcError as _};
use thiserror::Error;

/// 레지스트리 호출 관련 에러.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 노드가 반환한 JSON-RPC 에러
    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    /// 응답 파싱/ABI 디코딩 에러
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// 알 수 없는 (계열, 체인, 버전) 조합 또는 잘못된 접속 설정
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RegistryError {
    /// 설정 에러인지 확인 (실행 전 치명적).
    pub fn is_config_error(&self) -> bool {
        matches!(self, RegistryError::Config(_))
    }
}

impl From<ProviderError> for RegistryError {
    fn from(err: ProviderError) -> Self {
        match err.as_error_response() {
            Some(rpc) => RegistryError::RpcError {
                code: rpc.code,
                message: rpc.message.clone(),
            },
            None => RegistryError::NetworkError(err.to_string()),
        }
    }
}
