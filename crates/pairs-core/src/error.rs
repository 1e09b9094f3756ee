//! 페어 수집 시스템의 공통 에러 타입.

use thiserror::Error;

/// 도메인 타입 생성/변환 에러.
#[derive(Debug, Error)]
pub enum PairsError {
    /// 잘못된 주소 형식
    #[error("잘못된 주소: {0}")]
    InvalidAddress(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type PairsResult<T> = Result<T, PairsError>;

impl From<hex::FromHexError> for PairsError {
    fn from(err: hex::FromHexError) -> Self {
        PairsError::InvalidAddress(err.to_string())
    }
}
