//! # Pairs Core
//!
//! DEX 페어 수집 파이프라인의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 이더리움 주소 (`ethers` 주소 타입, 소문자 16진수 직렬화)
//! - 페어 레코드 및 데이터셋 문서
//! - 공통 에러 타입
//! - 로깅 인프라

pub mod error;
pub mod logging;
pub mod types;

pub use error::*;
pub use logging::*;
pub use types::*;
