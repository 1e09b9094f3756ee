//! DEX 팩토리 페어 수집기.
//!
//! 팩토리 컨트랙트의 `allPairs` 레지스트리를 인덱스 순서로 훑어 페어 목록을
//! JSON 데이터셋으로 저장합니다:
//! - 이전 데이터셋의 레코드 수부터 이어서 수집 (재개)
//! - 인덱스 구간을 작업으로 나눠 워커 여러 개가 동시에 조회
//! - 토큰 심볼 정규화 (`UNK` 대체, 13자 제한)

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
