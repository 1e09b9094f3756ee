//! 레지스트리 trait 정의.

use async_trait::async_trait;
use pairs_core::Address;

use crate::RegistryError;

/// 레지스트리 작업을 위한 Result 타입.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// 레지스트리 인덱스 하나에서 읽은 원시 페어 데이터.
///
/// 심볼 정규화 전 상태이며, 워커가 `PairRecord`로 변환합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    /// 레지스트리 인덱스
    pub index: u64,
    /// 페어 컨트랙트 주소
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    /// 페어 컨트랙트의 `name()` (실패 시 빈 문자열)
    pub name: String,
    /// 페어 컨트랙트의 `symbol()` (실패 시 빈 문자열)
    pub symbol: String,
    /// 페어 컨트랙트의 `decimals()` (실패 시 0)
    pub decimals: u32,
}

/// 순차 인덱스 기반 페어 레지스트리.
///
/// 레지스트리 계열(Uniswap, PancakeSwap 등)별로 하나의 구현체가 있으며,
/// 모든 구현체는 동일한 의미를 가집니다.
#[async_trait]
pub trait PairRegistry: Send + Sync {
    /// 레지스트리 이름 반환.
    fn name(&self) -> &str;

    /// 레지스트리가 위치한 체인 ID.
    fn chain_id(&self) -> u64;

    /// 레지스트리에 등록된 전체 페어 수.
    async fn total_count(&self) -> RegistryResult<u64>;

    /// 인덱스 `index`의 페어 조회.
    async fn fetch_by_index(&self, index: u64) -> RegistryResult<RawPair>;

    /// 토큰 컨트랙트의 심볼 조회.
    async fn fetch_token_symbol(&self, token: Address) -> RegistryResult<String>;
}
