//! PancakeSwap 팩토리 레지스트리 구현.

use async_trait::async_trait;
use pairs_core::Address;
use std::sync::Arc;
use tracing::debug;

use crate::connector::FactoryContract;
use crate::traits::{PairRegistry, RawPair, RegistryResult};

/// PancakeSwap PairRegistry 구현.
pub struct PancakeSwapRegistry {
    factory: Arc<FactoryContract>,
    chain_id: u64,
}

impl PancakeSwapRegistry {
    /// 새 PancakeSwapRegistry 생성.
    pub fn new(factory: Arc<FactoryContract>, chain_id: u64) -> Self {
        Self { factory, chain_id }
    }
}

#[async_trait]
impl PairRegistry for PancakeSwapRegistry {
    fn name(&self) -> &str {
        "pancakeswap"
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn total_count(&self) -> RegistryResult<u64> {
        self.factory.all_pairs_length().await
    }

    async fn fetch_by_index(&self, index: u64) -> RegistryResult<RawPair> {
        debug!(index, factory = ?self.factory.address(), "PancakeSwap 페어 조회");
        self.factory.fetch_pair(index).await
    }

    async fn fetch_token_symbol(&self, token: Address) -> RegistryResult<String> {
        self.factory.token_symbol(token).await
    }
}
