//! 테스트를 위한 인메모리 레지스트리.
//!
//! 네트워크 없이 `PairRegistry`를 흉내냅니다:
//! - 생성된 페어 또는 직접 넣은 페어 목록
//! - 인덱스/토큰 단위 실패 주입
//! - 인덱스별 응답 지연 (완료 순서 섞기)
//!
//! # 예제
//!
//! ```ignore
//! let registry = SimulatedRegistry::new(1)
//!     .with_generated_pairs(5)
//!     .fail_index(3);
//!
//! assert_eq!(registry.total_count().await?, 5);
//! ```

use async_trait::async_trait;
use pairs_core::Address;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::traits::{PairRegistry, RawPair, RegistryResult};
use crate::RegistryError;

type LatencyFn = Box<dyn Fn(u64) -> Duration + Send + Sync>;

/// 인메모리 레지스트리.
pub struct SimulatedRegistry {
    chain_id: u64,
    pairs: Vec<RawPair>,
    symbols: HashMap<Address, String>,
    failing_indices: HashSet<u64>,
    latency: Option<LatencyFn>,
    fetched: Mutex<Vec<u64>>,
}

impl SimulatedRegistry {
    /// 빈 레지스트리 생성.
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            pairs: Vec::new(),
            symbols: HashMap::new(),
            failing_indices: HashSet::new(),
            latency: None,
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// 인덱스 기반 결정적 주소.
    pub fn address_for(seed: u64) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = 0x11;
        bytes[12..].copy_from_slice(&seed.to_be_bytes());
        Address::from(bytes)
    }

    /// `count`개의 페어를 생성합니다.
    ///
    /// 인덱스 `i` 페어의 토큰은 `address_for(2i + 1)`, `address_for(2i + 2)`이며
    /// 심볼은 각각 `TK{2i+1}`, `TK{2i+2}`입니다.
    pub fn with_generated_pairs(mut self, count: u64) -> Self {
        let base = self.pairs.len() as u64;
        for index in base..base + count {
            let token0 = Self::address_for(index * 2 + 1);
            let token1 = Self::address_for(index * 2 + 2);
            self.symbols.insert(token0, format!("TK{}", index * 2 + 1));
            self.symbols.insert(token1, format!("TK{}", index * 2 + 2));
            self.pairs.push(RawPair {
                index,
                address: Self::address_for(1_000_000 + index),
                token0,
                token1,
                name: "Uniswap V2".to_string(),
                symbol: "UNI-V2".to_string(),
                decimals: 18,
            });
        }
        self
    }

    /// 페어를 직접 추가합니다. 인덱스는 추가 순서로 다시 매깁니다.
    pub fn with_pair(mut self, mut pair: RawPair) -> Self {
        pair.index = self.pairs.len() as u64;
        self.pairs.push(pair);
        self
    }

    /// 토큰 심볼을 등록합니다. 등록되지 않은 토큰의 심볼 조회는 실패합니다.
    pub fn with_symbol(mut self, token: Address, symbol: impl Into<String>) -> Self {
        self.symbols.insert(token, symbol.into());
        self
    }

    /// 해당 인덱스 조회가 항상 실패하도록 합니다.
    pub fn fail_index(mut self, index: u64) -> Self {
        self.failing_indices.insert(index);
        self
    }

    /// 인덱스별 응답 지연을 설정합니다.
    pub fn with_latency<F>(mut self, latency: F) -> Self
    where
        F: Fn(u64) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Box::new(latency));
        self
    }

    /// 지금까지 `fetch_by_index`가 호출된 인덱스 (호출 순서).
    pub fn fetched_indices(&self) -> Vec<u64> {
        self.fetched
            .lock()
            .map(|fetched| fetched.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PairRegistry for SimulatedRegistry {
    fn name(&self) -> &str {
        "simulated"
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn total_count(&self) -> RegistryResult<u64> {
        Ok(self.pairs.len() as u64)
    }

    async fn fetch_by_index(&self, index: u64) -> RegistryResult<RawPair> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(index);
        }

        if let Some(latency) = &self.latency {
            tokio::time::sleep(latency(index)).await;
        }

        if self.failing_indices.contains(&index) {
            return Err(RegistryError::NetworkError(format!(
                "simulated failure at index {}",
                index
            )));
        }

        self.pairs
            .get(index as usize)
            .cloned()
            .ok_or_else(|| RegistryError::RpcError {
                code: -32000,
                message: format!("index {} out of range", index),
            })
    }

    async fn fetch_token_symbol(&self, token: Address) -> RegistryResult<String> {
        self.symbols
            .get(&token)
            .cloned()
            .ok_or_else(|| RegistryError::RpcError {
                code: -32000,
                message: "execution reverted".to_string(),
            })
    }
}
