//! UniswapV2 형식 팩토리/페어 컨트랙트 호출.
//!
//! Uniswap과 PancakeSwap 팩토리는 동일한 ABI(`allPairs`, `allPairsLength`)를
//! 공유하므로 두 구현체가 이 타입을 함께 사용합니다.

use ethers::abi::{AbiDecode, AbiEncode};
use ethers::types::{Address, U256};
use std::sync::Arc;
use tracing::debug;

use super::bindings::{
    AllPairsCall, AllPairsLengthCall, DecimalsCall, NameCall, SymbolCall, Token0Call, Token1Call,
};
use super::RpcClient;
use crate::{RawPair, RegistryError, RegistryResult};

/// 팩토리 컨트랙트 핸들.
pub struct FactoryContract {
    rpc: Arc<RpcClient>,
    address: Address,
}

impl FactoryContract {
    pub fn new(rpc: Arc<RpcClient>, address: Address) -> Self {
        Self { rpc, address }
    }

    /// 팩토리 주소.
    pub fn address(&self) -> Address {
        self.address
    }

    /// `allPairsLength()`
    pub async fn all_pairs_length(&self) -> RegistryResult<u64> {
        let length: U256 = self.rpc.call_decode(self.address, AllPairsLengthCall).await?;
        narrow(length, u64::MAX.into()).map(|v| v.low_u64())
    }

    /// `allPairs(index)`
    pub async fn all_pairs(&self, index: u64) -> RegistryResult<Address> {
        self.rpc
            .call_decode(
                self.address,
                AllPairsCall {
                    index: U256::from(index),
                },
            )
            .await
    }

    /// 인덱스의 페어 주소와 페어 메타데이터 조회.
    ///
    /// `allPairs` 실패만 에러로 반환합니다. 페어 컨트랙트의 메타데이터
    /// 호출이 실패하면 기본값(빈 문자열, 0, 제로 주소)을 사용합니다.
    pub async fn fetch_pair(&self, index: u64) -> RegistryResult<RawPair> {
        let address = self.all_pairs(index).await?;

        let token0 = self
            .rpc
            .call_decode(address, Token0Call)
            .await
            .unwrap_or_else(|e| fallback(index, "token0", e));
        let token1 = self
            .rpc
            .call_decode(address, Token1Call)
            .await
            .unwrap_or_else(|e| fallback(index, "token1", e));
        let name = self
            .call_text(address, NameCall)
            .await
            .unwrap_or_else(|e| fallback(index, "name", e));
        let symbol = self
            .call_text(address, SymbolCall)
            .await
            .unwrap_or_else(|e| fallback(index, "symbol", e));
        let decimals = self
            .decimals(address)
            .await
            .unwrap_or_else(|e| fallback(index, "decimals", e));

        Ok(RawPair {
            index,
            address,
            token0,
            token1,
            name,
            symbol,
            decimals,
        })
    }

    /// ERC-20 토큰의 `symbol()`.
    pub async fn token_symbol(&self, token: Address) -> RegistryResult<String> {
        self.call_text(token, SymbolCall).await
    }

    async fn decimals(&self, to: Address) -> RegistryResult<u32> {
        let decimals: U256 = self.rpc.call_decode(to, DecimalsCall).await?;
        narrow(decimals, u32::MAX.into()).map(|v| v.low_u32())
    }

    async fn call_text<C: AbiEncode>(&self, to: Address, call: C) -> RegistryResult<String> {
        let raw = self.rpc.call(to, call).await?;
        decode_text(&raw)
    }
}

/// `string` 반환값 디코딩.
///
/// 일부 오래된 토큰(MKR 등)은 `bytes32`를 반환하므로, 정확히 한 워드인
/// 응답은 뒤쪽 NUL을 잘라낸 문자열로 해석합니다.
pub fn decode_text(raw: &[u8]) -> RegistryResult<String> {
    if raw.len() == 32 {
        let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        return String::from_utf8(raw[..end].to_vec())
            .map_err(|e| RegistryError::DecodeError(e.to_string()));
    }
    String::decode(raw).map_err(|e| RegistryError::DecodeError(e.to_string()))
}

fn narrow(value: U256, max: U256) -> RegistryResult<U256> {
    if value > max {
        return Err(RegistryError::DecodeError(format!(
            "value {} out of range",
            value
        )));
    }
    Ok(value)
}

fn fallback<T: Default>(index: u64, field: &str, err: RegistryError) -> T {
    debug!(index, field, error = %err, "페어 메타데이터 조회 실패, 기본값 사용");
    T::default()
}
