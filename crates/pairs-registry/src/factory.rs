//! 레지스트리 계열/체인/버전별 팩토리 주소와 레지스트리 생성.

use pairs_core::{parse_address, Address};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::connector::{FactoryContract, RpcClient, RpcConfig};
use crate::provider::{PancakeSwapRegistry, UniswapRegistry};
use crate::{PairRegistry, RegistryError, RegistryResult};

/// 레지스트리 계열.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DexFamily {
    Uniswap,
    PancakeSwap,
}

impl fmt::Display for DexFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DexFamily::Uniswap => write!(f, "uniswap"),
            DexFamily::PancakeSwap => write!(f, "pancakeswap"),
        }
    }
}

impl FromStr for DexFamily {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniswap" => Ok(Self::Uniswap),
            "pancakeswap" => Ok(Self::PancakeSwap),
            _ => Err(RegistryError::Config(format!("unknown DEX exchange: {}", s))),
        }
    }
}

/// (계열, 체인 ID, 버전) → 팩토리 주소 테이블.
const FACTORY_ADDRESSES: &[(DexFamily, u64, u32, &str)] = &[
    (DexFamily::Uniswap, 1, 1, "0xc0a47dfe034b400b47bdad5fecda2621de6c4d95"),
    (DexFamily::Uniswap, 1, 2, "0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f"),
    (DexFamily::Uniswap, 1, 3, "0x1f98431c8ad98523631ae4a59f267346ea31f984"),
    (DexFamily::PancakeSwap, 56, 1, "0xbcfccbde45ce874adcb698cc183debcf17952812"),
    (DexFamily::PancakeSwap, 56, 2, "0xca143ce32fe78f1f7019d7d551a6402fc5350c73"),
];

/// 팩토리 주소 조회. 등록되지 않은 조합은 설정 에러입니다.
pub fn factory_address(family: DexFamily, chain_id: u64, version: u32) -> RegistryResult<Address> {
    let (_, _, _, address) = FACTORY_ADDRESSES
        .iter()
        .find(|(f, c, v, _)| *f == family && *c == chain_id && *v == version)
        .ok_or_else(|| {
            RegistryError::Config(format!(
                "no factory for dex={} chain_id={} version={}",
                family, chain_id, version
            ))
        })?;

    parse_address(address)
        .map_err(|e| RegistryError::Config(format!("invalid factory address: {}", e)))
}

/// 설정에 맞는 레지스트리 구현체를 생성합니다.
pub fn connect_registry(
    family: DexFamily,
    chain_id: u64,
    version: u32,
    rpc_config: RpcConfig,
) -> RegistryResult<Arc<dyn PairRegistry>> {
    let address = factory_address(family, chain_id, version)?;
    let rpc = Arc::new(RpcClient::new(rpc_config)?);
    let factory = Arc::new(FactoryContract::new(rpc, address));

    info!(
        dex = %family,
        chain_id,
        version,
        factory = ?address,
        "레지스트리 연결"
    );

    let registry: Arc<dyn PairRegistry> = match family {
        DexFamily::Uniswap => Arc::new(UniswapRegistry::new(factory, chain_id)),
        DexFamily::PancakeSwap => Arc::new(PancakeSwapRegistry::new(factory, chain_id)),
    };
    Ok(registry)
}
