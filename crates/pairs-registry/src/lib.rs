//! DEX 팩토리 레지스트리 클라이언트.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - `PairRegistry` trait: 순차 인덱스 기반 페어 레지스트리 인터페이스
//! - `ethers` 프로바이더 기반 커넥터 (`eth_call` + `abigen!` 바인딩)
//! - Uniswap / PancakeSwap 팩토리 구현체
//! - (계열, 체인, 버전) → 팩토리 주소 매핑
//! - 테스트용 인메모리 레지스트리

pub mod connector;
pub mod error;
pub mod factory;
pub mod provider;
pub mod simulated;
pub mod traits;

pub use connector::{FactoryContract, RpcClient, RpcConfig};
pub use error::*;
pub use factory::{connect_registry, factory_address, DexFamily};
pub use provider::{PancakeSwapRegistry, UniswapRegistry};
pub use simulated::SimulatedRegistry;
pub use traits::*;
