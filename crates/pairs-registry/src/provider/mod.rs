//! PairRegistry 구현체.
//!
//! 레지스트리 계열별 PairRegistry trait 구현체들을 제공합니다.

mod pancakeswap;
mod uniswap;

pub use pancakeswap::PancakeSwapRegistry;
pub use uniswap::UniswapRegistry;
