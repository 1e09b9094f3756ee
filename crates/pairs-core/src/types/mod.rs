//! 워크스페이스 전반에서 사용되는 공통 타입.

mod address;
mod dataset;
mod pair;

pub use address::*;
pub use dataset::*;
pub use pair::*;
