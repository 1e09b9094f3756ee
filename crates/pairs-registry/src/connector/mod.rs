//! 노드 연결 및 컨트랙트 호출.

pub mod bindings;
mod contract;
mod rpc;

pub use contract::{decode_text, FactoryContract};
pub use rpc::{RpcClient, RpcConfig};
