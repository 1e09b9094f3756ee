//! 이더리움 노드 연결.
//!
//! `ethers` HTTP 프로바이더로 최신 블록 기준 `eth_call`만 수행합니다.

use ethers::abi::{AbiDecode, AbiEncode};
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{transaction::eip2718::TypedTransaction, Address, Bytes, TransactionRequest};
use std::time::Duration;
use tracing::trace;

use crate::{RegistryError, RegistryResult};

/// 노드 접속 설정.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// 노드 URL (예: `https://mainnet.infura.io/v3/<key>`)
    pub node_url: String,
    /// 호출당 타임아웃 (초)
    pub timeout_secs: u64,
}

impl RpcConfig {
    pub fn new(node_url: impl Into<String>) -> Self {
        Self {
            node_url: node_url.into(),
            timeout_secs: 30,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// 타임아웃이 걸린 `eth_call` 클라이언트.
pub struct RpcClient {
    provider: Provider<Http>,
    timeout: Duration,
}

impl RpcClient {
    pub fn new(config: RpcConfig) -> RegistryResult<Self> {
        if config.node_url.trim().is_empty() {
            return Err(RegistryError::Config("node url is empty".to_string()));
        }

        let provider = Provider::<Http>::try_from(config.node_url.as_str())
            .map_err(|e| RegistryError::Config(format!("invalid node url: {}", e)))?;

        Ok(Self {
            provider,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// 컨트랙트 호출 후 원시 반환 바이트를 돌려줍니다.
    pub async fn call<C: AbiEncode>(&self, to: Address, call: C) -> RegistryResult<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new().to(to).data(call.encode()).into();
        trace!(to = ?to, "eth_call");

        tokio::time::timeout(self.timeout, self.provider.call(&tx, None))
            .await
            .map_err(|_| {
                RegistryError::Timeout(format!("eth_call to {:#x} after {:?}", to, self.timeout))
            })?
            .map_err(RegistryError::from)
    }

    /// 컨트랙트 호출 후 반환값을 `R`로 디코딩합니다.
    pub async fn call_decode<C: AbiEncode, R: AbiDecode>(
        &self,
        to: Address,
        call: C,
    ) -> RegistryResult<R> {
        let raw = self.call(to, call).await?;
        R::decode(&raw).map_err(|e| RegistryError::DecodeError(e.to_string()))
    }
}
