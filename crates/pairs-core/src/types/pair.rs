//! 페어 레코드 정의.

use serde::{Deserialize, Serialize};

use super::{lowercase_hex, Address};

/// 레지스트리 인덱스 하나에 해당하는 정규화된 페어 메타데이터.
///
/// 워커가 레지스트리 데이터로부터 생성하며, 생성 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    /// 첫 번째 토큰 주소
    #[serde(with = "lowercase_hex")]
    pub token0: Address,
    /// 두 번째 토큰 주소
    #[serde(with = "lowercase_hex")]
    pub token1: Address,
    /// 표시 이름 (`"<pairName> - <token0Symbol>/<token1Symbol>"`)
    pub name: String,
    /// 페어 컨트랙트 주소
    #[serde(with = "lowercase_hex")]
    pub address: Address,
    /// 페어(LP 토큰) 심볼
    pub symbol: String,
    /// 페어(LP 토큰) 소수 자릿수
    pub decimals: u32,
    /// 체인 ID
    pub chain_id: u64,
}

impl PairRecord {
    /// 표시 이름을 조합합니다.
    pub fn display_name(pair_name: &str, token0_symbol: &str, token1_symbol: &str) -> String {
        format!("{} - {}/{}", pair_name, token0_symbol, token1_symbol)
    }
}
