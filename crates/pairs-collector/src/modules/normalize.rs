//! 원시 페어 데이터를 `PairRecord`로 변환.
//!
//! 토큰 심볼 규칙:
//! - 제로 주소 토큰은 `UNK`
//! - 심볼 조회 실패 또는 허용 문자 외 문자가 있으면 `UNK`
//! - 13자를 넘는 심볼은 앞 13자만 사용

use once_cell::sync::Lazy;
use pairs_core::{Address, PairRecord};
use pairs_registry::{PairRegistry, RawPair};
use regex::Regex;
use tracing::debug;

/// 알 수 없는 심볼 대체값
pub const UNKNOWN_SYMBOL: &str = "UNK";

/// 표시 이름에 사용하는 심볼 최대 길이
pub const MAX_SYMBOL_LEN: usize = 13;

/// 영숫자, `_`, 공백, `. ' + - $ % /`만 허용
static ALLOWED_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ A-Za-z0-9_.'+\-$%/]+$").expect("valid symbol pattern"));

/// 심볼이 허용 문자로만 이루어졌는지 확인
pub fn is_allowed_symbol(symbol: &str) -> bool {
    ALLOWED_SYMBOL.is_match(symbol)
}

/// 심볼을 최대 길이로 자름
pub fn truncate_symbol(symbol: &str) -> String {
    symbol.chars().take(MAX_SYMBOL_LEN).collect()
}

/// 조회 결과에 심볼 규칙을 적용
pub fn normalize_symbol<E>(fetched: Result<String, E>) -> String {
    match fetched {
        Ok(symbol) if is_allowed_symbol(&symbol) => truncate_symbol(&symbol),
        _ => UNKNOWN_SYMBOL.to_string(),
    }
}

/// 토큰 심볼 조회 후 정규화
pub async fn resolve_token_symbol(registry: &dyn PairRegistry, token: Address) -> String {
    if token.is_zero() {
        return UNKNOWN_SYMBOL.to_string();
    }

    let fetched = registry.fetch_token_symbol(token).await;
    if let Err(e) = &fetched {
        debug!(token = ?token, error = %e, "토큰 심볼 조회 실패");
    }
    normalize_symbol(fetched)
}

/// 원시 페어를 레코드로 변환
pub async fn to_record(registry: &dyn PairRegistry, raw: RawPair) -> PairRecord {
    let token0_symbol = resolve_token_symbol(registry, raw.token0).await;
    let token1_symbol = resolve_token_symbol(registry, raw.token1).await;

    PairRecord {
        token0: raw.token0,
        token1: raw.token1,
        name: PairRecord::display_name(&raw.name, &token0_symbol, &token1_symbol),
        address: raw.address,
        symbol: raw.symbol,
        decimals: raw.decimals,
        chain_id: registry.chain_id(),
    }
}
