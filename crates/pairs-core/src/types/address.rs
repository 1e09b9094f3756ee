//! 이더리움 주소 타입.
//!
//! 주소 자체는 `ethers`의 [`Address`](ethers::types::Address)를 사용합니다.
//! 데이터셋 파일에는 항상 소문자 `0x` 접두 16진수 전체 문자열로 기록하며,
//! 이 형식은 [`lowercase_hex`] 직렬화 모듈이 보장합니다.

pub use ethers::types::Address;

use crate::{PairsError, PairsResult};

/// 주소 문자열을 파싱합니다.
///
/// `0x` 접두는 선택이며 대소문자(체크섬 표기)는 구분하지 않습니다.
/// 16진수 40자리가 아니면 [`PairsError::InvalidAddress`]를 반환합니다.
pub fn parse_address(s: &str) -> PairsResult<Address> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    if digits.len() != 40 {
        return Err(PairsError::InvalidAddress(s.to_string()));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes)?;
    Ok(Address::from(bytes))
}

/// 주소를 소문자 `0x` 접두 40자리 문자열로 변환합니다.
///
/// `Address`의 `Display`는 `0x5c69…aa6f`처럼 축약하므로 파일/로그에
/// 전체 주소가 필요할 때는 이 함수를 사용합니다.
pub fn format_address(address: &Address) -> String {
    format!("{:#x}", address)
}

/// `#[serde(with = "lowercase_hex")]`용 주소 직렬화.
pub mod lowercase_hex {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{format_address, parse_address, Address};

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_address(address))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).map_err(de::Error::custom)
    }
}
