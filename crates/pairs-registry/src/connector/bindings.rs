//! UniswapV2 형식 팩토리/페어 컨트랙트 바인딩.
//!
//! 페어 컨트랙트는 LP 토큰이기도 하므로 `name`/`symbol`/`decimals`는
//! 일반 ERC-20 토큰 조회에도 그대로 사용합니다.

use ethers::contract::abigen;

abigen!(
    UniswapV2Factory,
    r#"[
        function allPairsLength() external view returns (uint256)
        function allPairs(uint256 index) external view returns (address)
    ]"#
);

abigen!(
    UniswapV2Pair,
    r#"[
        function token0() external view returns (address)
        function token1() external view returns (address)
        function name() external view returns (string)
        function symbol() external view returns (string)
        function decimals() external view returns (uint8)
    ]"#
);

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::AbiEncode;
    use ethers::types::U256;

    #[test]
    fn test_factory_selectors() {
        assert_eq!(AllPairsLengthCall.encode(), vec![0x57, 0x4f, 0x2b, 0xa3]);

        let data = AllPairsCall {
            index: U256::from(5),
        }
        .encode();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], &[0x1e, 0x3d, 0xd1, 0x8b]);
        assert_eq!(data[35], 5);
    }

    #[test]
    fn test_pair_selectors() {
        assert_eq!(Token0Call.encode(), vec![0x0d, 0xfe, 0x16, 0x81]);
        assert_eq!(Token1Call.encode(), vec![0xd2, 0x12, 0x20, 0xa7]);
        assert_eq!(NameCall.encode(), vec![0x06, 0xfd, 0xde, 0x03]);
        assert_eq!(SymbolCall.encode(), vec![0x95, 0xd8, 0x9b, 0x41]);
        assert_eq!(DecimalsCall.encode(), vec![0x31, 0x3c, 0xe5, 0x67]);
    }
}
