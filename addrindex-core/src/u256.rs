//! 256-bit unsigned integer arithmetic for transferred amounts.
//!
//! Transfer values are 256-bit words on the chains this indexer targets,
//! so a fixed 256-bit type covers the full domain. JSON payloads carry
//! values as decimal strings to avoid precision loss in consumers.

// Allow clippy warnings from the uint crate's construct_uint macro
#![allow(clippy::manual_div_ceil)]
#![allow(clippy::assign_op_pattern)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer.
    ///
    /// Used for transferred amounts and scan-progress block numbers.
    pub struct U256(4);
}

impl U256 {
    /// Serialize to big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[0..8].copy_from_slice(&self.0[3].to_be_bytes());
        bytes[8..16].copy_from_slice(&self.0[2].to_be_bytes());
        bytes[16..24].copy_from_slice(&self.0[1].to_be_bytes());
        bytes[24..32].copy_from_slice(&self.0[0].to_be_bytes());
        bytes
    }

    /// Deserialize from big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        U256([
            u64::from_be_bytes(bytes[24..32].try_into().unwrap()),
            u64::from_be_bytes(bytes[16..24].try_into().unwrap()),
            u64::from_be_bytes(bytes[8..16].try_into().unwrap()),
            u64::from_be_bytes(bytes[0..8].try_into().unwrap()),
        ])
    }
}

// Custom serde implementation: decimal strings at the API boundary
impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct U256Visitor;

        impl serde::de::Visitor<'_> for U256Visitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a decimal string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<U256, E> {
                U256::from_dec_str(v).map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(U256Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_be_bytes_roundtrip() {
        let value = U256::from(0x0102_0304_0506_0708u64);
        let bytes = value.to_be_bytes();
        assert_eq!(U256::from_be_bytes(&bytes), value);

        // Big-endian: the low word lands at the tail
        assert_eq!(bytes[31], 0x08);
        assert_eq!(bytes[24], 0x01);
        assert_eq!(bytes[0], 0x00);
    }

    #[test]
    fn test_zero_bytes() {
        assert_eq!(U256::zero().to_be_bytes(), [0u8; 32]);
        assert_eq!(U256::from_be_bytes(&[0u8; 32]), U256::zero());
    }

    #[test]
    fn test_serde_decimal_string() {
        let value = U256::from(123_456_789u64);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"123456789\"");

        let recovered: U256 = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, value);
    }

    #[test]
    fn test_serde_rejects_non_decimal() {
        let result: Result<U256, _> = serde_json::from_str("\"0xff\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_large_value_roundtrip() {
        // A value that does not fit in u128
        let value = U256::from(1u64) << 200;
        let json = serde_json::to_string(&value).unwrap();
        let recovered: U256 = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, value);
    }
}
