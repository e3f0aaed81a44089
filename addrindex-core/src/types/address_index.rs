//! The address→transaction index record.

use serde::{Deserialize, Serialize};

use crate::types::primitives::{Address, TxHash};
use crate::u256::U256;

/// One transaction touching a tracked address.
///
/// Records are created once per observed transaction by the scanning
/// worker and are immutable afterwards. Within a given (address, time)
/// pair the `sequence` values are unique; it is the worker's job to
/// assign them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressIndex {
    /// The tracked address this entry belongs to.
    pub address: Address,

    /// Transaction time in seconds since epoch.
    ///
    /// Must fit in 32 bits to be encodable as a key field.
    pub time: u64,

    /// Disambiguates multiple transactions at the same (address, time).
    pub sequence: u8,

    /// Hash of the transaction.
    pub tx_hash: TxHash,

    /// The counterparty address.
    pub couple_address: Address,

    /// Transferred amount. Zero is a valid amount.
    pub value: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let entry = AddressIndex {
            address: [0x11; 20],
            time: 1_700_000_000,
            sequence: 3,
            tx_hash: [0x22; 32],
            couple_address: [0x33; 20],
            value: U256::from(1_000_000u64),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let recovered: AddressIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, recovered);
    }

    #[test]
    fn test_value_serializes_as_decimal_string() {
        let entry = AddressIndex {
            address: [0u8; 20],
            time: 0,
            sequence: 0,
            tx_hash: [0u8; 32],
            couple_address: [0u8; 20],
            value: U256::from(42u64),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["value"], "42");
    }
}
