//! The block→addresses index record.

use serde::{Deserialize, Serialize};

use crate::types::primitives::Address;

/// An address touched by a block, with the sequence number the scanning
/// worker assigned to it at indexing time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSequence {
    /// The touched address.
    pub address: Address,
    /// Sequence assigned at indexing time.
    pub sequence: u8,
}

/// Summary of one indexed block.
///
/// Both timestamps are mandatory: a record without them must never be
/// constructed, so the fields are not optional. Records are append-only;
/// once written they are never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIndex {
    /// Time the record was written, seconds since epoch.
    pub created_at: u64,

    /// The block's own timestamp, seconds since epoch.
    pub time: u64,

    /// Every address touched by the block, in insertion order.
    pub addresses: Vec<AddressSequence>,
}

impl BlockIndex {
    /// Create a block summary with no addresses.
    pub fn new(created_at: u64, time: u64) -> Self {
        Self {
            created_at,
            time,
            addresses: Vec::new(),
        }
    }

    /// Append a touched address.
    pub fn push(&mut self, address: Address, sequence: u8) {
        self.addresses.push(AddressSequence { address, sequence });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut index = BlockIndex::new(1_700_000_000, 1_699_999_988);
        index.push([1u8; 20], 0);
        index.push([2u8; 20], 1);
        index.push([1u8; 20], 2);

        assert_eq!(index.addresses.len(), 3);
        assert_eq!(index.addresses[0].address, [1u8; 20]);
        assert_eq!(index.addresses[1].address, [2u8; 20]);
        assert_eq!(index.addresses[2].sequence, 2);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut index = BlockIndex::new(1_700_000_000, 1_699_999_988);
        index.push([7u8; 20], 1);

        let json = serde_json::to_string(&index).unwrap();
        let recovered: BlockIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(index, recovered);
    }
}
