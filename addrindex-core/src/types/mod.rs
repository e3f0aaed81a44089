//! Index record types.
//!
//! This module contains the records the indexer persists:
//!
//! - AddressIndex: one transaction touching a tracked address
//! - BlockIndex and AddressSequence: per-block address summary
//! - BatchStatus: checkpoint of one scan pass over a block range
//!
//! plus the address/hash primitives they are built from.

mod address_index;
mod batch_status;
mod block_index;
mod primitives;

pub use address_index::AddressIndex;
pub use batch_status::BatchStatus;
pub use block_index::{AddressSequence, BlockIndex};
pub use primitives::{
    format_address, format_tx_hash, parse_address, parse_tx_hash, Address, TxHash,
};
