//! # Addrindex Core
//!
//! Core domain types for the addrindex address/transaction indexer.
//!
//! This crate provides the foundation for the storage and node crates:
//! - Address and transaction-hash primitives with hex boundary parsing
//! - Index record types (`AddressIndex`, `BlockIndex`, `BatchStatus`)
//! - 256-bit arithmetic for transferred amounts

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;
pub mod u256;

// Re-export commonly used types at crate root
pub use error::ParseError;
pub use types::{
    format_address, format_tx_hash, parse_address, parse_tx_hash, Address, AddressIndex,
    AddressSequence, BatchStatus, BlockIndex, TxHash,
};
pub use u256::U256;
