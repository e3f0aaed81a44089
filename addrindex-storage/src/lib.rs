//! # Addrindex Storage
//!
//! Byte codecs, key-value backends and index stores for the addrindex
//! address/transaction indexer.
//!
//! This crate provides:
//! - The binary codec layer (`marshal`): fixed/variable-width byte key and
//!   value layouts for address entries, block summaries and scan
//!   checkpoints. Byte-lexicographic comparison of produced keys equals
//!   the numeric/temporal ordering the query layer depends on.
//! - An ordered key-value backend abstraction (`kv`) with an in-memory
//!   implementation for tests and a RocksDB implementation for production.
//! - Typed index stores (`index`) that combine the two and expose the
//!   paginated reads the API layer serves.
//!
//! ## Key layouts
//!
//! | store   | key                                        | value                                        |
//! |---------|--------------------------------------------|----------------------------------------------|
//! | address | `address(20) ‖ time(4) ‖ sequence(1)`      | `tx_hash(32) ‖ couple(20) ‖ magnitude`       |
//! | block   | decimal digits of the block number         | `created_at(4) ‖ time(4) ‖ (addr ‖ seq)*N`   |
//! | batch   | `pad(from,10) ‖ pad(to,10) ‖ step(1) ‖ decimal(created_at)` | `updated_at(4) ‖ magnitude(current)` |
//!
//! Every codec is a pure function over its inputs: no shared state, no
//! buffering, no I/O. All of them are safe to call from any number of
//! concurrent workers.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod index;
pub mod kv;
pub mod marshal;

pub use error::StorageError;
pub use index::{AddressIndexStore, BatchStatusStore, BlockIndexStore};
pub use kv::{KvBackend, MemoryBackend, RocksBackend, WriteBatch};
pub use marshal::{BlockKeyFormat, MarshalError};
