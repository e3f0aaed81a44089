//! The address→transactions index store.

use std::sync::Arc;

use addrindex_core::{Address, AddressIndex};

use super::paginate;
use crate::error::StorageError;
use crate::kv::{KvBackend, WriteBatch};
use crate::marshal::{
    address_key_prefix, address_key_sequence, address_time_key_prefix, marshal_address_key,
    marshal_address_value, unmarshal_address_key, unmarshal_address_value,
};

/// Address index store: one entry per (address, transaction).
///
/// Keys sort by (address, time, sequence), so a prefix scan over an
/// address walks its transactions in time order.
pub struct AddressIndexStore<B: KvBackend> {
    backend: Arc<B>,
}

impl<B: KvBackend> AddressIndexStore<B> {
    /// Create a store over its backend database.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Persist one entry.
    pub fn put(&self, entry: &AddressIndex) -> Result<(), StorageError> {
        let key = marshal_address_key(&entry.address, entry.time, entry.sequence)?;
        let value = marshal_address_value(&entry.tx_hash, &entry.couple_address, &entry.value);
        self.backend.put(&key, &value)
    }

    /// Persist a group of entries atomically.
    ///
    /// Used by scanning workers that index a whole block at once. All
    /// keys are marshalled before anything is written, so an invalid
    /// entry aborts the batch with nothing persisted.
    pub fn put_batch(&self, entries: &[AddressIndex]) -> Result<(), StorageError> {
        let mut batch = WriteBatch::new();
        for entry in entries {
            let key = marshal_address_key(&entry.address, entry.time, entry.sequence)?;
            let value = marshal_address_value(&entry.tx_hash, &entry.couple_address, &entry.value);
            batch.put(key, value);
        }
        self.backend.write_batch(batch)
    }

    /// All transactions for an address: total match count plus the
    /// requested page, in (time, sequence) order.
    pub fn transactions_by_address(
        &self,
        address: &Address,
        rows: usize,
        start: usize,
    ) -> Result<(usize, Vec<AddressIndex>), StorageError> {
        let prefix = address_key_prefix(address);
        let iter = self.backend.prefix_iterator(&prefix)?;
        paginate(iter, rows, start, |(key, value)| decode_entry(&key, &value))
    }

    /// All transactions for an address at one exact time.
    pub fn transactions_by_address_at(
        &self,
        address: &Address,
        time: u64,
    ) -> Result<Vec<AddressIndex>, StorageError> {
        let prefix = address_time_key_prefix(address, time)?;
        let mut entries = Vec::new();
        for (key, value) in self.backend.prefix_iterator(&prefix)? {
            entries.push(decode_entry(&key, &value)?);
        }
        Ok(entries)
    }

    /// All transactions for an address at or after a time.
    pub fn transactions_by_address_from(
        &self,
        address: &Address,
        time: u64,
    ) -> Result<Vec<AddressIndex>, StorageError> {
        let address_prefix = address_key_prefix(address);
        let start_key = address_time_key_prefix(address, time)?;
        let mut entries = Vec::new();
        for (key, value) in self
            .backend
            .iterator_from(&start_key)?
            .take_while(|(k, _)| k.starts_with(&address_prefix))
        {
            entries.push(decode_entry(&key, &value)?);
        }
        Ok(entries)
    }
}

fn decode_entry(key: &[u8], value: &[u8]) -> Result<AddressIndex, StorageError> {
    let (address, time) = unmarshal_address_key(key)?;
    let sequence = address_key_sequence(key)?;
    let decoded = unmarshal_address_value(value)?;
    Ok(AddressIndex {
        address,
        time,
        sequence,
        tx_hash: decoded.tx_hash,
        couple_address: decoded.couple_address,
        value: decoded.value,
    })
}
