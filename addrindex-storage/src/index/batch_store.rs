//! The batch checkpoint store.

use std::sync::Arc;

use addrindex_core::BatchStatus;

use crate::error::StorageError;
use crate::kv::KvBackend;
use crate::marshal::{
    batch_key_prefix_from, marshal_batch_key, marshal_batch_value, unmarshal_batch_key,
    unmarshal_batch_value,
};

/// Checkpoint store: one record per scan pass over a block range.
///
/// A record's key is its identity (from, to, step, created_at); workers
/// record progress by re-putting the same key with a fresh value.
/// Records are never deleted, they double as an audit trail and resume
/// point.
pub struct BatchStatusStore<B: KvBackend> {
    backend: Arc<B>,
}

impl<B: KvBackend> BatchStatusStore<B> {
    /// Create a store over its backend database.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Persist a checkpoint, overwriting any previous progress of the
    /// same pass.
    pub fn put(&self, status: &BatchStatus) -> Result<(), StorageError> {
        let key = marshal_batch_key(status.from, status.to, status.step, status.created_at);
        let value = marshal_batch_value(status.updated_at, status.current.as_ref())?;
        self.backend.put(&key, &value)
    }

    /// List every checkpoint.
    pub fn all(&self) -> Result<Vec<BatchStatus>, StorageError> {
        let mut statuses = Vec::new();
        for (key, value) in self.backend.prefix_iterator(&[])? {
            statuses.push(decode_status(&key, &value)?);
        }
        Ok(statuses)
    }

    /// List every checkpoint whose range starts at `from`.
    pub fn by_from(&self, from: u64) -> Result<Vec<BatchStatus>, StorageError> {
        let prefix = batch_key_prefix_from(from);
        let mut statuses = Vec::new();
        for (key, value) in self.backend.prefix_iterator(&prefix)? {
            statuses.push(decode_status(&key, &value)?);
        }
        Ok(statuses)
    }
}

fn decode_status(key: &[u8], value: &[u8]) -> Result<BatchStatus, StorageError> {
    let (from, to, step, created_at) = unmarshal_batch_key(key)?;
    let (updated_at, current) = unmarshal_batch_value(value)?;
    Ok(BatchStatus {
        from,
        to,
        step,
        created_at,
        updated_at,
        current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryBackend;
    use addrindex_core::U256;

    fn status(from: u64, to: u64, step: u8, created_at: u64) -> BatchStatus {
        BatchStatus {
            from,
            to,
            step,
            created_at,
            updated_at: created_at,
            current: None,
        }
    }

    fn create_store() -> BatchStatusStore<MemoryBackend> {
        BatchStatusStore::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_put_and_list() {
        let store = create_store();
        let original = status(10, 20, 3, 12_345);
        store.put(&original).unwrap();

        assert_eq!(store.all().unwrap(), vec![original]);
    }

    #[test]
    fn test_progress_update_overwrites() {
        let store = create_store();
        let mut checkpoint = status(0, 1_000, 1, 12_345);
        store.put(&checkpoint).unwrap();

        checkpoint.updated_at = 12_400;
        checkpoint.current = Some(U256::from(512u64));
        store.put(&checkpoint).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].current, Some(U256::from(512u64)));
        assert_eq!(all[0].updated_at, 12_400);
    }

    #[test]
    fn test_same_range_different_created_at_are_distinct() {
        let store = create_store();
        store.put(&status(0, 100, 1, 111)).unwrap();
        store.put(&status(0, 100, 1, 222)).unwrap();

        assert_eq!(store.all().unwrap().len(), 2);
    }

    #[test]
    fn test_listing_sorts_by_from_then_to_then_step() {
        let store = create_store();
        store.put(&status(10, 20, 1, 1)).unwrap();
        store.put(&status(9, 500, 0, 1)).unwrap();
        store.put(&status(10, 20, 0, 1)).unwrap();

        let order: Vec<_> = store
            .all()
            .unwrap()
            .iter()
            .map(|s| (s.from, s.to, s.step))
            .collect();
        assert_eq!(order, vec![(9, 500, 0), (10, 20, 0), (10, 20, 1)]);
    }

    #[test]
    fn test_by_from() {
        let store = create_store();
        store.put(&status(10, 20, 0, 1)).unwrap();
        store.put(&status(10, 30, 1, 2)).unwrap();
        store.put(&status(11, 20, 0, 3)).unwrap();

        let matching = store.by_from(10).unwrap();
        assert_eq!(matching.len(), 2);
        assert!(matching.iter().all(|s| s.from == 10));
    }
}
