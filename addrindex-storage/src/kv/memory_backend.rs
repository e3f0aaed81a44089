//! In-memory key-value backend for tests and development.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{BatchOp, KvBackend, KvIterator, WriteBatch};
use crate::error::StorageError;

/// In-memory backend over a BTreeMap.
///
/// The map keeps keys in byte order, so prefix and from-key iteration
/// behave exactly like the disk-backed store. Thread-safe.
pub struct MemoryBackend {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    /// Check whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.read().unwrap().is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.read().unwrap().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        self.data.write().unwrap().remove(key);
        Ok(())
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<(), StorageError> {
        let mut data = self.data.write().unwrap();
        for op in batch.into_ops() {
            match op {
                BatchOp::Put { key, value } => {
                    data.insert(key, value);
                }
                BatchOp::Delete { key } => {
                    data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn prefix_iterator(&self, prefix: &[u8]) -> Result<KvIterator<'_>, StorageError> {
        let data = self.data.read().unwrap();
        let prefix = prefix.to_vec();
        let entries: Vec<(Vec<u8>, Vec<u8>)> = data
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(entries.into_iter()))
    }

    fn iterator_from(&self, start: &[u8]) -> Result<KvIterator<'_>, StorageError> {
        let data = self.data.read().unwrap();
        let entries: Vec<(Vec<u8>, Vec<u8>)> = data
            .range(start.to_vec()..)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(entries.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());
        assert_eq!(backend.len(), 0);
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let backend = MemoryBackend::new();
        backend.put(b"key", b"v1").unwrap();
        backend.put(b"key", b"v2").unwrap();

        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get(b"key").unwrap(), Some(b"v2".to_vec()));
    }

    #[test]
    fn test_delete_missing_key_is_ok() {
        let backend = MemoryBackend::new();
        backend.delete(b"missing").unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_prefix_iterator_empty_prefix_scans_all() {
        let backend = MemoryBackend::new();
        backend.put(b"a", b"1").unwrap();
        backend.put(b"b", b"2").unwrap();

        let items: Vec<_> = backend.prefix_iterator(b"").unwrap().collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_prefix_iterator_no_matches() {
        let backend = MemoryBackend::new();
        backend.put(b"abc", b"1").unwrap();

        let items: Vec<_> = backend.prefix_iterator(b"xyz").unwrap().collect();
        assert!(items.is_empty());
    }

    #[test]
    fn test_prefix_does_not_leak_past_prefix() {
        let backend = MemoryBackend::new();
        backend.put(b"ab", b"1").unwrap();
        backend.put(b"ac", b"2").unwrap();

        let items: Vec<_> = backend.prefix_iterator(b"ab").unwrap().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].0, b"ab");
    }
}
