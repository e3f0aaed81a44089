//! RocksDB key-value backend for production use.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{Direction, IteratorMode, Options, DB};

use super::{BatchOp, KvBackend, KvIterator, WriteBatch};
use crate::error::StorageError;

/// RocksDB-based backend.
///
/// Keys iterate in byte order natively, which is exactly what the codec
/// layouts are built against. One database per index store; the stores
/// use unprefixed keys and must not share a database.
pub struct RocksBackend {
    db: Arc<DB>,
}

impl RocksBackend {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);

        // Index writes arrive in bursts while a scan pass runs
        opts.set_write_buffer_size(64 * 1024 * 1024);
        opts.set_max_write_buffer_number(3);
        opts.set_level_compaction_dynamic_level_bytes(true);

        let db = DB::open(&opts, path)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Open a database with custom options.
    pub fn open_with_opts<P: AsRef<Path>>(path: P, opts: Options) -> Result<Self, StorageError> {
        let db = DB::open(&opts, path)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Estimated number of keys in the database.
    pub fn estimate_num_keys(&self) -> Option<u64> {
        self.db
            .property_int_value("rocksdb.estimate-num-keys")
            .ok()
            .flatten()
    }
}

impl KvBackend for RocksBackend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.db.get(key)?)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.db.put(key, value)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        self.db.delete(key)?;
        Ok(())
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<(), StorageError> {
        let mut rocks_batch = rocksdb::WriteBatch::default();
        for op in batch.into_ops() {
            match op {
                BatchOp::Put { key, value } => rocks_batch.put(&key, &value),
                BatchOp::Delete { key } => rocks_batch.delete(&key),
            }
        }
        self.db.write(rocks_batch)?;
        Ok(())
    }

    fn prefix_iterator(&self, prefix: &[u8]) -> Result<KvIterator<'_>, StorageError> {
        let prefix_owned = prefix.to_vec();
        let iter = self
            .db
            .iterator(IteratorMode::From(prefix, Direction::Forward))
            .filter_map(|result| result.ok())
            .map(|(k, v)| (k.to_vec(), v.to_vec()))
            .take_while(move |(k, _)| k.starts_with(&prefix_owned));
        Ok(Box::new(iter))
    }

    fn iterator_from(&self, start: &[u8]) -> Result<KvIterator<'_>, StorageError> {
        let iter = self
            .db
            .iterator(IteratorMode::From(start, Direction::Forward))
            .filter_map(|result| result.ok())
            .map(|(k, v)| (k.to_vec(), v.to_vec()));
        Ok(Box::new(iter))
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_backend() -> (RocksBackend, TempDir) {
        let dir = TempDir::new().unwrap();
        let backend = RocksBackend::open(dir.path()).unwrap();
        (backend, dir)
    }

    #[test]
    fn test_basic_operations() {
        let (backend, _dir) = create_temp_backend();

        backend.put(b"key1", b"value1").unwrap();
        assert_eq!(backend.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert!(backend.exists(b"key1").unwrap());

        assert!(backend.get(b"nonexistent").unwrap().is_none());

        backend.delete(b"key1").unwrap();
        assert!(backend.get(b"key1").unwrap().is_none());
    }

    #[test]
    fn test_write_batch() {
        let (backend, _dir) = create_temp_backend();

        let mut batch = WriteBatch::new();
        batch.put(b"key1".to_vec(), b"value1".to_vec());
        batch.put(b"key2".to_vec(), b"value2".to_vec());
        batch.delete(b"key3".to_vec()); // deleting a missing key is fine

        backend.write_batch(batch).unwrap();

        assert_eq!(backend.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(backend.get(b"key2").unwrap(), Some(b"value2".to_vec()));
    }

    #[test]
    fn test_prefix_iterator_is_ordered() {
        let (backend, _dir) = create_temp_backend();

        backend.put(b"prefix:c", b"3").unwrap();
        backend.put(b"prefix:a", b"1").unwrap();
        backend.put(b"prefix:b", b"2").unwrap();
        backend.put(b"other:x", b"4").unwrap();

        let items: Vec<_> = backend.prefix_iterator(b"prefix:").unwrap().collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].0, b"prefix:a");
        assert_eq!(items[1].0, b"prefix:b");
        assert_eq!(items[2].0, b"prefix:c");
    }

    #[test]
    fn test_iterator_from() {
        let (backend, _dir) = create_temp_backend();

        backend.put(b"a", b"1").unwrap();
        backend.put(b"b", b"2").unwrap();
        backend.put(b"c", b"3").unwrap();

        let items: Vec<_> = backend.iterator_from(b"b").unwrap().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].0, b"b");
    }

    #[test]
    fn test_persistence_across_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let backend = RocksBackend::open(dir.path()).unwrap();
            backend.put(b"persistent", b"data").unwrap();
            backend.flush().unwrap();
        }

        {
            let backend = RocksBackend::open(dir.path()).unwrap();
            assert_eq!(backend.get(b"persistent").unwrap(), Some(b"data".to_vec()));
        }
    }
}
