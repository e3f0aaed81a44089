//! Storage error types.

use thiserror::Error;

use crate::marshal::MarshalError;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A codec rejected the bytes or the record.
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// RocksDB error.
    #[error("rocksdb error: {0}")]
    RocksDb(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rocksdb::Error> for StorageError {
    fn from(e: rocksdb::Error) -> Self {
        StorageError::RocksDb(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marshal_error_passes_through() {
        let inner = MarshalError::Malformed("address key", "expected 25 bytes, got 3".into());
        let err: StorageError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }
}
