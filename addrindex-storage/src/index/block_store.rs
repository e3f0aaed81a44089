//! The block→addresses index store.

use std::sync::Arc;

use addrindex_core::BlockIndex;

use super::paginate;
use crate::error::StorageError;
use crate::kv::KvBackend;
use crate::marshal::{
    marshal_block_key, marshal_block_value, unmarshal_block_key, unmarshal_block_value,
    BlockKeyFormat, MarshalError,
};

/// Block index store: one record per indexed block.
///
/// The key format is fixed at construction and must match what the
/// database was written with. With padded keys a full listing walks
/// blocks in numeric order and lookups are exact; with legacy unpadded
/// keys the store additionally honors digit-prefix queries, which is the
/// only query shape that format can answer meaningfully.
pub struct BlockIndexStore<B: KvBackend> {
    backend: Arc<B>,
    format: BlockKeyFormat,
}

impl<B: KvBackend> BlockIndexStore<B> {
    /// Create a store writing padded keys.
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_format(backend, BlockKeyFormat::default())
    }

    /// Create a store with an explicit key format.
    pub fn with_format(backend: Arc<B>, format: BlockKeyFormat) -> Self {
        Self { backend, format }
    }

    /// The key format this store reads and writes.
    pub fn format(&self) -> BlockKeyFormat {
        self.format
    }

    /// Persist the record for one block.
    pub fn put(&self, number: u64, index: &BlockIndex) -> Result<(), StorageError> {
        let key = marshal_block_key(number, self.format);
        let value = marshal_block_value(index)?;
        self.backend.put(&key, &value)
    }

    /// Fetch the record for one block.
    pub fn get(&self, number: u64) -> Result<Option<BlockIndex>, StorageError> {
        let key = marshal_block_key(number, self.format);
        match self.backend.get(&key)? {
            Some(bytes) => Ok(Some(unmarshal_block_value(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Query blocks: total match count plus the requested page.
    ///
    /// `filter` of `None` (or empty) lists everything. A non-empty
    /// filter must be decimal digits; in padded format it is an exact
    /// block number, in legacy format it is a digit byte-prefix (the
    /// reference behavior: "12" matches 12, 120, 1234...).
    pub fn blocks(
        &self,
        filter: Option<&str>,
        rows: usize,
        start: usize,
    ) -> Result<(usize, Vec<(u64, BlockIndex)>), StorageError> {
        match filter.filter(|f| !f.is_empty()) {
            None => {
                let iter = self.backend.prefix_iterator(&[])?;
                paginate(iter, rows, start, |(key, value)| decode_block(&key, &value))
            }
            Some(digits) => {
                let number =
                    unmarshal_block_key(digits.as_bytes()).map_err(|_| invalid_filter(digits))?;
                match self.format {
                    BlockKeyFormat::Padded => {
                        let mut page = Vec::new();
                        let total = match self.get(number)? {
                            Some(index) => {
                                if start == 0 && rows > 0 {
                                    page.push((number, index));
                                }
                                1
                            }
                            None => 0,
                        };
                        Ok((total, page))
                    }
                    BlockKeyFormat::LegacyUnpadded => {
                        let iter = self.backend.prefix_iterator(digits.as_bytes())?;
                        paginate(iter, rows, start, |(key, value)| decode_block(&key, &value))
                    }
                }
            }
        }
    }
}

fn decode_block(key: &[u8], value: &[u8]) -> Result<(u64, BlockIndex), StorageError> {
    let number = unmarshal_block_key(key)?;
    let index = unmarshal_block_value(value)?;
    Ok((number, index))
}

fn invalid_filter(digits: &str) -> StorageError {
    MarshalError::Malformed("block filter", format!("{:?} is not a block number", digits)).into()
}
