//! Block query RPC methods.

use std::sync::Arc;

use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;
use serde::{Deserialize, Serialize};

use addrindex_core::{format_address, BlockIndex};
use addrindex_storage::KvBackend;

use super::{
    internal_error, invalid_params, parse_int_with_default, RpcState, DEFAULT_ROWS, DEFAULT_START,
};

/// One touched address within a block, as returned by RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressSequenceInfo {
    pub address: String,
    pub sequence: u8,
}

/// Block summary information returned by RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInfo {
    pub number: u64,
    pub created_at: u64,
    pub time: u64,
    pub addresses: Vec<AddressSequenceInfo>,
}

impl BlockInfo {
    fn new(number: u64, index: &BlockIndex) -> Self {
        Self {
            number,
            created_at: index.created_at,
            time: index.time,
            addresses: index
                .addresses
                .iter()
                .map(|a| AddressSequenceInfo {
                    address: format_address(&a.address),
                    sequence: a.sequence,
                })
                .collect(),
        }
    }
}

/// A page of block summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockPage {
    pub total: usize,
    pub start: usize,
    pub indexes: Vec<BlockInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlocksParams {
    block_number: Option<String>,
    rows: Option<String>,
    start: Option<String>,
}

/// Register block RPC methods.
pub fn register_methods<B: KvBackend + 'static>(module: &mut RpcModule<Arc<RpcState<B>>>) {
    module
        .register_async_method("getBlocks", |params, state, _| async move {
            // Every field is optional; calling with no params lists all blocks
            let p: BlocksParams = params.parse().unwrap_or_default();
            let rows = parse_int_with_default(p.rows.as_deref(), DEFAULT_ROWS);
            let start = parse_int_with_default(p.start.as_deref(), DEFAULT_START);

            // Reject a bad filter here so storage errors below can only
            // mean decode trouble on stored data
            if let Some(filter) = p.block_number.as_deref().filter(|f| !f.is_empty()) {
                filter
                    .parse::<u64>()
                    .map_err(|_| invalid_params(format!("invalid block number {:?}", filter)))?;
            }

            let (total, blocks) = state
                .blocks
                .blocks(p.block_number.as_deref(), rows, start)
                .map_err(internal_error)?;

            tracing::debug!("block query matched {} records", total);

            Ok::<_, ErrorObjectOwned>(BlockPage {
                total,
                start,
                indexes: blocks
                    .iter()
                    .map(|(number, index)| BlockInfo::new(*number, index))
                    .collect(),
            })
        })
        .unwrap();
}
