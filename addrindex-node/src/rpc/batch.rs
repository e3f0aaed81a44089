//! Scan status RPC methods.

use std::sync::Arc;

use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;
use serde::{Deserialize, Serialize};

use addrindex_core::BatchStatus;
use addrindex_storage::KvBackend;

use super::{internal_error, RpcState};

/// One scan checkpoint, as returned by RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStatusInfo {
    pub from: u64,
    pub to: u64,
    pub step: u8,
    pub created_at: u64,
    pub updated_at: u64,
    /// Last processed block as a decimal string; `None` when the pass
    /// has not started.
    pub current: Option<String>,
}

impl From<&BatchStatus> for BatchStatusInfo {
    fn from(status: &BatchStatus) -> Self {
        Self {
            from: status.from,
            to: status.to,
            step: status.step,
            created_at: status.created_at,
            updated_at: status.updated_at,
            current: status.current.as_ref().map(|c| c.to_string()),
        }
    }
}

/// Register scan status RPC methods.
pub fn register_methods<B: KvBackend + 'static>(module: &mut RpcModule<Arc<RpcState<B>>>) {
    module
        .register_async_method("getBatchStatuses", |_params, state, _| async move {
            let statuses = state.batches.all().map_err(internal_error)?;

            tracing::debug!("listing {} scan checkpoints", statuses.len());

            Ok::<_, ErrorObjectOwned>(
                statuses
                    .iter()
                    .map(BatchStatusInfo::from)
                    .collect::<Vec<_>>(),
            )
        })
        .unwrap();
}
