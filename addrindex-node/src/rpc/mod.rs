//! JSON-RPC server.

pub mod account;
pub mod batch;
pub mod block;

use std::net::SocketAddr;
use std::sync::Arc;

use jsonrpsee::server::{ServerBuilder, ServerHandle};
use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;

use addrindex_storage::{AddressIndexStore, BatchStatusStore, BlockIndexStore, KvBackend};

/// Rows returned per page when the caller does not say otherwise.
pub const DEFAULT_ROWS: usize = 10;

/// Page offset when the caller does not say otherwise.
pub const DEFAULT_START: usize = 0;

/// Shared state for RPC handlers: one store per index database.
pub struct RpcState<B: KvBackend> {
    /// Address→transactions store.
    pub addresses: AddressIndexStore<B>,

    /// Block→addresses store.
    pub blocks: BlockIndexStore<B>,

    /// Scan checkpoint store.
    pub batches: BatchStatusStore<B>,
}

impl<B: KvBackend> RpcState<B> {
    /// Create new RPC state.
    pub fn new(
        addresses: AddressIndexStore<B>,
        blocks: BlockIndexStore<B>,
        batches: BatchStatusStore<B>,
    ) -> Self {
        Self {
            addresses,
            blocks,
            batches,
        }
    }
}

/// Parse an integer query parameter, substituting the default when the
/// parameter is missing or fails to parse.
///
/// The silent substitution is deliberate and mirrors what clients of the
/// original service rely on: a bad `rows` or `start` degrades to the
/// default page, it never turns into an error.
pub fn parse_int_with_default(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Map a parse failure on a caller-supplied value to an invalid-params
/// error.
pub(crate) fn invalid_params(e: impl std::fmt::Display) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(-32602, e.to_string(), None::<()>)
}

/// Map a storage failure to an internal error.
pub(crate) fn internal_error(e: impl std::fmt::Display) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(-32603, e.to_string(), None::<()>)
}

/// Build the complete RPC module with all methods.
pub fn build_rpc_module<B: KvBackend + 'static>(
    state: Arc<RpcState<B>>,
) -> RpcModule<Arc<RpcState<B>>> {
    let mut module = RpcModule::new(state);

    account::register_methods(&mut module);
    block::register_methods(&mut module);
    batch::register_methods(&mut module);

    module
}

/// RPC server handle with local address.
pub struct RpcServerHandle {
    handle: ServerHandle,
    local_addr: SocketAddr,
}

impl RpcServerHandle {
    /// The local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the server.
    pub fn stop(&self) -> Result<(), anyhow::Error> {
        self.handle
            .stop()
            .map_err(|e| anyhow::anyhow!("failed to stop server: {:?}", e))
    }
}

/// Start the JSON-RPC server.
pub async fn start_rpc_server<B: KvBackend + 'static>(
    addr: SocketAddr,
    state: Arc<RpcState<B>>,
) -> anyhow::Result<RpcServerHandle> {
    let server = ServerBuilder::default().build(addr).await?;
    let local_addr = server.local_addr()?;

    let module = build_rpc_module(state);

    tracing::info!("Starting JSON-RPC server on {}", local_addr);

    let handle = server.start(module);

    Ok(RpcServerHandle { handle, local_addr })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_with_default() {
        assert_eq!(parse_int_with_default(Some("25"), 10), 25);
        assert_eq!(parse_int_with_default(Some("0"), 10), 0);

        // Missing and unparsable both degrade to the default, silently
        assert_eq!(parse_int_with_default(None, 10), 10);
        assert_eq!(parse_int_with_default(Some(""), 10), 10);
        assert_eq!(parse_int_with_default(Some("ten"), 10), 10);
        assert_eq!(parse_int_with_default(Some("-5"), 10), 10);
        assert_eq!(parse_int_with_default(Some("2.5"), 10), 10);
    }
}
