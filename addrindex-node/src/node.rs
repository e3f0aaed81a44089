//! Node orchestrator.
//!
//! Opens the three index databases, wires the stores into RPC state and
//! runs the JSON-RPC server until a shutdown signal arrives.

use std::sync::Arc;

use addrindex_storage::{
    AddressIndexStore, BatchStatusStore, BlockIndexStore, RocksBackend,
};

use crate::config::NodeConfig;
use crate::rpc::{self, RpcState};
use crate::shutdown::wait_for_shutdown_signal;

/// Database directory names under the data directory. Each store owns
/// its database exclusively; the codec keys carry no store prefix.
const ADDRESS_DB: &str = "addresses.db";
const BLOCK_DB: &str = "blocks.db";
const BATCH_DB: &str = "batches.db";

/// The main node structure.
pub struct Node {
    config: NodeConfig,
    state: Arc<RpcState<RocksBackend>>,
}

impl Node {
    /// Create a new node with the given configuration.
    pub fn new(config: NodeConfig) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        tracing::info!("Data directory: {:?}", config.data_dir);

        let addresses = Arc::new(RocksBackend::open(config.data_dir.join(ADDRESS_DB))?);
        let blocks = Arc::new(RocksBackend::open(config.data_dir.join(BLOCK_DB))?);
        let batches = Arc::new(RocksBackend::open(config.data_dir.join(BATCH_DB))?);

        let state = Arc::new(RpcState::new(
            AddressIndexStore::new(addresses),
            BlockIndexStore::with_format(blocks, config.block_key_format),
            BatchStatusStore::new(batches),
        ));

        Ok(Self { config, state })
    }

    /// Run the node until a shutdown signal arrives.
    pub async fn run(&self) -> anyhow::Result<()> {
        tracing::info!("Starting addrindex node...");
        tracing::info!("  RPC address: {}", self.config.rpc_addr);
        tracing::info!("  Block key format: {:?}", self.config.block_key_format);

        let rpc_handle = rpc::start_rpc_server(self.config.rpc_addr, self.state.clone()).await?;

        tracing::info!("RPC server listening on {}", rpc_handle.local_addr());

        wait_for_shutdown_signal().await;

        rpc_handle.stop()?;
        tracing::info!("Shutdown complete");

        Ok(())
    }

    /// The RPC state, for embedding and tests.
    pub fn state(&self) -> Arc<RpcState<RocksBackend>> {
        self.state.clone()
    }
}
