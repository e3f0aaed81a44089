//! addrindex query node binary.
//!
//! Serves the read/status API over index databases produced by the
//! scanning workers.

use tracing_subscriber::EnvFilter;

use addrindex_node::cli::Cli;
use addrindex_node::config::NodeConfig;
use addrindex_node::node::Node;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    // Set up logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    tracing::info!("addrindex node v{}", env!("CARGO_PKG_VERSION"));

    let config = NodeConfig::from_cli(&cli);

    let node = Node::new(config)?;
    node.run().await?;

    Ok(())
}
