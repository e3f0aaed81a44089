//! Node configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use addrindex_storage::BlockKeyFormat;

use crate::cli::Cli;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Data directory holding the three index databases.
    pub data_dir: PathBuf,

    /// RPC listen address.
    pub rpc_addr: SocketAddr,

    /// Block key format the block database was written with.
    pub block_key_format: BlockKeyFormat,

    /// Log level.
    pub log_level: String,
}

impl NodeConfig {
    /// Create a node configuration from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let block_key_format = if cli.legacy_block_keys {
            BlockKeyFormat::LegacyUnpadded
        } else {
            BlockKeyFormat::Padded
        };

        Self {
            data_dir: cli.expanded_data_dir(),
            rpc_addr: cli.rpc_listen,
            block_key_format,
            log_level: cli.log_level.clone(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("~/.addrindex"),
            rpc_addr: "127.0.0.1:3000".parse().unwrap(),
            block_key_format: BlockKeyFormat::Padded,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.rpc_addr.port(), 3000);
        assert_eq!(config.block_key_format, BlockKeyFormat::Padded);
    }

    #[test]
    fn test_legacy_flag_selects_format() {
        let cli = Cli::parse_from(["addrindex-node", "--legacy-block-keys"]);
        let config = NodeConfig::from_cli(&cli);
        assert_eq!(config.block_key_format, BlockKeyFormat::LegacyUnpadded);
    }
}
