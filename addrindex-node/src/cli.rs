//! Command-line argument parsing.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// addrindex query node.
#[derive(Parser, Debug, Clone)]
#[command(name = "addrindex-node")]
#[command(about = "addrindex query node binary")]
#[command(version)]
pub struct Cli {
    /// Data directory for the index databases.
    #[arg(long, default_value = "~/.addrindex")]
    pub data_dir: PathBuf,

    /// RPC listen address.
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub rpc_listen: SocketAddr,

    /// Read and write legacy unpadded block keys (interop with databases
    /// written before padded keys; block listings will not be in numeric
    /// order).
    #[arg(long)]
    pub legacy_block_keys: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Expand the data directory path (handle ~ for home).
    pub fn expanded_data_dir(&self) -> PathBuf {
        let path_str = self.data_dir.to_string_lossy();
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        self.data_dir.clone()
    }
}
