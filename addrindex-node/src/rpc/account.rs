//! Account query RPC methods.

use std::sync::Arc;

use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;
use serde::{Deserialize, Serialize};

use addrindex_core::{format_address, format_tx_hash, parse_address, AddressIndex};
use addrindex_storage::KvBackend;

use super::{
    internal_error, invalid_params, parse_int_with_default, RpcState, DEFAULT_ROWS, DEFAULT_START,
};

/// One indexed transaction, as returned by RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub address: String,
    pub time: u64,
    pub sequence: u8,
    pub tx_hash: String,
    pub couple_address: String,
    pub value: String,
}

impl From<&AddressIndex> for TransactionEntry {
    fn from(entry: &AddressIndex) -> Self {
        Self {
            address: format_address(&entry.address),
            time: entry.time,
            sequence: entry.sequence,
            tx_hash: format_tx_hash(&entry.tx_hash),
            couple_address: format_address(&entry.couple_address),
            value: entry.value.to_string(),
        }
    }
}

/// A page of transactions for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTransactions {
    pub total: usize,
    pub start: usize,
    pub indexes: Vec<TransactionEntry>,
}

#[derive(Debug, Deserialize)]
struct AccountParams {
    account: String,
    rows: Option<String>,
    start: Option<String>,
}

/// Register account RPC methods.
pub fn register_methods<B: KvBackend + 'static>(module: &mut RpcModule<Arc<RpcState<B>>>) {
    module
        .register_async_method("getTransactionsByAccount", |params, state, _| async move {
            let p: AccountParams = params.parse()?;
            let address = parse_address(&p.account).map_err(invalid_params)?;
            let rows = parse_int_with_default(p.rows.as_deref(), DEFAULT_ROWS);
            let start = parse_int_with_default(p.start.as_deref(), DEFAULT_START);

            tracing::debug!("transactions query for account {}", p.account);

            let (total, entries) = state
                .addresses
                .transactions_by_address(&address, rows, start)
                .map_err(internal_error)?;

            Ok::<_, ErrorObjectOwned>(AccountTransactions {
                total,
                start,
                indexes: entries.iter().map(TransactionEntry::from).collect(),
            })
        })
        .unwrap();
}
