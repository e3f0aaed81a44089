//! Address and transaction-hash primitives.
//!
//! Addresses and hashes travel through the API as `0x`-prefixed hex
//! strings but are stored and compared as raw byte arrays. Parsing
//! happens once at the boundary; everything below it works on bytes.

use crate::error::ParseError;

/// A 20-byte account address.
pub type Address = [u8; 20];

/// A 32-byte transaction hash.
pub type TxHash = [u8; 32];

/// Parse a 20-byte address from a hex string (with or without `0x`).
pub fn parse_address(s: &str) -> Result<Address, ParseError> {
    let bytes = decode_hex(s)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ParseError::InvalidLength {
            expected: 20,
            got: bytes.len(),
        })
}

/// Parse a 32-byte transaction hash from a hex string (with or without `0x`).
pub fn parse_tx_hash(s: &str) -> Result<TxHash, ParseError> {
    let bytes = decode_hex(s)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ParseError::InvalidLength {
            expected: 32,
            got: bytes.len(),
        })
}

/// Format an address as a `0x`-prefixed lowercase hex string.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Format a transaction hash as a `0x`-prefixed lowercase hex string.
pub fn format_tx_hash(hash: &TxHash) -> String {
    format!("0x{}", hex::encode(hash))
}

fn decode_hex(s: &str) -> Result<Vec<u8>, ParseError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|_| ParseError::InvalidHex)
}
