//! Binary codecs for index keys and values.
//!
//! Every layout decision here (field order, width, padding) determines
//! whether byte-lexicographic comparison in the backend yields the
//! numeric/temporal ordering range scans depend on. All multi-byte
//! integers are big-endian; all fields that participate in ordering are
//! fixed-width.
//!
//! The codecs never swallow errors and never retry: encoding rejects
//! records that violate construction-time invariants before a single byte
//! is written, and decoding validates the available length before every
//! slice.

mod address;
mod batch;
mod block;
mod time;

pub use address::{
    address_key_prefix, address_key_sequence, address_time_key_prefix, marshal_address_key,
    marshal_address_value, unmarshal_address_key, unmarshal_address_value, AddressIndexValue,
};
pub use batch::{
    batch_key_prefix_from, marshal_batch_key, marshal_batch_value, pad_block_number,
    unmarshal_batch_key, unmarshal_batch_value,
};
pub use block::{
    marshal_block_key, marshal_block_value, unmarshal_block_key, unmarshal_block_value,
    BlockKeyFormat,
};
pub use time::{marshal_system_time, marshal_time, unmarshal_time};

use addrindex_core::U256;
use thiserror::Error;

/// Width of an encoded timestamp.
pub const TIMESTAMP_LEN: usize = 4;
/// Width of an account address.
pub const ADDRESS_LEN: usize = 20;
/// Width of a transaction hash.
pub const TX_HASH_LEN: usize = 32;
/// Width of a sequence disambiguator.
pub const SEQUENCE_LEN: usize = 1;
/// Width of one `address ‖ sequence` group in a block value.
pub const ADDRESS_SEQ_LEN: usize = ADDRESS_LEN + SEQUENCE_LEN;
/// Width of a full address index key.
pub const ADDRESS_KEY_LEN: usize = ADDRESS_LEN + TIMESTAMP_LEN + SEQUENCE_LEN;
/// Width of an `address ‖ time` key prefix.
pub const ADDRESS_TIME_PREFIX_LEN: usize = ADDRESS_LEN + TIMESTAMP_LEN;
/// Minimum width of an address index value (`tx_hash ‖ couple_address`).
pub const ADDRESS_VALUE_MIN_LEN: usize = TX_HASH_LEN + ADDRESS_LEN;
/// Width of the fixed header of a block value (`created_at ‖ time`).
pub const BLOCK_VALUE_HEADER_LEN: usize = 2 * TIMESTAMP_LEN;
/// Width a block number is zero-padded to in batch keys.
pub const BLOCK_NUMBER_PAD_LEN: usize = 10;
/// Minimum width of a batch key (`pad(from) ‖ pad(to) ‖ step`).
pub const BATCH_KEY_MIN_LEN: usize = 2 * BLOCK_NUMBER_PAD_LEN + 1;
/// Maximum width of a value magnitude (256 bits).
pub const MAGNITUDE_MAX_LEN: usize = 32;

/// Errors produced by the codec layer.
///
/// The two variants separate the recoverable decode case from the
/// construction-time bug: `Malformed` means the bytes handed to a decoder
/// do not match the layout and the caller should report the record;
/// `InvariantViolated` means an encoder was handed a record that should
/// never have been constructed, and the write path must abort rather than
/// persist corrupt bytes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MarshalError {
    /// Input bytes do not match the expected layout.
    #[error("malformed {0}: {1}")]
    Malformed(&'static str, String),

    /// A record violates a construction-time invariant.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

/// Encode a non-negative integer as its minimal big-endian magnitude.
///
/// Zero encodes as the empty byte string.
pub fn marshal_magnitude(value: &U256) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    match bytes.iter().position(|b| *b != 0) {
        Some(first) => bytes[first..].to_vec(),
        None => Vec::new(),
    }
}

/// Decode a minimal big-endian magnitude. The empty slice decodes to zero.
pub fn unmarshal_magnitude(bytes: &[u8]) -> Result<U256, MarshalError> {
    if bytes.len() > MAGNITUDE_MAX_LEN {
        return Err(MarshalError::Malformed(
            "magnitude",
            format!("{} bytes exceeds the 256-bit width", bytes.len()),
        ));
    }
    let mut padded = [0u8; MAGNITUDE_MAX_LEN];
    padded[MAGNITUDE_MAX_LEN - bytes.len()..].copy_from_slice(bytes);
    Ok(U256::from_be_bytes(&padded))
}

/// Parse a run of ASCII decimal digits into a u64.
pub(crate) fn parse_decimal(bytes: &[u8], what: &'static str) -> Result<u64, MarshalError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| MarshalError::Malformed(what, "not valid UTF-8".into()))?;
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MarshalError::Malformed(
            what,
            format!("{:?} is not a decimal number", text),
        ));
    }
    text.parse()
        .map_err(|_| MarshalError::Malformed(what, format!("{:?} does not fit in u64", text)))
}

/// Return `bytes[offset..offset + len]` after validating the available
/// length. Decoders go through this instead of slicing directly.
pub(crate) fn take<'a>(
    bytes: &'a [u8],
    offset: usize,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8], MarshalError> {
    let end = offset.checked_add(len).ok_or_else(|| {
        MarshalError::Malformed(what, format!("offset {} + len {} overflows", offset, len))
    })?;
    if bytes.len() < end {
        return Err(MarshalError::Malformed(
            what,
            format!("need {} bytes at offset {}, have {}", len, offset, bytes.len()),
        ));
    }
    Ok(&bytes[offset..end])
}
