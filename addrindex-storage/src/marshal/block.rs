//! Block index codec.
//!
//! Keys are the decimal digits of the block number. Two formats exist:
//! the default zero-pads to 10 digits so byte order equals numeric order;
//! the legacy format writes the digits unpadded, bit-exact with stores
//! produced before padding was introduced. Under the legacy format "9"
//! sorts after "10", so numeric range scans are only correct with the
//! padded format.
//!
//! Values are `created_at(4) ‖ time(4)` followed by one 21-byte
//! `address ‖ sequence` group per touched address, in insertion order.

use addrindex_core::{Address, AddressSequence, BlockIndex};

use super::{
    batch::pad_block_number, marshal_time, parse_decimal, take, unmarshal_time, MarshalError,
    ADDRESS_LEN, ADDRESS_SEQ_LEN, BLOCK_VALUE_HEADER_LEN, TIMESTAMP_LEN,
};

/// How block numbers are laid out as keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockKeyFormat {
    /// Zero-padded 10-digit decimal; byte order equals numeric order.
    #[default]
    Padded,
    /// Raw unpadded decimal digits. Kept for interop with existing
    /// stores; does not sort numerically under byte comparison.
    LegacyUnpadded,
}

/// Build a block index key.
pub fn marshal_block_key(number: u64, format: BlockKeyFormat) -> Vec<u8> {
    match format {
        BlockKeyFormat::Padded => pad_block_number(number).into_bytes(),
        BlockKeyFormat::LegacyUnpadded => number.to_string().into_bytes(),
    }
}

/// Parse a block index key back to its block number.
///
/// Accepts both the padded and the legacy unpadded form.
pub fn unmarshal_block_key(key: &[u8]) -> Result<u64, MarshalError> {
    parse_decimal(key, "block key")
}

/// Build a block index value.
///
/// The timestamps are mandatory by construction; a value that does not
/// fit the 4-byte encoding is an `InvariantViolated` error and nothing
/// is written.
pub fn marshal_block_value(index: &BlockIndex) -> Result<Vec<u8>, MarshalError> {
    let mut out =
        Vec::with_capacity(BLOCK_VALUE_HEADER_LEN + index.addresses.len() * ADDRESS_SEQ_LEN);
    out.extend_from_slice(&marshal_time(index.created_at)?);
    out.extend_from_slice(&marshal_time(index.time)?);
    for entry in &index.addresses {
        out.extend_from_slice(&entry.address);
        out.push(entry.sequence);
    }
    Ok(out)
}

/// Decode a block index value.
///
/// The input length must be exactly `8 + 21*n` for some `n >= 0`;
/// anything else is malformed and nothing partial is returned.
pub fn unmarshal_block_value(bytes: &[u8]) -> Result<BlockIndex, MarshalError> {
    if bytes.len() < BLOCK_VALUE_HEADER_LEN
        || (bytes.len() - BLOCK_VALUE_HEADER_LEN) % ADDRESS_SEQ_LEN != 0
    {
        return Err(MarshalError::Malformed(
            "block value",
            format!(
                "length {} is not {} + {}*n",
                bytes.len(),
                BLOCK_VALUE_HEADER_LEN,
                ADDRESS_SEQ_LEN
            ),
        ));
    }

    let created_bytes: [u8; TIMESTAMP_LEN] = take(bytes, 0, TIMESTAMP_LEN, "block value")?
        .try_into()
        .expect("length checked");
    let time_bytes: [u8; TIMESTAMP_LEN] = take(bytes, TIMESTAMP_LEN, TIMESTAMP_LEN, "block value")?
        .try_into()
        .expect("length checked");

    let group_count = (bytes.len() - BLOCK_VALUE_HEADER_LEN) / ADDRESS_SEQ_LEN;
    let mut addresses = Vec::with_capacity(group_count);
    for i in 0..group_count {
        let offset = BLOCK_VALUE_HEADER_LEN + i * ADDRESS_SEQ_LEN;
        let address: Address = take(bytes, offset, ADDRESS_LEN, "block value")?
            .try_into()
            .expect("length checked");
        let sequence = bytes[offset + ADDRESS_LEN];
        addresses.push(AddressSequence { address, sequence });
    }

    Ok(BlockIndex {
        created_at: unmarshal_time(&created_bytes),
        time: unmarshal_time(&time_bytes),
        addresses,
    })
}
