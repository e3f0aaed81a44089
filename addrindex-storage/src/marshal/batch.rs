//! Batch checkpoint codec.
//!
//! Keys are `pad(from,10) ‖ pad(to,10) ‖ step(1) ‖ decimal(created_at)`.
//! The two padded block numbers and the step byte are fixed-width, so
//! records sort by numeric `from`, then `to`, then `step` as long as the
//! numbers stay below 10^10. The trailing `created_at` is variable-width
//! decimal text: it only distinguishes records sharing the same range
//! and step, it does not sort numerically.
//!
//! Values are `updated_at(4) ‖ magnitude(current)`; the empty magnitude
//! means the pass has not started.

use addrindex_core::U256;

use super::{
    marshal_magnitude, marshal_time, parse_decimal, take, unmarshal_magnitude, unmarshal_time,
    MarshalError, BATCH_KEY_MIN_LEN, BLOCK_NUMBER_PAD_LEN, TIMESTAMP_LEN,
};

/// Left-pad a block number with ASCII zeros to 10 characters.
///
/// Numbers of 10 or more digits pass through unchanged; keys built from
/// them no longer sort correctly against padded ones. That is a hard
/// limit of the scheme at 10^10, far beyond realistic block heights.
pub fn pad_block_number(number: u64) -> String {
    format!("{:010}", number)
}

/// Build a batch checkpoint key.
pub fn marshal_batch_key(from: u64, to: u64, step: u8, created_at: u64) -> Vec<u8> {
    let created = created_at.to_string();
    let mut key = Vec::with_capacity(BATCH_KEY_MIN_LEN + created.len());
    key.extend_from_slice(pad_block_number(from).as_bytes());
    key.extend_from_slice(pad_block_number(to).as_bytes());
    key.push(step);
    key.extend_from_slice(created.as_bytes());
    key
}

/// Key prefix covering every checkpoint starting at `from`.
pub fn batch_key_prefix_from(from: u64) -> Vec<u8> {
    pad_block_number(from).into_bytes()
}

/// Decode a batch checkpoint key into `(from, to, step, created_at)`.
pub fn unmarshal_batch_key(key: &[u8]) -> Result<(u64, u64, u8, u64), MarshalError> {
    if key.len() < BATCH_KEY_MIN_LEN {
        return Err(MarshalError::Malformed(
            "batch key",
            format!("expected at least {} bytes, got {}", BATCH_KEY_MIN_LEN, key.len()),
        ));
    }
    let from = parse_decimal(
        take(key, 0, BLOCK_NUMBER_PAD_LEN, "batch key")?,
        "batch key from",
    )?;
    let to = parse_decimal(
        take(key, BLOCK_NUMBER_PAD_LEN, BLOCK_NUMBER_PAD_LEN, "batch key")?,
        "batch key to",
    )?;
    let step = key[2 * BLOCK_NUMBER_PAD_LEN];
    let created_at = parse_decimal(&key[BATCH_KEY_MIN_LEN..], "batch key created_at")?;
    Ok((from, to, step, created_at))
}

/// Build a batch checkpoint value.
pub fn marshal_batch_value(
    updated_at: u64,
    current: Option<&U256>,
) -> Result<Vec<u8>, MarshalError> {
    let mut out = Vec::with_capacity(TIMESTAMP_LEN + 8);
    out.extend_from_slice(&marshal_time(updated_at)?);
    if let Some(current) = current {
        out.extend_from_slice(&marshal_magnitude(current));
    }
    Ok(out)
}

/// Decode a batch checkpoint value into `(updated_at, current)`.
///
/// `None` for `current` means the pass has not started; a pass whose
/// last processed block is 0 encodes identically.
pub fn unmarshal_batch_value(bytes: &[u8]) -> Result<(u64, Option<U256>), MarshalError> {
    if bytes.len() < TIMESTAMP_LEN {
        return Err(MarshalError::Malformed(
            "batch value",
            format!("expected at least {} bytes, got {}", TIMESTAMP_LEN, bytes.len()),
        ));
    }
    let time_bytes: [u8; TIMESTAMP_LEN] = take(bytes, 0, TIMESTAMP_LEN, "batch value")?
        .try_into()
        .expect("length checked");
    let updated_at = unmarshal_time(&time_bytes);

    let magnitude = &bytes[TIMESTAMP_LEN..];
    let current = if magnitude.is_empty() {
        None
    } else {
        Some(unmarshal_magnitude(magnitude)?)
    };
    Ok((updated_at, current))
}
