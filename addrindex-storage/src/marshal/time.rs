//! Fixed-width timestamp codec.
//!
//! Timestamps are stored as 4 big-endian bytes so that byte order equals
//! temporal order within the encodable range. Values that do not fit in
//! 32 bits are rejected rather than truncated: truncation would silently
//! produce mis-ordered keys once timestamps pass 2106.

use std::time::{SystemTime, UNIX_EPOCH};

use super::{MarshalError, TIMESTAMP_LEN};

/// Encode seconds-since-epoch as 4 big-endian bytes.
pub fn marshal_time(secs: u64) -> Result<[u8; TIMESTAMP_LEN], MarshalError> {
    let narrowed = u32::try_from(secs).map_err(|_| {
        MarshalError::InvariantViolated(format!("timestamp {} does not fit in 32 bits", secs))
    })?;
    Ok(narrowed.to_be_bytes())
}

/// Encode a [`SystemTime`]; identical output to [`marshal_time`].
pub fn marshal_system_time(t: SystemTime) -> Result<[u8; TIMESTAMP_LEN], MarshalError> {
    let secs = t
        .duration_since(UNIX_EPOCH)
        .map_err(|_| MarshalError::InvariantViolated("time predates the unix epoch".into()))?
        .as_secs();
    marshal_time(secs)
}

/// Decode 4 big-endian bytes to seconds-since-epoch.
///
/// Total over any 4-byte input; callers slice with validated lengths.
pub fn unmarshal_time(bytes: &[u8; TIMESTAMP_LEN]) -> u64 {
    u32::from_be_bytes(*bytes) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_roundtrip() {
        for secs in [0u64, 1, 1_700_000_000, u32::MAX as u64] {
            let encoded = marshal_time(secs).unwrap();
            assert_eq!(unmarshal_time(&encoded), secs);
        }
    }

    #[test]
    fn test_big_endian_layout() {
        let encoded = marshal_time(0x0102_0304).unwrap();
        assert_eq!(encoded, [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_encoding_preserves_order() {
        let earlier = marshal_time(1_000_000).unwrap();
        let later = marshal_time(1_000_001).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = marshal_time(u32::MAX as u64 + 1).unwrap_err();
        assert!(matches!(err, MarshalError::InvariantViolated(_)));
    }

    #[test]
    fn test_system_time_matches_seconds() {
        let secs = 1_700_000_000u64;
        let t = UNIX_EPOCH + Duration::from_secs(secs);
        assert_eq!(
            marshal_system_time(t).unwrap(),
            marshal_time(secs).unwrap()
        );
    }

    #[test]
    fn test_system_time_before_epoch_rejected() {
        let t = UNIX_EPOCH - Duration::from_secs(1);
        assert!(marshal_system_time(t).is_err());
    }
}
