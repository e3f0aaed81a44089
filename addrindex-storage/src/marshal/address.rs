//! Address index codec.
//!
//! Keys are `address(20) ‖ time(4) ‖ sequence(1)`. Every field is
//! fixed-width and the timestamp encoding is order-preserving, so byte
//! order of keys equals ordering by (address, time, sequence) and prefix
//! scans answer "all entries for this address (at this time)".
//!
//! Values are `tx_hash(32) ‖ couple_address(20) ‖ magnitude(value)`; the
//! trailing magnitude is everything after the two fixed fields, with the
//! empty magnitude meaning a zero value.

use addrindex_core::{Address, TxHash, U256};

use super::{
    marshal_magnitude, marshal_time, take, unmarshal_magnitude, unmarshal_time, MarshalError,
    ADDRESS_KEY_LEN, ADDRESS_LEN, ADDRESS_TIME_PREFIX_LEN, ADDRESS_VALUE_MIN_LEN, TIMESTAMP_LEN,
    TX_HASH_LEN,
};

/// The decoded value portion of an address index entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressIndexValue {
    /// Hash of the transaction.
    pub tx_hash: TxHash,
    /// The counterparty address.
    pub couple_address: Address,
    /// Transferred amount.
    pub value: U256,
}

/// Build a full 25-byte address index key.
pub fn marshal_address_key(
    address: &Address,
    time: u64,
    sequence: u8,
) -> Result<Vec<u8>, MarshalError> {
    let mut key = address_time_key_prefix(address, time)?;
    key.push(sequence);
    Ok(key)
}

/// Key prefix covering every entry for an address.
pub fn address_key_prefix(address: &Address) -> Vec<u8> {
    address.to_vec()
}

/// Key prefix covering every entry for an address at one time.
pub fn address_time_key_prefix(address: &Address, time: u64) -> Result<Vec<u8>, MarshalError> {
    let mut prefix = Vec::with_capacity(ADDRESS_TIME_PREFIX_LEN);
    prefix.extend_from_slice(address);
    prefix.extend_from_slice(&marshal_time(time)?);
    Ok(prefix)
}

/// Decode an address index key into its address and time.
///
/// The trailing sequence byte is not part of the decoded tuple; callers
/// that need it use [`address_key_sequence`].
pub fn unmarshal_address_key(key: &[u8]) -> Result<(Address, u64), MarshalError> {
    if key.len() != ADDRESS_KEY_LEN {
        return Err(MarshalError::Malformed(
            "address key",
            format!("expected {} bytes, got {}", ADDRESS_KEY_LEN, key.len()),
        ));
    }
    let address: Address = take(key, 0, ADDRESS_LEN, "address key")?
        .try_into()
        .expect("length checked");
    let time_bytes: [u8; TIMESTAMP_LEN] = take(key, ADDRESS_LEN, TIMESTAMP_LEN, "address key")?
        .try_into()
        .expect("length checked");
    Ok((address, unmarshal_time(&time_bytes)))
}

/// Read the sequence disambiguator from an address index key.
pub fn address_key_sequence(key: &[u8]) -> Result<u8, MarshalError> {
    if key.len() != ADDRESS_KEY_LEN {
        return Err(MarshalError::Malformed(
            "address key",
            format!("expected {} bytes, got {}", ADDRESS_KEY_LEN, key.len()),
        ));
    }
    Ok(key[ADDRESS_KEY_LEN - 1])
}

/// Build an address index value.
pub fn marshal_address_value(tx_hash: &TxHash, couple_address: &Address, value: &U256) -> Vec<u8> {
    let magnitude = marshal_magnitude(value);
    let mut out = Vec::with_capacity(ADDRESS_VALUE_MIN_LEN + magnitude.len());
    out.extend_from_slice(tx_hash);
    out.extend_from_slice(couple_address);
    out.extend_from_slice(&magnitude);
    out
}

/// Decode an address index value.
///
/// Anything shorter than the two fixed fields is malformed; an empty
/// trailing magnitude decodes to a zero value.
pub fn unmarshal_address_value(bytes: &[u8]) -> Result<AddressIndexValue, MarshalError> {
    if bytes.len() < ADDRESS_VALUE_MIN_LEN {
        return Err(MarshalError::Malformed(
            "address value",
            format!(
                "expected at least {} bytes, got {}",
                ADDRESS_VALUE_MIN_LEN,
                bytes.len()
            ),
        ));
    }
    let tx_hash: TxHash = take(bytes, 0, TX_HASH_LEN, "address value")?
        .try_into()
        .expect("length checked");
    let couple_address: Address = take(bytes, TX_HASH_LEN, ADDRESS_LEN, "address value")?
        .try_into()
        .expect("length checked");
    let value = unmarshal_magnitude(&bytes[ADDRESS_VALUE_MIN_LEN..])?;
    Ok(AddressIndexValue {
        tx_hash,
        couple_address,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_A: Address = [0x0au8; 20];
    const ADDR_B: Address = [0x0bu8; 20];

    #[test]
    fn test_key_layout() {
        let key = marshal_address_key(&ADDR_A, 0x0102_0304, 7).unwrap();
        assert_eq!(key.len(), ADDRESS_KEY_LEN);
        assert_eq!(&key[..20], &ADDR_A);
        assert_eq!(&key[20..24], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(key[24], 7);
    }

    #[test]
    fn test_key_roundtrip() {
        let key = marshal_address_key(&ADDR_A, 1_700_000_000, 255).unwrap();
        let (address, time) = unmarshal_address_key(&key).unwrap();
        assert_eq!(address, ADDR_A);
        assert_eq!(time, 1_700_000_000);
        assert_eq!(address_key_sequence(&key).unwrap(), 255);
    }

    #[test]
    fn test_key_ordering_by_address() {
        // A < B bytewise, so every A key sorts before every B key
        let a = marshal_address_key(&ADDR_A, u32::MAX as u64, 255).unwrap();
        let b = marshal_address_key(&ADDR_B, 0, 0).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_key_ordering_by_time() {
        let earlier = marshal_address_key(&ADDR_A, 1_000, 255).unwrap();
        let later = marshal_address_key(&ADDR_A, 1_001, 0).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_key_ordering_by_sequence() {
        let first = marshal_address_key(&ADDR_A, 1_000, 1).unwrap();
        let second = marshal_address_key(&ADDR_A, 1_000, 2).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_prefixes_are_key_prefixes() {
        let key = marshal_address_key(&ADDR_A, 1_700_000_000, 9).unwrap();
        let by_address = address_key_prefix(&ADDR_A);
        let by_address_time = address_time_key_prefix(&ADDR_A, 1_700_000_000).unwrap();

        assert_eq!(by_address.len(), ADDRESS_LEN);
        assert_eq!(by_address_time.len(), ADDRESS_TIME_PREFIX_LEN);
        assert!(key.starts_with(&by_address));
        assert!(key.starts_with(&by_address_time));
    }

    #[test]
    fn test_key_rejects_wrong_length() {
        let err = unmarshal_address_key(&[0u8; 24]).unwrap_err();
        assert!(matches!(err, MarshalError::Malformed("address key", _)));
        assert!(address_key_sequence(&[0u8; 26]).is_err());
    }

    #[test]
    fn test_key_rejects_out_of_range_time() {
        let err = marshal_address_key(&ADDR_A, u64::MAX, 0).unwrap_err();
        assert!(matches!(err, MarshalError::InvariantViolated(_)));
    }

    #[test]
    fn test_value_roundtrip() {
        let tx_hash = [0x77u8; 32];
        let value = U256::from(1_234_567_890u64);
        let bytes = marshal_address_value(&tx_hash, &ADDR_B, &value);
        let decoded = unmarshal_address_value(&bytes).unwrap();

        assert_eq!(decoded.tx_hash, tx_hash);
        assert_eq!(decoded.couple_address, ADDR_B);
        assert_eq!(decoded.value, value);
    }

    #[test]
    fn test_zero_value_is_exactly_52_bytes() {
        let bytes = marshal_address_value(&[0x77u8; 32], &ADDR_B, &U256::zero());
        assert_eq!(bytes.len(), ADDRESS_VALUE_MIN_LEN);

        let decoded = unmarshal_address_value(&bytes).unwrap();
        assert_eq!(decoded.value, U256::zero());
    }

    #[test]
    fn test_value_rejects_short_input() {
        let err = unmarshal_address_value(&[0u8; 51]).unwrap_err();
        assert!(matches!(err, MarshalError::Malformed("address value", _)));
    }

    #[test]
    fn test_value_rejects_overwide_magnitude() {
        let mut bytes = marshal_address_value(&[0u8; 32], &ADDR_A, &U256::zero());
        bytes.extend_from_slice(&[1u8; 33]);
        assert!(unmarshal_address_value(&bytes).is_err());
    }
}
