//! Positional base58 encoding of numeric ids.
//!
//! Uses the bitcoin alphabet, which leaves out `0`, `O`, `I` and `l`.
//! The id's big-endian bytes are trimmed of leading zeros before encoding, so
//! the output is the plain base58 numeral of the id, most significant digit
//! first, and `0` encodes as `"1"`.

use crate::error::{CoreError, Result};
use crate::id::NumericId;
use crate::key::UrlKey;

/// The base58 alphabet, in digit order.
pub const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Longest encoding of a 63-bit id.
pub const MAX_ENCODED_LEN: usize = 11;

/// Encodes `id` into its url key.
pub fn encode(id: NumericId) -> UrlKey {
    let bytes = id.get().to_be_bytes();
    // keep the last byte so that zero encodes as a single digit
    let first = bytes[..7].iter().take_while(|b| **b == 0).count();
    let encoded = bs58::encode(&bytes[first..]).into_string();
    UrlKey::from_encoded(encoded)
}

/// Decodes a url key back into its numeric id.
pub fn decode(key: &str) -> Result<NumericId> {
    if key.is_empty() {
        return Err(CoreError::InvalidKey("key cannot be empty".to_string()));
    }

    let bytes = bs58::decode(key)
        .into_vec()
        .map_err(|e| CoreError::InvalidKey(format!("'{key}': {e}")))?;

    let significant: Vec<u8> = bytes.into_iter().skip_while(|b| *b == 0).collect();
    if significant.len() > 8 {
        return Err(CoreError::InvalidKey(format!(
            "'{key}' does not fit in 63 bits"
        )));
    }

    let mut buf = [0_u8; 8];
    buf[8 - significant.len()..].copy_from_slice(&significant);
    NumericId::new(u64::from_be_bytes(buf))
        .map_err(|_| CoreError::InvalidKey(format!("'{key}' does not fit in 63 bits")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(value: u64) -> String {
        encode(NumericId::new(value).unwrap()).to_string()
    }

    #[test]
    fn known_vectors() {
        assert_eq!(enc(2468135791013), "27qMi57J");
        assert_eq!(enc(7489135791013), "4PjAHW6Y");
        assert_eq!(enc(5638910482), "9bHtdX");
        assert_eq!(enc(87452840931), "3JEufoG");
        assert_eq!(enc(11), "C");
        assert_eq!(enc(10), "B");
        assert_eq!(enc(1), "2");
    }

    #[test]
    fn zero_is_first_alphabet_char() {
        assert_eq!(enc(0), "1");
    }

    #[test]
    fn digits_follow_alphabet_order() {
        for (value, digit) in ALPHABET.chars().enumerate() {
            assert_eq!(enc(value as u64), digit.to_string());
        }
        assert_eq!(enc(58), "21");
    }

    #[test]
    fn max_id_fits_max_len() {
        let key = encode(NumericId::MAX);
        assert_eq!(key.as_str().len(), MAX_ENCODED_LEN);
    }

    #[test]
    fn decode_inverts_encode() {
        for value in [
            0,
            1,
            57,
            58,
            255,
            256,
            5638910482,
            2468135791013,
            i64::MAX as u64,
        ] {
            let id = NumericId::new(value).unwrap();
            assert_eq!(decode(encode(id).as_str()).unwrap(), id);
        }
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert!(decode("").is_err());
        assert!(decode("0OIl").is_err());
        assert!(decode("abc/def").is_err());
        // 2^63, 2^64 and beyond
        assert!(decode("NQm6nKp8qFD").is_err());
        assert!(decode("jpXCZedGfVR").is_err());
        assert!(decode("zzzzzzzzzzzzzz").is_err());
    }
}
