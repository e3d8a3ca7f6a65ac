//! Canonical encodings for block bodies and block hashes.
//!
//! A body is the compact JSON text of its payload (serde field order, no
//! whitespace) stored as lower-case hex. Decoding reverses both steps, so a
//! payload round-trips byte for byte.
//!
//! The hash preimage is the JSON object
//! `{"hash":null,"height":..,"body":"..","time":"..","previousBlockHash":..}`
//! with fields in exactly that order and `time` as a decimal string.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::types::BlockHash;

/// Serialize a value to its canonical JSON text.
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| CoreError::EncodingError(e.to_string()))
}

/// Encode a payload into the hex body form.
pub fn encode_body<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(hex::encode(canonical_json(value)?))
}

/// Decode a hex body back into a payload.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let bytes = hex::decode(body).map_err(|e| CoreError::DecodingError(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HashPreimage<'a> {
    hash: Option<&'a str>,
    height: u64,
    body: &'a str,
    time: String,
    previous_block_hash: Option<&'a BlockHash>,
}

/// Bytes hashed to produce a block's hash.
pub fn hash_preimage(
    height: u64,
    body: &str,
    time: i64,
    previous_block_hash: Option<&BlockHash>,
) -> Result<Vec<u8>> {
    let preimage = HashPreimage {
        hash: None,
        height,
        body,
        time: time.to_string(),
        previous_block_hash,
    };
    serde_json::to_vec(&preimage).map_err(|e| CoreError::EncodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Marker {
        data: String,
    }

    #[test]
    fn test_genesis_marker_encoding() {
        let body = encode_body(&Marker {
            data: "Genesis Block".into(),
        })
        .unwrap();
        assert_eq!(body, "7b2264617461223a2247656e6573697320426c6f636b227d");
    }

    #[test]
    fn test_string_body_encoding() {
        assert_eq!(encode_body("foo").unwrap(), "22666f6f22");
        let decoded: String = decode_body("22666f6f22").unwrap();
        assert_eq!(decoded, "foo");
    }

    #[test]
    fn test_decode_rejects_bad_hex_and_bad_json() {
        assert!(matches!(
            decode_body::<Marker>("zz"),
            Err(CoreError::DecodingError(_))
        ));
        // "foo" without quotes is not JSON
        assert!(matches!(
            decode_body::<Marker>("666f6f"),
            Err(CoreError::DecodingError(_))
        ));
    }

    #[test]
    fn test_preimage_layout() {
        let preimage = hash_preimage(0, "ab", 7, None).unwrap();
        assert_eq!(
            String::from_utf8(preimage).unwrap(),
            r#"{"hash":null,"height":0,"body":"ab","time":"7","previousBlockHash":null}"#
        );

        let prev = BlockHash::from_bytes([0x11; 32]);
        let preimage = hash_preimage(3, "cd", -1, Some(&prev)).unwrap();
        assert_eq!(
            String::from_utf8(preimage).unwrap(),
            format!(
                r#"{{"hash":null,"height":3,"body":"cd","time":"-1","previousBlockHash":"{}"}}"#,
                "11".repeat(32)
            )
        );
    }
}
