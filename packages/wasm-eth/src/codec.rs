//! RLP list codec and Keccak-256 hashing.

use crate::error::WasmEthError;
use rlp::{Rlp, RlpStream};
use sha3::{Digest, Keccak256};

/// Keccak-256 hash
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&Keccak256::digest(data));
    hash
}

/// Encode an ordered list of byte strings as an RLP list.
pub fn encode_list(items: &[Vec<u8>]) -> Vec<u8> {
    let mut stream = RlpStream::new_list(items.len());
    for item in items {
        stream.append(item);
    }
    stream.out().to_vec()
}

/// Decode an RLP list whose items are all byte strings.
///
/// The list must span the whole input; nested lists are rejected.
pub fn decode_list(bytes: &[u8]) -> Result<Vec<Vec<u8>>, WasmEthError> {
    let rlp = Rlp::new(bytes);
    if !rlp.is_list() {
        return Err(WasmEthError::MalformedEncoding(
            "expected an RLP list".to_string(),
        ));
    }

    let info = rlp.payload_info()?;
    let encoded_len = info.header_len + info.value_len;
    if encoded_len != bytes.len() {
        return Err(WasmEthError::MalformedEncoding(format!(
            "list spans {} bytes but input has {}",
            encoded_len,
            bytes.len()
        )));
    }

    Ok(rlp.as_list::<Vec<u8>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_empty_list() {
        // Hash of the empty RLP list, the well-known empty ommers hash
        assert_eq!(
            hex::encode(keccak256(&encode_list(&[]))),
            "1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"
        );
    }

    #[test]
    fn test_encode_list() {
        let items = vec![vec![], vec![0x7f], vec![0x80], b"dog".to_vec()];
        assert_eq!(hex::encode(encode_list(&items)), "c8807f818083646f67");
    }

    #[test]
    fn test_decode_list() {
        let encoded = hex::decode("c8807f818083646f67").unwrap();
        let items = decode_list(&encoded).unwrap();
        assert_eq!(items, vec![vec![], vec![0x7f], vec![0x80], b"dog".to_vec()]);
    }

    #[test]
    fn test_decode_rejects_non_list() {
        let err = decode_list(&hex::decode("83646f67").unwrap()).unwrap_err();
        assert!(matches!(err, WasmEthError::MalformedEncoding(_)));

        assert!(decode_list(&[]).is_err());
    }

    #[test]
    fn test_decode_rejects_nested_list() {
        // [[], "a"]
        let encoded = hex::decode("c2c061").unwrap();
        assert!(matches!(
            decode_list(&encoded),
            Err(WasmEthError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let encoded = hex::decode("c18000").unwrap();
        assert!(decode_list(&encoded).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated() {
        let encoded = hex::decode("c8807f818083646f").unwrap();
        assert!(decode_list(&encoded).is_err());
    }
}
