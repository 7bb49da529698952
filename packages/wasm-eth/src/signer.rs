//! Transaction signing.
//!
//! # Wire Format
//!
//! A signed transaction is the RLP list
//! `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]` where the first
//! six items are the canonical field encodings, `v = 27 + recovery_id` and
//! `r`, `s` are zero-stripped big-endian scalars. The signed digest is
//! `keccak256(rlp([nonce, gasPrice, gasLimit, to, value, data]))`.

use crate::codec::{encode_list, keccak256};
use crate::encoder::{encode_unsigned, strip_zeros, CanonicalFieldList};
use crate::error::WasmEthError;
use crate::fields::{SIGNED_FIELD_COUNT, UNSIGNED_FIELD_COUNT};
use crate::key::PrivateKey;
use crate::types::TransactionRecord;
use k256::ecdsa::{RecoveryId, Signature};
use serde::Serialize;

/// Offset added to the recovery id in the `v` field.
pub const RECOVERY_ID_OFFSET: u8 = 27;

/// Requested shape of [`sign`] output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `0x`-prefixed lowercase hex of the signed RLP list
    #[default]
    Hex,
    /// The nine signed fields
    List,
}

/// Output of [`sign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutput {
    Hex(String),
    List(SignedFields),
}

/// The nine fields of a signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedFields(CanonicalFieldList);

impl SignedFields {
    /// Wrap a decoded nine-item list. The `v` item must be a single byte.
    pub fn from_fields(fields: Vec<Vec<u8>>) -> Result<Self, WasmEthError> {
        if fields.len() != SIGNED_FIELD_COUNT {
            return Err(WasmEthError::MalformedEncoding(format!(
                "signed transaction must have {} fields, got {}",
                SIGNED_FIELD_COUNT,
                fields.len()
            )));
        }
        if fields[UNSIGNED_FIELD_COUNT].len() != 1 {
            return Err(WasmEthError::MalformedEncoding(format!(
                "'v' must be a single byte, got {} bytes",
                fields[UNSIGNED_FIELD_COUNT].len()
            )));
        }
        Ok(SignedFields(CanonicalFieldList::new(fields)))
    }

    /// The first six fields (what gets hashed).
    pub fn unsigned(&self) -> &[Vec<u8>] {
        &self.0.as_slice()[..UNSIGNED_FIELD_COUNT]
    }

    /// `27 + recovery_id`
    pub fn v(&self) -> u8 {
        self.0.as_slice()[UNSIGNED_FIELD_COUNT][0]
    }

    pub fn r(&self) -> &[u8] {
        &self.0.as_slice()[UNSIGNED_FIELD_COUNT + 1]
    }

    pub fn s(&self) -> &[u8] {
        &self.0.as_slice()[UNSIGNED_FIELD_COUNT + 2]
    }

    pub fn as_list(&self) -> &CanonicalFieldList {
        &self.0
    }

    pub fn into_list(self) -> CanonicalFieldList {
        self.0
    }

    pub fn to_rlp(&self) -> Vec<u8> {
        self.0.to_rlp()
    }

    /// `0x`-prefixed lowercase hex of the RLP encoding.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_rlp()))
    }

    /// Digest the signature commits to.
    pub fn signing_hash(&self) -> [u8; 32] {
        keccak256(&encode_list(self.unsigned()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedFieldsJson<'a> {
    #[serde(with = "crate::serialization::bytes")]
    nonce: &'a [u8],
    #[serde(with = "crate::serialization::bytes")]
    gas_price: &'a [u8],
    #[serde(with = "crate::serialization::bytes")]
    gas_limit: &'a [u8],
    #[serde(with = "crate::serialization::bytes")]
    to: &'a [u8],
    #[serde(with = "crate::serialization::bytes")]
    value: &'a [u8],
    #[serde(with = "crate::serialization::bytes")]
    data: &'a [u8],
    v: u8,
    #[serde(with = "crate::serialization::bytes")]
    r: &'a [u8],
    #[serde(with = "crate::serialization::bytes")]
    s: &'a [u8],
}

impl Serialize for SignedFields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let unsigned = self.unsigned();
        SignedFieldsJson {
            nonce: &unsigned[0],
            gas_price: &unsigned[1],
            gas_limit: &unsigned[2],
            to: &unsigned[3],
            value: &unsigned[4],
            data: &unsigned[5],
            v: self.v(),
            r: self.r(),
            s: self.s(),
        }
        .serialize(serializer)
    }
}

/// Hash of the unsigned field encoding, i.e. the digest that gets signed.
pub fn signing_hash(record: &TransactionRecord) -> Result<[u8; 32], WasmEthError> {
    let unsigned = encode_unsigned(record)?;
    Ok(keccak256(&unsigned.to_rlp()))
}

/// Sign `record` with a `0x`-prefixed hex private key.
pub fn sign(
    record: &TransactionRecord,
    private_key: &str,
    format: OutputFormat,
) -> Result<SignOutput, WasmEthError> {
    let key = PrivateKey::from_hex(private_key)?;
    let signed = sign_with_key(record, &key)?;
    Ok(match format {
        OutputFormat::Hex => SignOutput::Hex(signed.to_hex()),
        OutputFormat::List => SignOutput::List(signed),
    })
}

/// Sign and return the `0x`-prefixed raw transaction.
pub fn sign_hex(record: &TransactionRecord, private_key: &str) -> Result<String, WasmEthError> {
    let key = PrivateKey::from_hex(private_key)?;
    sign_with_key(record, &key).map(|signed| signed.to_hex())
}

/// Sign and return the nine signed fields.
pub fn sign_fields(
    record: &TransactionRecord,
    private_key: &str,
) -> Result<SignedFields, WasmEthError> {
    let key = PrivateKey::from_hex(private_key)?;
    sign_with_key(record, &key)
}

/// Sign `record` with an already parsed key.
pub fn sign_with_key(
    record: &TransactionRecord,
    key: &PrivateKey,
) -> Result<SignedFields, WasmEthError> {
    let unsigned = encode_unsigned(record)?;
    let encoded = unsigned.to_rlp();
    tracing::debug!(encoded_len = encoded.len(), "signing transaction");

    let digest = keccak256(&encoded);
    let (signature, recovery_id) = sign_digest(key, &digest)?;
    let (r, s) = signature.split_bytes();

    let mut fields = unsigned.into_inner();
    fields.push(vec![RECOVERY_ID_OFFSET + recovery_id]);
    fields.push(strip_zeros(&r).to_vec());
    fields.push(strip_zeros(&s).to_vec());

    tracing::debug!(
        v = RECOVERY_ID_OFFSET + recovery_id,
        "signed transaction"
    );
    Ok(SignedFields(CanonicalFieldList::new(fields)))
}

/// Deterministic (RFC6979) low-s signature over a 32-byte digest.
fn sign_digest(key: &PrivateKey, digest: &[u8; 32]) -> Result<(Signature, u8), WasmEthError> {
    let (signature, recovery_id): (Signature, RecoveryId) = key
        .signing_key()
        .sign_prehash_recoverable(digest)
        .map_err(|e| WasmEthError::InvalidSignature(format!("Signing failed: {}", e)))?;

    // Negating s flips the parity of R
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(normalized) => (normalized, recovery_id.to_byte() ^ 1),
        None => (signature, recovery_id.to_byte()),
    };

    if recovery_id > 1 {
        return Err(WasmEthError::InvalidSignature(format!(
            "recovery id {} cannot be encoded in 'v'",
            recovery_id
        )));
    }
    Ok((signature, recovery_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recover::recover;

    const KEY: &str = "0x4646464646464646464646464646464646464646464646464646464646464646";
    const TO: &str = "0x3535353535353535353535353535353535353535";

    fn record() -> TransactionRecord {
        TransactionRecord::from_json_str(&format!(
            r#"{{"nonce": 9, "gasPrice": "20000000000", "gas": 21000, "to": "{}", "value": "1000000000000000000"}}"#,
            TO
        ))
        .unwrap()
    }

    #[test]
    fn test_sign_hex_prefix() {
        let raw = sign_hex(&record(), KEY).unwrap();
        assert!(raw.starts_with("0xf86"));
        assert_eq!(raw, raw.to_lowercase());
    }

    #[test]
    fn test_sign_list_shape() {
        let signed = sign_fields(&record(), KEY).unwrap();
        assert_eq!(signed.as_list().len(), SIGNED_FIELD_COUNT);
        assert!(signed.v() == 27 || signed.v() == 28);
        assert!(signed.r().len() <= 32 && !signed.r().is_empty());
        assert!(signed.s().len() <= 32 && !signed.s().is_empty());
        assert_ne!(signed.r()[0], 0);
        assert_ne!(signed.s()[0], 0);
    }

    #[test]
    fn test_sign_output_formats_agree() {
        let SignOutput::Hex(hex) = sign(&record(), KEY, OutputFormat::Hex).unwrap() else {
            panic!("expected hex output");
        };
        let SignOutput::List(list) = sign(&record(), KEY, OutputFormat::List).unwrap() else {
            panic!("expected list output");
        };
        assert_eq!(hex, list.to_hex());
    }

    #[test]
    fn test_signature_is_low_s() {
        let half_order =
            hex::decode("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0")
                .unwrap();
        for nonce in 0..16u64 {
            let signed = sign_fields(&record().with("nonce", nonce), KEY).unwrap();
            let mut s = vec![0u8; 32 - signed.s().len()];
            s.extend_from_slice(signed.s());
            assert!(s <= half_order, "high s for nonce {}", nonce);
        }
    }

    #[test]
    fn test_sign_deterministic() {
        assert_eq!(
            sign_hex(&record(), KEY).unwrap(),
            sign_hex(&record(), KEY).unwrap()
        );
    }

    #[test]
    fn test_sign_recover_roundtrip() {
        let signed = sign_fields(&record(), KEY).unwrap();
        let public_key = recover(
            signed.to_hex().as_str(),
            signed.v() as u64,
            signed.r(),
            signed.s(),
        )
        .unwrap();
        assert_eq!(public_key, PrivateKey::from_hex(KEY).unwrap().public_key());
    }

    #[test]
    fn test_signing_hash_matches_signed_fields() {
        let signed = sign_fields(&record(), KEY).unwrap();
        assert_eq!(signing_hash(&record()).unwrap(), signed.signing_hash());
    }

    #[test]
    fn test_invalid_key() {
        let err = sign_hex(&TransactionRecord::new(), "not-a-key").unwrap_err();
        assert!(matches!(err, WasmEthError::InvalidPrivateKey(_)));
    }

    #[test]
    fn test_invalid_field_reported_before_signing() {
        let record = TransactionRecord::new().with("to", vec![0x00]);
        let err = sign_hex(&record, KEY).unwrap_err();
        assert!(matches!(err, WasmEthError::InvalidFieldLength { .. }));
    }

    #[test]
    fn test_signed_fields_json() {
        let signed = sign_fields(&record(), KEY).unwrap();
        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["nonce"], "0x09");
        assert_eq!(json["gasLimit"], "0x5208");
        assert_eq!(json["to"], TO);
        assert_eq!(json["data"], "0x");
        assert_eq!(json["v"], signed.v());
    }

    #[test]
    fn test_from_fields_validates_shape() {
        assert!(SignedFields::from_fields(vec![vec![]; 6]).is_err());

        let mut fields = vec![vec![]; 9];
        assert!(SignedFields::from_fields(fields.clone()).is_err());
        fields[6] = vec![27];
        assert_eq!(SignedFields::from_fields(fields).unwrap().v(), 27);
    }
}
