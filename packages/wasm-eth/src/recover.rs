//! ECDSA public key recovery from raw transactions.

use crate::address::{public_key_bytes, Address, PublicKeyBytes};
use crate::codec::{decode_list, encode_list, keccak256};
use crate::error::WasmEthError;
use crate::fields::UNSIGNED_FIELD_COUNT;
use crate::signer::{SignedFields, RECOVERY_ID_OFFSET};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::FieldBytes;
use std::borrow::Cow;

/// Raw transaction input: hex string (`0x` optional) or bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEncoding<'a> {
    Hex(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> RawEncoding<'a> {
    pub fn to_bytes(&self) -> Result<Cow<'a, [u8]>, WasmEthError> {
        match *self {
            RawEncoding::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            RawEncoding::Hex(s) => {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                hex::decode(digits).map(Cow::Owned).map_err(|e| {
                    WasmEthError::MalformedEncoding(format!("Invalid hex: {}", e))
                })
            }
        }
    }
}

impl<'a> From<&'a str> for RawEncoding<'a> {
    fn from(s: &'a str) -> Self {
        RawEncoding::Hex(s)
    }
}

impl<'a> From<&'a String> for RawEncoding<'a> {
    fn from(s: &'a String) -> Self {
        RawEncoding::Hex(s)
    }
}

impl<'a> From<&'a [u8]> for RawEncoding<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        RawEncoding::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for RawEncoding<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        RawEncoding::Bytes(bytes)
    }
}

/// Signer recovered from a self-contained signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredSigner {
    pub public_key: PublicKeyBytes,
    pub address: Address,
}

/// Recover the public key that produced `(v, r, s)` over a raw transaction.
///
/// Only the first six decoded items are hashed, so both an unsigned and a
/// fully signed encoding are accepted; an embedded signature is not
/// compared with the one passed in.
pub fn recover<'a>(
    raw: impl Into<RawEncoding<'a>>,
    v: u64,
    r: &[u8],
    s: &[u8],
) -> Result<PublicKeyBytes, WasmEthError> {
    let bytes = raw.into().to_bytes()?;
    let decoded = decode_list(&bytes)?;
    if decoded.len() < UNSIGNED_FIELD_COUNT {
        return Err(WasmEthError::MalformedEncoding(format!(
            "expected at least {} fields, got {}",
            UNSIGNED_FIELD_COUNT,
            decoded.len()
        )));
    }
    tracing::trace!(fields = decoded.len(), "decoded raw transaction");

    let digest = keccak256(&encode_list(&decoded[..UNSIGNED_FIELD_COUNT]));
    recover_from_digest(&digest, v, r, s)
}

/// Recover the signer of a signed transaction using its embedded `v, r, s`.
pub fn recover_signed<'a>(
    raw: impl Into<RawEncoding<'a>>,
) -> Result<RecoveredSigner, WasmEthError> {
    let bytes = raw.into().to_bytes()?;
    let signed = SignedFields::from_fields(decode_list(&bytes)?)?;
    let public_key = recover_from_digest(
        &signed.signing_hash(),
        u64::from(signed.v()),
        signed.r(),
        signed.s(),
    )?;
    Ok(RecoveredSigner {
        public_key,
        address: Address::from_public_key(&public_key),
    })
}

/// Recover a public key from a 32-byte digest and a `v`-offset signature.
pub fn recover_from_digest(
    digest: &[u8; 32],
    v: u64,
    r: &[u8],
    s: &[u8],
) -> Result<PublicKeyBytes, WasmEthError> {
    let recovery_id = v
        .checked_sub(u64::from(RECOVERY_ID_OFFSET))
        .filter(|id| *id <= 1)
        .and_then(|id| RecoveryId::from_byte(id as u8))
        .ok_or_else(|| {
            WasmEthError::RecoveryFailed(format!("invalid 'v' {}, expected 27 or 28", v))
        })?;

    let signature = Signature::from_scalars(scalar_bytes(r, "r")?, scalar_bytes(s, "s")?)
        .map_err(|_| {
            WasmEthError::InvalidSignature("'r' and 's' must be in [1, n-1]".to_string())
        })?;

    let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        .map_err(|e| WasmEthError::RecoveryFailed(e.to_string()))?;
    tracing::debug!(v, "recovered public key");
    Ok(public_key_bytes(&key))
}

/// Left-pad a zero-stripped scalar to 32 bytes.
fn scalar_bytes(bytes: &[u8], name: &str) -> Result<FieldBytes, WasmEthError> {
    if bytes.len() > 32 {
        return Err(WasmEthError::InvalidSignature(format!(
            "'{}' must be at most 32 bytes, got {}",
            name,
            bytes.len()
        )));
    }
    let mut out = FieldBytes::default();
    out[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}
