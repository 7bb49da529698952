//! Private key parsing.

use crate::address::{public_key_bytes, Address, PublicKeyBytes};
use crate::error::WasmEthError;
use core::fmt;
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::zeroize::Zeroize;

const KEY_FORMAT: &str =
    "private key must be a prefixed hexified 32 byte string (i.e. \"0x...\" 64 chars long)";

/// secp256k1 signing key parsed from `0x` + 64 hex digits.
///
/// The secret scalar is zeroized when the key is dropped.
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    pub fn from_hex(s: &str) -> Result<Self, WasmEthError> {
        let digits = s
            .strip_prefix("0x")
            .filter(|d| d.len() == 64 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| WasmEthError::InvalidPrivateKey(KEY_FORMAT.to_string()))?;

        let mut secret = [0u8; 32];
        hex::decode_to_slice(digits, &mut secret)
            .map_err(|_| WasmEthError::InvalidPrivateKey(KEY_FORMAT.to_string()))?;
        let key = Self::from_bytes(&secret);
        secret.zeroize();
        key
    }

    pub fn from_bytes(secret: &[u8]) -> Result<Self, WasmEthError> {
        if secret.len() != 32 {
            return Err(WasmEthError::InvalidPrivateKey(format!(
                "private key must be 32 bytes, got {}",
                secret.len()
            )));
        }
        SigningKey::from_slice(secret).map(PrivateKey).map_err(|_| {
            WasmEthError::InvalidPrivateKey("not a valid secp256k1 scalar".to_string())
        })
    }

    /// Uncompressed public key without the SEC1 prefix byte.
    pub fn public_key(&self) -> PublicKeyBytes {
        public_key_bytes(self.0.verifying_key())
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}
