//! Account addresses derived from secp256k1 public keys.

use crate::codec::keccak256;
use crate::error::WasmEthError;
use core::fmt;
use k256::ecdsa::VerifyingKey;

/// Uncompressed public key without the `0x04` SEC1 prefix.
pub type PublicKeyBytes = [u8; 64];

/// 20-byte account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Last 20 bytes of the Keccak-256 hash of the public key.
    pub fn from_public_key(public_key: &PublicKeyBytes) -> Self {
        let hash = keccak256(public_key);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        Address(address)
    }

    /// Parse a hex address (`0x` optional, any case).
    pub fn from_hex(s: &str) -> Result<Self, WasmEthError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut address = [0u8; 20];
        hex::decode_to_slice(digits, &mut address)
            .map_err(|e| WasmEthError::InvalidInput(format!("Invalid address '{}': {}", s, e)))?;
        Ok(Address(address))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Mixed-case checksum rendering (EIP-55).
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Serialize a verifying key as 64 uncompressed bytes.
pub(crate) fn public_key_bytes(key: &VerifyingKey) -> PublicKeyBytes {
    let point = key.to_encoded_point(false);
    let mut out = [0u8; 64];
    out.copy_from_slice(&point.as_bytes()[1..]);
    out
}
