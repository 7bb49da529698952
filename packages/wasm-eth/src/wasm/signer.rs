//! WASM bindings for signing and recovery
//!
//! SignerNamespace provides static methods mirroring the core API

use crate::error::WasmEthError;
use crate::key::PrivateKey;
use crate::recover::{recover, recover_signed};
use crate::signer::{sign_with_key, signing_hash};
use crate::types::TransactionRecord;
use crate::wasm::try_from_js_value::{JsBytes, TryFromJsValue};
use crate::wasm::try_into_js_value::TryIntoJsValue;
use wasm_bindgen::prelude::*;

/// Namespace for signing operations
#[wasm_bindgen]
pub struct SignerNamespace;

#[wasm_bindgen]
impl SignerNamespace {
    /// Sign a transaction object
    ///
    /// # Arguments
    /// * `transaction` - Object with `nonce`, `gasPrice`, `gasLimit` (or `gas`),
    ///   `to`, `value` and `data`
    /// * `private_key` - `0x`-prefixed 32-byte hex string
    /// * `to_object` - Return the nine signed fields instead of hex
    ///
    /// # Returns
    /// `0x`-prefixed raw transaction hex, or an array of nine `Uint8Array`s
    #[wasm_bindgen]
    pub fn sign(
        transaction: JsValue,
        private_key: JsValue,
        to_object: Option<bool>,
    ) -> Result<JsValue, JsValue> {
        let record = TransactionRecord::try_from_js_value(&transaction)?;
        let key = parse_private_key(&private_key)?;
        let signed = sign_with_key(&record, &key)?;

        if to_object.unwrap_or(false) {
            Ok(signed.try_to_js_value()?)
        } else {
            Ok(JsValue::from_str(&signed.to_hex()))
        }
    }

    /// Recover the 64-byte public key that signed a raw transaction
    ///
    /// # Arguments
    /// * `raw_transaction` - Hex string or `Uint8Array`; only the first six
    ///   fields are hashed
    /// * `v` - 27 or 28
    /// * `r`, `s` - Signature scalars as `Uint8Array` or hex
    #[wasm_bindgen]
    pub fn recover(
        raw_transaction: JsValue,
        v: f64,
        r: JsValue,
        s: JsValue,
    ) -> Result<Vec<u8>, JsValue> {
        let raw = JsBytes::try_from_js_value(&raw_transaction)?;
        let v = recovery_value(v)?;
        let r = JsBytes::try_from_js_value(&r)?;
        let s = JsBytes::try_from_js_value(&s)?;
        let public_key = recover(&raw.0, v, &r.0, &s.0)?;
        Ok(public_key.to_vec())
    }

    /// Recover `{ publicKey, address }` from a fully signed raw transaction
    #[wasm_bindgen(js_name = recoverSigned)]
    pub fn recover_signed(raw_transaction: JsValue) -> Result<JsValue, JsValue> {
        let raw = JsBytes::try_from_js_value(&raw_transaction)?;
        let signer = recover_signed(&raw.0)?;
        Ok(signer.try_to_js_value()?)
    }

    /// Keccak-256 digest of the unsigned encoding
    #[wasm_bindgen(js_name = signingHash)]
    pub fn signing_hash(transaction: JsValue) -> Result<Vec<u8>, JsValue> {
        let record = TransactionRecord::try_from_js_value(&transaction)?;
        Ok(signing_hash(&record)?.to_vec())
    }
}

fn parse_private_key(value: &JsValue) -> Result<PrivateKey, WasmEthError> {
    let key = value.as_string().ok_or_else(|| {
        WasmEthError::InvalidPrivateKey("private key must be a string".to_string())
    })?;
    PrivateKey::from_hex(&key)
}

fn recovery_value(v: f64) -> Result<u64, WasmEthError> {
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
        return Err(WasmEthError::RecoveryFailed(format!(
            "invalid 'v' {}, expected 27 or 28",
            v
        )));
    }
    Ok(v as u64)
}
