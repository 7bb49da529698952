//! Error types for wasm-eth

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Main error type for wasm-eth operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WasmEthError {
    /// Wrong shape or type for a transaction or one of its field values
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Private key is not `0x` + 64 hex digits, or not a valid secp256k1 scalar
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    /// Fixed-width field has a non-empty value of the wrong width
    #[error("Invalid '{field}', invalid length should be '{expected}' got '{actual}'")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Value needs more bytes than its field allows
    #[error("Invalid '{field}' length, the max length is '{max}', got '{actual}'")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Raw transaction is not a valid RLP list of byte strings
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),
    /// `r` or `s` is out of range for the curve order
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    /// Bad recovery id or the curve math rejected the signature
    #[error("Public key recovery failed: {0}")]
    RecoveryFailed(String),
}

impl WasmEthError {
    /// Stable name of the error kind, used as the JS `Error.name`.
    pub fn kind(&self) -> &'static str {
        match self {
            WasmEthError::InvalidInput(_) => "InvalidInput",
            WasmEthError::InvalidPrivateKey(_) => "InvalidPrivateKey",
            WasmEthError::InvalidFieldLength { .. } => "InvalidFieldLength",
            WasmEthError::FieldTooLong { .. } => "FieldTooLong",
            WasmEthError::MalformedEncoding(_) => "MalformedEncoding",
            WasmEthError::InvalidSignature(_) => "InvalidSignature",
            WasmEthError::RecoveryFailed(_) => "RecoveryFailed",
        }
    }
}

impl From<rlp::DecoderError> for WasmEthError {
    fn from(err: rlp::DecoderError) -> Self {
        WasmEthError::MalformedEncoding(err.to_string())
    }
}

// Converts to a JS Error with stack trace; `name` carries the error kind
impl From<WasmEthError> for JsValue {
    fn from(err: WasmEthError) -> Self {
        let js_err = js_sys::Error::new(&err.to_string());
        js_err.set_name(err.kind());
        js_err.into()
    }
}
