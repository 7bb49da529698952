//! wasm-eth: WASM module for legacy Ethereum transaction signing
//!
//! This crate provides:
//! - Canonical field encoding (`nonce, gasPrice, gasLimit, to, value, data`)
//! - Signing with `v = 27 + recovery_id` (no chain id)
//! - Public key and address recovery from raw transactions
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//! - **Core layer** (`src/*.rs`): Pure Rust logic, no WASM dependencies
//! - **WASM layer** (`src/wasm/*.rs`): Thin wrappers with `#[wasm_bindgen]`
//!
//! # Usage
//!
//! ```
//! use wasm_eth::{recover, sign_fields, TransactionRecord};
//!
//! let record = TransactionRecord::from_json_str(
//!     r#"{"nonce": 0, "gas": 21000, "to": "0x3535353535353535353535353535353535353535"}"#,
//! )
//! .unwrap();
//! let key = "0x4646464646464646464646464646464646464646464646464646464646464646";
//!
//! let signed = sign_fields(&record, key).unwrap();
//! let public_key = recover(&signed.to_rlp(), signed.v().into(), signed.r(), signed.s()).unwrap();
//! assert_eq!(public_key.len(), 64);
//! ```

pub mod address;
pub mod codec;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod key;
pub mod recover;
mod serialization;
pub mod signer;
pub mod types;
pub mod wasm;

// Re-export main types for convenience
pub use address::{Address, PublicKeyBytes};
pub use encoder::{encode_unsigned, CanonicalFieldList};
pub use error::WasmEthError;
pub use fields::FieldSpec;
pub use key::PrivateKey;
pub use recover::{recover, recover_from_digest, recover_signed, RawEncoding, RecoveredSigner};
pub use signer::{
    sign, sign_fields, sign_hex, sign_with_key, signing_hash, OutputFormat, SignOutput,
    SignedFields,
};
pub use types::{FieldValue, TransactionRecord};
