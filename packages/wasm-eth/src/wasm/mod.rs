//! WASM bindings for wasm-eth
//!
//! This module contains thin wrappers with #[wasm_bindgen] that delegate
//! to the core Rust implementations.

pub mod signer;
pub(crate) mod try_from_js_value;
pub mod try_into_js_value;

// Re-export WASM types
pub use signer::SignerNamespace;
