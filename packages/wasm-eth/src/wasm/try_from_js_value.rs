//! JavaScript to Rust value conversion
//!
//! Transaction objects coming from JS are loosely typed: a field may be a
//! number, a BigInt, a string, a `Uint8Array`, a BN-like object or
//! `null`/`undefined`. Each value is resolved into a [`FieldValue`] once,
//! using the field it is read for.

use crate::error::WasmEthError;
use crate::fields::{FieldSpec, TRANSACTION_FIELDS};
use crate::types::{FieldValue, TransactionRecord};
use wasm_bindgen::{JsCast, JsValue};

// =============================================================================
// TryFromJsValue trait
// =============================================================================

/// Trait for converting JsValue to Rust types
pub(crate) trait TryFromJsValue: Sized {
    fn try_from_js_value(value: &JsValue) -> Result<Self, WasmEthError>;
}

// =============================================================================
// Byte inputs
// =============================================================================

/// Byte string given as a `Uint8Array` or a hex string (`0x` optional).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JsBytes(pub Vec<u8>);

impl TryFromJsValue for JsBytes {
    fn try_from_js_value(value: &JsValue) -> Result<Self, WasmEthError> {
        if let Some(array) = value.dyn_ref::<js_sys::Uint8Array>() {
            return Ok(JsBytes(array.to_vec()));
        }
        if let Some(s) = value.as_string() {
            let digits = s.strip_prefix("0x").unwrap_or(&s);
            return hex::decode(digits).map(JsBytes).map_err(|e| {
                WasmEthError::MalformedEncoding(format!("Invalid hex: {}", e))
            });
        }
        Err(WasmEthError::InvalidInput(format!(
            "Expected a Uint8Array or hex string, got {}",
            type_of(value)
        )))
    }
}

// =============================================================================
// Transaction fields
// =============================================================================

/// Resolve one JS value for `spec`.
pub(crate) fn field_value_from_js(
    spec: &FieldSpec,
    value: &JsValue,
) -> Result<FieldValue, WasmEthError> {
    if value.is_undefined() || value.is_null() {
        return Ok(FieldValue::Absent);
    }
    if let Some(s) = value.as_string() {
        return FieldValue::parse(spec, &s);
    }
    if let Some(n) = value.as_f64() {
        return FieldValue::from_number(spec, n);
    }
    if let Some(big) = value.dyn_ref::<js_sys::BigInt>() {
        let digits = big_to_string(big)?;
        return parse_decimal(spec, &digits);
    }
    if let Some(array) = value.dyn_ref::<js_sys::Uint8Array>() {
        return Ok(FieldValue::Bytes(array.to_vec()));
    }
    if value.is_object() {
        // BN.js and similar big number objects render themselves in base 10
        if let Some(digits) = call_to_string(value) {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return parse_decimal(spec, &digits);
            }
        }
    }
    Err(WasmEthError::InvalidInput(format!(
        "'{}' must be a number, bigint, string or Uint8Array, got {}",
        spec.name,
        type_of(value)
    )))
}

fn parse_decimal(spec: &FieldSpec, digits: &str) -> Result<FieldValue, WasmEthError> {
    let quantity = num_bigint::BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| {
        WasmEthError::InvalidInput(format!(
            "'{}' must be a non-negative integer, got {}",
            spec.name, digits
        ))
    })?;
    Ok(FieldValue::Quantity(quantity))
}

fn big_to_string(big: &js_sys::BigInt) -> Result<String, WasmEthError> {
    big.to_string(10)
        .map(String::from)
        .map_err(|_| WasmEthError::InvalidInput("Failed to read BigInt".to_string()))
}

fn call_to_string(value: &JsValue) -> Option<String> {
    let method = js_sys::Reflect::get(value, &JsValue::from_str("toString")).ok()?;
    let method = method.dyn_into::<js_sys::Function>().ok()?;
    method
        .call1(value, &JsValue::from_f64(10.0))
        .ok()?
        .as_string()
}

fn type_of(value: &JsValue) -> String {
    value
        .js_typeof()
        .as_string()
        .unwrap_or_else(|| "unknown".to_string())
}

/// Get a raw JsValue field from an object without conversion
fn get_raw_field(obj: &JsValue, key: &str) -> Result<JsValue, WasmEthError> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .map_err(|_| WasmEthError::InvalidInput(format!("Failed to read {} from object", key)))
}

impl TryFromJsValue for TransactionRecord {
    fn try_from_js_value(value: &JsValue) -> Result<Self, WasmEthError> {
        if !value.is_object() || value.is_function() || js_sys::Array::is_array(value) {
            return Err(WasmEthError::InvalidInput(format!(
                "transaction input must be an object, got '{}'",
                type_of(value)
            )));
        }

        let mut record = TransactionRecord::new();
        for spec in TRANSACTION_FIELDS.iter() {
            let keys = std::iter::once(spec.name).chain(spec.alias);
            for key in keys {
                let field = get_raw_field(value, key)?;
                // A falsy alias leaves the canonical field in charge
                if spec.alias == Some(key) && field.is_falsy() {
                    continue;
                }
                record.set(key, field_value_from_js(spec, &field)?);
            }
        }
        Ok(record)
    }
}
