//! Transaction input types.
//!
//! Loosely-typed inputs (JSON documents, JS objects, CLI strings) are
//! resolved into a [`FieldValue`] once, using the target field's
//! [`FieldSpec`], before anything is encoded.

use crate::error::WasmEthError;
use crate::fields::FieldSpec;
use num_bigint::BigUint;
use num_traits::Zero;

/// Largest integer a JS number represents exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single transaction field value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    /// Field not supplied; encodes as an empty byte string
    #[default]
    Absent,
    /// Non-negative integer
    Quantity(BigUint),
    /// Raw byte string
    Bytes(Vec<u8>),
}

impl FieldValue {
    pub fn quantity(value: impl Into<BigUint>) -> Self {
        FieldValue::Quantity(value.into())
    }

    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        FieldValue::Bytes(value.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Resolve a string for `spec`: numeric fields parse a quantity, byte
    /// fields parse hex.
    pub fn parse(spec: &FieldSpec, s: &str) -> Result<Self, WasmEthError> {
        let parsed = if spec.numeric {
            parse_quantity(s).map(FieldValue::Quantity)
        } else {
            parse_hex_bytes(s).map(FieldValue::Bytes)
        };
        parsed.map_err(|e| with_field(e, spec))
    }

    /// Resolve a floating point number (JS `number`, JSON number).
    pub fn from_number(spec: &FieldSpec, n: f64) -> Result<Self, WasmEthError> {
        if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
            return Err(WasmEthError::InvalidInput(format!(
                "'{}' must be a non-negative integer, got {}",
                spec.name, n
            )));
        }
        if n > MAX_SAFE_INTEGER {
            return Err(WasmEthError::InvalidInput(format!(
                "'{}' exceeds the safe integer range, pass it as a string or BigInt",
                spec.name
            )));
        }
        Ok(FieldValue::Quantity(BigUint::from(n as u64)))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Quantity(BigUint::from(value))
    }
}

impl From<BigUint> for FieldValue {
    fn from(value: BigUint) -> Self {
        FieldValue::Quantity(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::Bytes(value)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(value: &[u8]) -> Self {
        FieldValue::Bytes(value.to_vec())
    }
}

fn with_field(err: WasmEthError, spec: &FieldSpec) -> WasmEthError {
    match err {
        WasmEthError::InvalidInput(msg) => {
            WasmEthError::InvalidInput(format!("{} (field: {})", msg, spec.name))
        }
        other => other,
    }
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

/// Parse an integer string.
///
/// Surrounding whitespace is ignored. `0x`-prefixed strings are hex (`0x`
/// alone is zero). Unprefixed strings are decimal when they are all decimal
/// digits, otherwise hex.
pub fn parse_quantity(input: &str) -> Result<BigUint, WasmEthError> {
    let invalid = || WasmEthError::InvalidInput(format!("invalid quantity '{}'", input));
    let s = input.trim();

    let (digits, radix) = match strip_hex_prefix(s) {
        Some(digits) => (digits, 16),
        None if s.bytes().all(|b| b.is_ascii_digit()) => (s, 10),
        None => (s, 16),
    };

    if digits.is_empty() {
        return Ok(BigUint::zero());
    }
    // num-bigint tolerates `_` and `+`; reject them up front
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(invalid)
}

/// Parse a hex byte string, with or without `0x`, left-padding odd digit
/// counts with a single `0`. Leading zero bytes are kept.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, WasmEthError> {
    let digits = strip_hex_prefix(s).unwrap_or(s);
    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits))
    } else {
        hex::decode(digits)
    };
    decoded.map_err(|e| WasmEthError::InvalidInput(format!("invalid hex '{}': {}", s, e)))
}

/// Caller-supplied transaction.
///
/// `gas` is an alias for `gas_limit`; when present it takes the gas-limit
/// slot. Loose inputs only set `gas` when the raw value is truthy, so
/// `{gas: 0, gasLimit: 21000}` keeps the `gasLimit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRecord {
    pub nonce: FieldValue,
    pub gas_price: FieldValue,
    pub gas_limit: FieldValue,
    pub gas: FieldValue,
    pub to: FieldValue,
    pub value: FieldValue,
    pub data: FieldValue,
}

static ABSENT: FieldValue = FieldValue::Absent;

impl TransactionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &str) -> Option<&FieldValue> {
        match key {
            "nonce" => Some(&self.nonce),
            "gasPrice" => Some(&self.gas_price),
            "gasLimit" => Some(&self.gas_limit),
            "gas" => Some(&self.gas),
            "to" => Some(&self.to),
            "value" => Some(&self.value),
            "data" => Some(&self.data),
            _ => None,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        match key {
            "nonce" => Some(&mut self.nonce),
            "gasPrice" => Some(&mut self.gas_price),
            "gasLimit" => Some(&mut self.gas_limit),
            "gas" => Some(&mut self.gas),
            "to" => Some(&mut self.to),
            "value" => Some(&mut self.value),
            "data" => Some(&mut self.data),
            _ => None,
        }
    }

    /// Set a field by its wire name or alias. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Builder form of [`TransactionRecord::set`]; unknown keys are ignored.
    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Value for `spec`, resolving its alias first.
    pub fn get(&self, spec: &FieldSpec) -> &FieldValue {
        spec.alias
            .and_then(|alias| self.slot(alias))
            .filter(|value| !value.is_absent())
            .or_else(|| self.slot(spec.name))
            .unwrap_or(&ABSENT)
    }

    /// Build a record from a JSON object.
    ///
    /// Numbers and strings are resolved per field; `null` is absent and
    /// unknown keys are ignored. A falsy `gas` (`0`, `""`, `false`, `null`)
    /// does not override `gasLimit`.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, WasmEthError> {
        let object = value.as_object().ok_or_else(|| {
            WasmEthError::InvalidInput(format!(
                "transaction input must be an object, got '{}'",
                json_type_name(value)
            ))
        })?;

        let mut record = TransactionRecord::new();
        for (key, raw) in object {
            let Some(spec) = FieldSpec::find(key) else {
                tracing::trace!(key = key.as_str(), "ignoring unknown transaction key");
                continue;
            };
            if spec.alias == Some(key.as_str()) && is_falsy_json(raw) {
                continue;
            }
            let field_value = field_value_from_json(spec, raw)?;
            record.set(key, field_value);
        }
        Ok(record)
    }

    /// Parse a JSON document into a record.
    pub fn from_json_str(s: &str) -> Result<Self, WasmEthError> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| WasmEthError::InvalidInput(format!("invalid transaction JSON: {}", e)))?;
        Self::from_json(&value)
    }
}

fn field_value_from_json(
    spec: &FieldSpec,
    value: &serde_json::Value,
) -> Result<FieldValue, WasmEthError> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(FieldValue::Absent),
        Value::String(s) => FieldValue::parse(spec, s),
        Value::Number(n) => match n.as_u64() {
            Some(n) => Ok(FieldValue::from(n)),
            None => FieldValue::from_number(spec, n.as_f64().unwrap_or(f64::NAN)),
        },
        other => Err(WasmEthError::InvalidInput(format!(
            "'{}' must be a number or string, got '{}'",
            spec.name,
            json_type_name(other)
        ))),
    }
}

fn is_falsy_json(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0 || n.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
