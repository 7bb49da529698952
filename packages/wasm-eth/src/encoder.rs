//! Canonical field encoding.
//!
//! Numeric fields become minimal big-endian byte strings (zero is empty),
//! byte fields are kept as-is. Each result is checked against its field's
//! [`LengthRule`].

use crate::codec::encode_list;
use crate::error::WasmEthError;
use crate::fields::{FieldSpec, LengthRule, TRANSACTION_FIELDS};
use crate::types::{FieldValue, TransactionRecord};
use num_bigint::BigUint;
use num_traits::Zero;

/// Ordered list of canonical byte strings, ready for RLP encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalFieldList(Vec<Vec<u8>>);

impl CanonicalFieldList {
    pub fn new(fields: Vec<Vec<u8>>) -> Self {
        CanonicalFieldList(fields)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.0.get(index).map(Vec::as_slice)
    }

    pub fn as_slice(&self) -> &[Vec<u8>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.0.iter().map(Vec::as_slice)
    }

    pub fn into_inner(self) -> Vec<Vec<u8>> {
        self.0
    }

    /// RLP encoding of the list
    pub fn to_rlp(&self) -> Vec<u8> {
        encode_list(&self.0)
    }
}

/// Strip leading zero bytes.
pub fn strip_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// Minimal big-endian representation; zero encodes as empty bytes.
pub fn quantity_to_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Encode one field value according to `spec`.
pub fn encode_field(spec: &FieldSpec, value: &FieldValue) -> Result<Vec<u8>, WasmEthError> {
    let encoded = match (value, spec.numeric) {
        (FieldValue::Absent, _) => return Ok(Vec::new()),
        (FieldValue::Quantity(n), true) => quantity_to_bytes(n),
        (FieldValue::Bytes(bytes), true) => strip_zeros(bytes).to_vec(),
        (FieldValue::Bytes(bytes), false) => bytes.clone(),
        (FieldValue::Quantity(_), false) => {
            return Err(WasmEthError::InvalidInput(format!(
                "'{}' expects a hex byte string, got an integer",
                spec.name
            )))
        }
    };

    match spec.length {
        LengthRule::Fixed(expected) if !encoded.is_empty() && encoded.len() != expected => {
            Err(WasmEthError::InvalidFieldLength {
                field: spec.name,
                expected,
                actual: encoded.len(),
            })
        }
        LengthRule::Max(max) => {
            let stripped = strip_zeros(&encoded);
            if stripped.len() > max {
                return Err(WasmEthError::FieldTooLong {
                    field: spec.name,
                    max,
                    actual: stripped.len(),
                });
            }
            Ok(stripped.to_vec())
        }
        _ => Ok(encoded),
    }
}

/// Encode the six unsigned fields of `record` in wire order.
pub fn encode_unsigned(record: &TransactionRecord) -> Result<CanonicalFieldList, WasmEthError> {
    let fields = TRANSACTION_FIELDS
        .iter()
        .map(|spec| encode_field(spec, record.get(spec)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CanonicalFieldList(fields))
}
