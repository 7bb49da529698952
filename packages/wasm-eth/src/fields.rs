//! Field schema of a legacy transaction.
//!
//! The order of [`TRANSACTION_FIELDS`] is both the signing-hash input order
//! and the wire layout.

/// Byte-length constraint applied to an encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    /// Non-empty values must be exactly this many bytes
    Fixed(usize),
    /// Zero-stripped values may be at most this many bytes
    Max(usize),
    /// No constraint (payload data)
    Unbounded,
}

/// Static description of one transaction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Secondary key accepted in place of `name`
    pub alias: Option<&'static str>,
    pub length: LengthRule,
    /// Numeric fields are canonical big-endian integers
    pub numeric: bool,
}

/// Number of fields in an unsigned transaction.
pub const UNSIGNED_FIELD_COUNT: usize = 6;

/// Number of fields in a signed transaction (`v`, `r`, `s` appended).
pub const SIGNED_FIELD_COUNT: usize = UNSIGNED_FIELD_COUNT + 3;

pub const NONCE: FieldSpec = FieldSpec {
    name: "nonce",
    alias: None,
    length: LengthRule::Max(32),
    numeric: true,
};

pub const GAS_PRICE: FieldSpec = FieldSpec {
    name: "gasPrice",
    alias: None,
    length: LengthRule::Max(32),
    numeric: true,
};

pub const GAS_LIMIT: FieldSpec = FieldSpec {
    name: "gasLimit",
    alias: Some("gas"),
    length: LengthRule::Max(32),
    numeric: true,
};

pub const TO: FieldSpec = FieldSpec {
    name: "to",
    alias: None,
    length: LengthRule::Fixed(20),
    numeric: false,
};

pub const VALUE: FieldSpec = FieldSpec {
    name: "value",
    alias: None,
    length: LengthRule::Max(32),
    numeric: true,
};

pub const DATA: FieldSpec = FieldSpec {
    name: "data",
    alias: None,
    length: LengthRule::Unbounded,
    numeric: false,
};

/// All transaction fields in wire order.
pub const TRANSACTION_FIELDS: [FieldSpec; UNSIGNED_FIELD_COUNT] =
    [NONCE, GAS_PRICE, GAS_LIMIT, TO, VALUE, DATA];

impl FieldSpec {
    /// Look up a field by its canonical name or its alias.
    pub fn find(key: &str) -> Option<&'static FieldSpec> {
        TRANSACTION_FIELDS
            .iter()
            .find(|spec| spec.name == key || spec.alias == Some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order() {
        let names: Vec<_> = TRANSACTION_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["nonce", "gasPrice", "gasLimit", "to", "value", "data"]
        );
    }

    #[test]
    fn test_find_by_alias() {
        assert_eq!(FieldSpec::find("gas"), Some(&GAS_LIMIT));
        assert_eq!(FieldSpec::find("gasLimit"), Some(&GAS_LIMIT));
        assert_eq!(FieldSpec::find("from"), None);
    }
}
