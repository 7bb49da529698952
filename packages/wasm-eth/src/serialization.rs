//! Module containing serialization helpers.

/// Dynamic byte array serialization as `0x`-prefixed hex.
pub mod bytes {
    use serde::ser::Serializer;

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Wrapper {
        #[serde(with = "super::bytes")]
        data: Vec<u8>,
    }

    #[test]
    fn test_bytes_json() {
        let wrapper = Wrapper {
            data: vec![0x00, 0xab],
        };
        let json = serde_json::to_string(&wrapper).unwrap();
        assert_eq!(json, r#"{"data":"0x00ab"}"#);
    }

    #[test]
    fn test_empty_bytes_json() {
        let json = serde_json::to_string(&Wrapper { data: vec![] }).unwrap();
        assert_eq!(json, r#"{"data":"0x"}"#);
    }
}
