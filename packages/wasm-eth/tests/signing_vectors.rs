//! Reference vectors for signing and recovery.
//!
//! Signed vectors were produced by a separate secp256k1/RFC6979 and RLP
//! implementation for the private key `0x46..46`.

use sha3::{Digest, Keccak256};
use wasm_eth::{
    recover, recover_signed, sign_fields, sign_hex, signing_hash, Address, PrivateKey,
    TransactionRecord, WasmEthError,
};

const KEY: &str = "0x4646464646464646464646464646464646464646464646464646464646464646";

/// nonce 9, gasPrice 20 gwei, gasLimit 21000, to 0x35.., value 1 ether, no data
const UNSIGNED_RLP: &str =
    "e9098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080";

const SIGNED_RAW: &str = "0xf86c098504a817c800825208943535353535353535353535353535353535353535\
    880de0b6b3a7640000801ba08383adc8b8ae116f918fb44ca7ff9dfd8012596a5c130c6246a2cc717ba41c\
    daa053ddfacf5bd4aa7e46d1575acf52636ea659b91f29e2fb91c75567a279738f38";

/// All fields zero except `to = 0x35..35`
const ZERO_FIELDS_SIGNED_RAW: &str = "0xf85d808080943535353535353535353535353535353535353535\
    80801ca0d7295ca117334a0c7f3ab86c911fe92b0c2e901e44b7c9d09cca5f1a124c1ec4a04b4d6fd806ef\
    80afc0737e9ae2a5c37e251bf4ddae6a82c43404d02b07a451c7";

fn reference_record() -> TransactionRecord {
    TransactionRecord::from_json_str(
        r#"{
            "nonce": 9,
            "gasPrice": "0x4a817c800",
            "gasLimit": "21000",
            "to": "0x3535353535353535353535353535353535353535",
            "value": "1000000000000000000"
        }"#,
    )
    .unwrap()
}

#[test]
fn test_unsigned_reference_encoding() {
    let expected = hex::decode(UNSIGNED_RLP).unwrap();
    let signed = sign_fields(&reference_record(), KEY).unwrap();
    assert_eq!(wasm_eth::codec::encode_list(signed.unsigned()), expected);
    assert_eq!(
        signing_hash(&reference_record()).unwrap().to_vec(),
        Keccak256::digest(&expected).to_vec()
    );
}

#[test]
fn test_signed_reference_vector() {
    assert_eq!(sign_hex(&reference_record(), KEY).unwrap(), SIGNED_RAW);
}

#[test]
fn test_signed_zero_fields_vector() {
    let record = TransactionRecord::from_json_str(
        r#"{
            "nonce": 0,
            "gasPrice": 0,
            "gasLimit": 0,
            "to": "0x3535353535353535353535353535353535353535",
            "value": 0,
            "data": ""
        }"#,
    )
    .unwrap();
    assert_eq!(sign_hex(&record, KEY).unwrap(), ZERO_FIELDS_SIGNED_RAW);
    assert_eq!(
        sign_hex(&TransactionRecord::new().with("to", vec![0x35; 20]), KEY).unwrap(),
        ZERO_FIELDS_SIGNED_RAW
    );
}

#[test]
fn test_reference_vector_recovers() {
    let signer = recover_signed(SIGNED_RAW).unwrap();
    assert_eq!(signer.address, PrivateKey::from_hex(KEY).unwrap().address());
}

#[test]
fn test_zero_gas_alias_keeps_gas_limit() {
    let with_zero_gas =
        TransactionRecord::from_json_str(r#"{"gas": 0, "gasLimit": 21000}"#).unwrap();
    let without_gas = TransactionRecord::from_json_str(r#"{"gasLimit": 21000}"#).unwrap();
    assert_eq!(
        sign_hex(&with_zero_gas, KEY).unwrap(),
        sign_hex(&without_gas, KEY).unwrap()
    );
}

#[test]
fn test_recovered_address_is_signer() {
    let raw = sign_hex(&reference_record(), KEY).unwrap();
    let signer = recover_signed(raw.as_str()).unwrap();
    assert_eq!(
        signer.address.to_checksum(),
        "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F"
    );
    assert_eq!(signer.address, PrivateKey::from_hex(KEY).unwrap().address());
}

#[test]
fn test_key_one_address() {
    let key = PrivateKey::from_hex(&format!("0x{:064x}", 1)).unwrap();
    assert_eq!(
        key.address(),
        Address::from_hex("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap()
    );
}

#[test]
fn test_zero_nonce_encodes_empty() {
    let record = TransactionRecord::from_json_str(r#"{"nonce": 0}"#).unwrap();
    let signed = sign_fields(&record, KEY).unwrap();
    assert!(signed.unsigned()[0].is_empty());
}

#[test]
fn test_short_to_is_rejected() {
    let record = TransactionRecord::from_json_str(r#"{"to": "0x00"}"#).unwrap();
    let err = sign_hex(&record, KEY).unwrap_err();
    assert_eq!(
        err,
        WasmEthError::InvalidFieldLength {
            field: "to",
            expected: 20,
            actual: 1
        }
    );
}

#[test]
fn test_oversized_value_is_rejected() {
    let value = format!("0x{}", "01".repeat(33));
    let record = TransactionRecord::from_json_str(&format!(r#"{{"value": "{}"}}"#, value)).unwrap();
    let err = sign_hex(&record, KEY).unwrap_err();
    assert!(matches!(
        err,
        WasmEthError::FieldTooLong {
            field: "value",
            max: 32,
            actual: 33
        }
    ));
}

#[test]
fn test_bad_key_and_bad_record() {
    assert!(matches!(
        sign_hex(&reference_record(), "not-a-key"),
        Err(WasmEthError::InvalidPrivateKey(_))
    ));
    assert!(matches!(
        TransactionRecord::from_json_str("[1, 2, 3]"),
        Err(WasmEthError::InvalidInput(_))
    ));
}

#[test]
fn test_recover_uses_first_six_fields_only() {
    let signed = sign_fields(&reference_record(), KEY).unwrap();
    let unsigned = hex::decode(UNSIGNED_RLP).unwrap();
    let from_unsigned = recover(&unsigned, signed.v().into(), signed.r(), signed.s()).unwrap();
    let from_signed = recover(&signed.to_rlp(), signed.v().into(), signed.r(), signed.s()).unwrap();
    assert_eq!(from_unsigned, from_signed);
}
