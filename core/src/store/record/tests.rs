use super::*;
use serde::Deserialize;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    name: String,
    count: u32,
}

#[test]
fn test_encode_prefixes_version() {
    let bytes = encode(&Sample {
        name: "x".to_string(),
        count: 1,
    })
    .unwrap();

    assert_eq!(bytes[0], RECORD_VERSION);
}

#[test]
fn test_decode_encoded() {
    let sample = Sample {
        name: "Haus".to_string(),
        count: 3,
    };
    let bytes = encode(&sample).unwrap();

    let decoded: Sample = decode(RepositoryId::from_raw(1), &bytes).unwrap();
    assert_eq!(decoded, sample);
}

#[test]
fn test_decode_empty_record() {
    let result = decode::<Sample>(RepositoryId::from_raw(1), &[]);
    assert!(matches!(result, Err(StoreError::EmptyRecord(_))));
}

#[test]
fn test_decode_unknown_version() {
    let result = decode::<Sample>(RepositoryId::from_raw(1), &[99, 0, 0]);
    assert!(matches!(
        result,
        Err(StoreError::UnsupportedVersion { version: 99, .. })
    ));
}
