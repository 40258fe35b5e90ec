use std::collections::HashMap;

use ndlm_core::{stable_hash_string, to_canonical_json_bytes, SchemaVersion};

#[test]
fn object_keys_are_sorted() {
    let mut map = HashMap::new();
    map.insert("zeta", 1);
    map.insert("alpha", 2);
    map.insert("mid", 3);
    let bytes = to_canonical_json_bytes(&map).expect("encode");
    assert_eq!(
        String::from_utf8(bytes).expect("utf8"),
        r#"{"alpha":2,"mid":3,"zeta":1}"#
    );
}

#[test]
fn hash_is_stable_and_content_sensitive() {
    let a = stable_hash_string(&SchemaVersion::new(1, 0, 0)).expect("hash");
    let b = stable_hash_string(&SchemaVersion::new(1, 0, 0)).expect("hash");
    let c = stable_hash_string(&SchemaVersion::new(1, 1, 0)).expect("hash");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 64);
}

#[test]
fn non_finite_floats_encode_as_null() {
    let bytes = to_canonical_json_bytes(&vec![1.5, f64::INFINITY]).expect("encode");
    assert_eq!(String::from_utf8(bytes).expect("utf8"), "[1.5,null]");
}

#[test]
fn schema_version_reads_back() {
    let bytes = to_canonical_json_bytes(&SchemaVersion::new(1, 2, 3)).expect("encode");
    assert_eq!(bytes, br#"{"major":1,"minor":2,"patch":3}"#.to_vec());
    let decoded: SchemaVersion = serde_json::from_slice(&bytes).expect("decode");
    assert_eq!(decoded, SchemaVersion::new(1, 2, 3));
}

#[test]
fn schema_versions_display_and_order() {
    let current = SchemaVersion::new(1, 2, 0);
    assert_eq!(current.to_string(), "1.2.0");
    assert!(current > SchemaVersion::new(1, 1, 4));
    assert!(current < SchemaVersion::new(2, 0, 0));
}
