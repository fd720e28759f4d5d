use docstamp_types::{ObjectId, unique_string};
use std::collections::HashSet;
use std::str::FromStr;

// ── ObjectId ──────────────────────────────────────────────────────

#[test]
fn object_id_default_is_zero() {
    let id = ObjectId::default();
    assert!(id.is_zero());
    assert_eq!(id, ObjectId::ZERO);
}

#[test]
fn object_id_new_is_not_zero() {
    assert!(!ObjectId::new().is_zero());
}

#[test]
fn object_id_new_is_unique() {
    let a = ObjectId::new();
    let b = ObjectId::new();
    assert_ne!(a, b);
}

#[test]
fn object_id_new_is_time_ordered() {
    let a = ObjectId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let b = ObjectId::new();
    assert!(a < b);
}

#[test]
fn object_id_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::now_v7();
    let id = ObjectId::from_uuid(uuid);
    assert_eq!(id.as_uuid(), uuid);
}

#[test]
fn object_id_display_and_parse() {
    let id = ObjectId::new();
    let parsed = ObjectId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn object_id_from_str() {
    let id = ObjectId::new();
    let parsed = ObjectId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn object_id_parse_invalid() {
    assert!(ObjectId::parse("not-an-id").is_err());
    assert!(ObjectId::from_str("garbage").is_err());
}

#[test]
fn object_id_parse_error_maps_to_crate_error() {
    let err = ObjectId::parse("nope").unwrap_err();
    assert!(err.to_string().contains("invalid object id"));
}

#[test]
fn object_id_serde_is_transparent() {
    let id = ObjectId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let back: ObjectId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn object_id_hash_and_eq() {
    let id = ObjectId::new();
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id);
    assert_eq!(set.len(), 1);
}

// ── unique_string ─────────────────────────────────────────────────

#[test]
fn unique_string_is_non_empty_uuid_text() {
    let s = unique_string();
    assert_eq!(s.len(), 36);
    assert!(uuid::Uuid::parse_str(&s).is_ok());
}

#[test]
fn unique_string_does_not_repeat() {
    let all: HashSet<String> = (0..500).map(|_| unique_string()).collect();
    assert_eq!(all.len(), 500);
}
