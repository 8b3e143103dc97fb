use portfolio_model::{ModelError, Record};
use serde_json::json;

fn make_record(value: serde_json::Value) -> Record {
    Record::from_value(value).unwrap()
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn from_value_accepts_object() {
    let r = make_record(json!({"id": "r-1", "title": "Hello"}));
    assert_eq!(r.id(), Some("r-1"));
    assert_eq!(r.fields().len(), 2);
}

#[test]
fn from_value_rejects_non_object() {
    let err = Record::from_value(json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, ModelError::InvalidRecord(_)));
    assert!(format!("{err}").contains("array"));
}

#[test]
fn record_without_id() {
    let r = make_record(json!({"title": "x"}));
    assert_eq!(r.id(), None);
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn get_str_returns_string_field() {
    let r = make_record(json!({"title": "Certificate", "count": 5}));
    assert_eq!(r.get_str("title"), Some("Certificate"));
    assert_eq!(r.get_str("count"), None);
    assert_eq!(r.get_str("missing"), None);
}

#[test]
fn get_bool_returns_boolean_field() {
    let r = make_record(json!({"done": true, "archived": false, "title": "x"}));
    assert_eq!(r.get_bool("done"), Some(true));
    assert_eq!(r.get_bool("archived"), Some(false));
    assert_eq!(r.get_bool("title"), None);
}

#[test]
fn get_number_returns_numeric_field() {
    let r = make_record(json!({"hours": 12, "score": 4.5}));
    assert_eq!(r.get_number("hours"), Some(12.0));
    assert_eq!(r.get_number("score"), Some(4.5));
}

#[test]
fn field_order_is_preserved() {
    let r = make_record(json!({"zeta": 1, "alpha": 2, "mid": 3}));
    let keys: Vec<&str> = r.fields().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn record_serializes_transparently() {
    let r = make_record(json!({"id": "r-1", "tags": ["a", "b"]}));
    let json = serde_json::to_string(&r).unwrap();
    assert_eq!(json, r#"{"id":"r-1","tags":["a","b"]}"#);

    let parsed: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, r);
}

#[test]
fn into_value_returns_object() {
    let r = make_record(json!({"id": "r-1"}));
    assert_eq!(r.into_value(), json!({"id": "r-1"}));
}
