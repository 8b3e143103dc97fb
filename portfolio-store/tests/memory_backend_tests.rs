use portfolio_model::{FieldDescriptor, Record, RecordSchema};
use portfolio_store::{FileStore, Filters, MemoryBackend, RecordStore, StoreError};
use serde_json::{Map, Value, json};
use std::io::Write;

fn certificate_fixture() -> Value {
    json!({
        "schemas": {
            "Certificate": {
                "properties": {
                    "title": {"type": "string", "description": "العنوان"},
                    "issued_on": {"type": "string", "format": "date"},
                    "level": {"type": "string", "enum": ["Basic", "Advanced"]},
                    "hours": {"type": "number"},
                    "tags": {"type": "array"}
                }
            }
        },
        "records": {
            "Certificate": [
                {"id": "c1", "title": "Classroom Management", "issued_on": "2026-01-10", "level": "Basic", "hours": 10, "tags": ["leadership"]},
                {"id": "c2", "title": "Digital Classroom", "issued_on": "2026-02-11", "level": "Advanced", "hours": 20, "tags": []},
                {"id": "c3", "title": "Assessment Design", "issued_on": "2026-02-20", "level": "advanced", "hours": 20, "tags": ["assessment"]}
            ]
        }
    })
}

fn filters(pairs: &[(&str, &str)]) -> Filters {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().filter_map(Record::id).collect()
}

// ── Fixture loading ─────────────────────────────────────────────

#[tokio::test]
async fn fixture_registers_schema_and_records() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let schema = store.schema("Certificate").await.unwrap();
    assert_eq!(schema.fields.len(), 5);
    assert_eq!(schema.fields[0].name, "title");

    let all = store.list("Certificate", &Filters::new()).await.unwrap();
    assert_eq!(ids(&all), vec!["c1", "c2", "c3"]);
}

#[tokio::test]
async fn fixture_records_without_schema_get_empty_schema() {
    let store = MemoryBackend::from_fixture(json!({
        "records": {"Note": [{"id": "n1", "body": "x"}]}
    }))
    .unwrap();
    assert!(store.schema("Note").await.unwrap().fields.is_empty());
    assert_eq!(store.list("Note", &Filters::new()).await.unwrap().len(), 1);
}

#[test]
fn fixture_file_roundtrip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", certificate_fixture()).unwrap();
    assert!(MemoryBackend::from_fixture_file(file.path()).is_ok());
}

#[test]
fn fixture_file_missing_is_io_error() {
    let err = MemoryBackend::from_fixture_file(std::path::Path::new("/no/such/fixture.json"))
        .err()
        .unwrap();
    assert!(matches!(err, StoreError::Io(_)));
}

// ── Unknown types ───────────────────────────────────────────────

#[tokio::test]
async fn unknown_type_is_not_found() {
    let store = MemoryBackend::new();
    let err = store.schema("Ghost").await.unwrap_err();
    assert!(err.is_not_found());
    let err = store.list("Ghost", &Filters::new()).await.unwrap_err();
    assert!(err.is_not_found());
    let err = store.create("Ghost", Map::new()).await.unwrap_err();
    assert!(err.is_not_found());
}

// ── Filtering ───────────────────────────────────────────────────

#[tokio::test]
async fn enumerated_filter_is_exact_and_case_sensitive() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let found = store
        .list("Certificate", &filters(&[("level", "Advanced")]))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec!["c2"]);
}

#[tokio::test]
async fn text_filter_is_case_insensitive_substring() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let found = store
        .list("Certificate", &filters(&[("title", "classroom")]))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec!["c1", "c2"]);
}

#[tokio::test]
async fn number_filter_coerces_string_constraint() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let found = store
        .list("Certificate", &filters(&[("hours", "20")]))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec!["c2", "c3"]);

    let none = store
        .list("Certificate", &filters(&[("hours", "twenty")]))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn date_and_array_filters() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let by_date = store
        .list("Certificate", &filters(&[("issued_on", "2026-02-11")]))
        .await
        .unwrap();
    assert_eq!(ids(&by_date), vec!["c2"]);

    let by_tag = store
        .list("Certificate", &filters(&[("tags", "assessment")]))
        .await
        .unwrap();
    assert_eq!(ids(&by_tag), vec!["c3"]);
}

#[tokio::test]
async fn filters_combine_with_and() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let found = store
        .list("Certificate", &filters(&[("hours", "20"), ("title", "digital")]))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec!["c2"]);
}

#[tokio::test]
async fn missing_field_never_matches() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let found = store
        .list("Certificate", &filters(&[("nonexistent", "x")]))
        .await
        .unwrap();
    assert!(found.is_empty());
}

// ── CRUD ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_stamps_built_in_fields() {
    let store = MemoryBackend::new().with_user("sara@school.example");
    store
        .register_schema(RecordSchema::new("Note", vec![FieldDescriptor::text("body")]))
        .await;

    let mut data = Map::new();
    data.insert("body".into(), json!("hello"));
    data.insert("id".into(), json!("forged"));
    let record = store.create("Note", data).await.unwrap();

    assert_ne!(record.id(), Some("forged"));
    assert_eq!(record.get_str("created_by"), Some("sara@school.example"));
    let created = record.get_str("created_date").unwrap();
    assert!(created.contains('T') && created.ends_with('Z'));
    assert_eq!(record.get_str("body"), Some("hello"));
}

#[tokio::test]
async fn update_merges_fields() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let mut data = Map::new();
    data.insert("hours".into(), json!(12));
    let updated = store.update("Certificate", "c1", data).await.unwrap();
    assert_eq!(updated.get_number("hours"), Some(12.0));
    assert_eq!(updated.get_str("title"), Some("Classroom Management"));
    assert!(updated.get_str("updated_date").is_some());
}

#[tokio::test]
async fn update_missing_record_is_not_found() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    let err = store.update("Certificate", "zzz", Map::new()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_removes_record() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    store.delete("Certificate", "c2").await.unwrap();
    let all = store.list("Certificate", &Filters::new()).await.unwrap();
    assert_eq!(ids(&all), vec!["c1", "c3"]);
    assert!(store.delete("Certificate", "c2").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn seed_unknown_type_fails() {
    let store = MemoryBackend::new();
    assert!(store.seed("Ghost", vec![]).await.is_err());
}

// ── Connectivity ────────────────────────────────────────────────

#[tokio::test]
async fn offline_backend_reports_transport_errors() {
    let store = MemoryBackend::from_fixture(certificate_fixture()).unwrap();
    store.set_offline(true);
    let err = store.list("Certificate", &Filters::new()).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(store.list_calls(), 1);

    store.set_offline(false);
    assert!(store.list("Certificate", &Filters::new()).await.is_ok());
    assert_eq!(store.list_calls(), 2);
}

// ── Files ───────────────────────────────────────────────────────

#[tokio::test]
async fn upload_stores_bytes() {
    let store = MemoryBackend::new();
    let uploaded = store.upload("cert.pdf", b"%PDF".to_vec()).await.unwrap();
    assert!(uploaded.file_url.starts_with("memory://files/"));
    assert!(uploaded.file_url.ends_with("/cert.pdf"));
    assert_eq!(store.file(&uploaded.file_url).await.unwrap(), b"%PDF");
}
