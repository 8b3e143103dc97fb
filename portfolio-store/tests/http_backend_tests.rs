use portfolio_model::FieldKind;
use portfolio_store::{FileStore, Filters, HttpBackend, HttpBackendConfig, RecordStore, StoreError};
use serde_json::{Map, Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(HttpBackendConfig {
        base_url: format!("{}/api", server.uri()),
        api_key: Some("secret-key".into()),
        timeout_secs: 5,
    })
    .unwrap()
}

// ── Config ──────────────────────────────────────────────────────

#[test]
fn config_default() {
    let cfg = HttpBackendConfig::default();
    assert_eq!(cfg.base_url, "http://localhost:8080/api");
    assert!(cfg.api_key.is_none());
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn config_partial_uses_defaults() {
    let cfg: HttpBackendConfig = serde_json::from_value(json!({"base_url": "https://x"})).unwrap();
    assert_eq!(cfg.base_url, "https://x");
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn empty_base_url_rejected() {
    let result = HttpBackend::new(HttpBackendConfig {
        base_url: "  ".into(),
        ..Default::default()
    });
    assert!(matches!(result, Err(StoreError::Config(_))));
}

// ── Schema ──────────────────────────────────────────────────────

#[tokio::test]
async fn schema_is_parsed_in_declaration_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Certificate/schema"))
        .and(header("authorization", "Bearer secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "properties": {
                "title": {"type": "string"},
                "level": {"type": "string", "enum": ["Basic", "Advanced"]}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let schema = backend_for(&server).schema("Certificate").await.unwrap();
    assert_eq!(schema.record_type, "Certificate");
    assert_eq!(schema.fields[0].name, "title");
    assert_eq!(schema.fields[1].kind, FieldKind::Enumerated);
}

#[tokio::test]
async fn schema_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Ghost/schema"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = backend_for(&server).schema("Ghost").await.unwrap_err();
    assert!(err.is_not_found());
}

// ── List ────────────────────────────────────────────────────────

#[tokio::test]
async fn list_sends_filters_as_json_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Certificate"))
        .and(query_param("q", r#"{"level":"Advanced"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "c2", "level": "Advanced"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut filters = Filters::new();
    filters.insert("level".into(), Value::String("Advanced".into()));
    let records = backend_for(&server)
        .list("Certificate", &filters)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), Some("c2"));
}

#[tokio::test]
async fn list_server_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Certificate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .list("Certificate", &Filters::new())
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(format!("{err}").contains("503"));
}

#[tokio::test]
async fn list_rejects_non_object_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Certificate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2])))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .list("Certificate", &Filters::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Model(_)));
}

#[tokio::test]
async fn unreachable_backend_is_transport() {
    let backend = HttpBackend::new(HttpBackendConfig {
        base_url: "http://127.0.0.1:9/api".into(),
        api_key: None,
        timeout_secs: 2,
    })
    .unwrap();
    let err = backend.list("Certificate", &Filters::new()).await.unwrap_err();
    assert!(err.is_transport());
}

// ── Create / update / delete ────────────────────────────────────

#[tokio::test]
async fn create_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/entities/Evidence"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ev-1", "title": "Award"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut data = Map::new();
    data.insert("title".into(), json!("Award"));
    let record = backend_for(&server).create("Evidence", data).await.unwrap();
    assert_eq!(record.id(), Some("ev-1"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"title": "Award"}));
}

#[tokio::test]
async fn update_puts_to_record_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/entities/TeacherProfile/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p-1", "full_name": "Sara"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = backend_for(&server)
        .update("TeacherProfile", "p-1", Map::new())
        .await
        .unwrap();
    assert_eq!(record.get_str("full_name"), Some("Sara"));
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/entities/Evidence/ev-9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .delete("Evidence", "ev-9")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ── Upload ──────────────────────────────────────────────────────

#[tokio::test]
async fn upload_returns_file_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/integrations/upload-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_url": "https://cdn.example/cert.pdf"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploaded = backend_for(&server)
        .upload("cert.pdf", b"%PDF-1.4".to_vec())
        .await
        .unwrap();
    assert_eq!(uploaded.file_url, "https://cdn.example/cert.pdf");
}
