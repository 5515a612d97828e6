use std::path::Path;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use firebase_tokencreator::{
    config::FirebaseClientConfig,
    server::{router, template::CONFIG_PLACEHOLDER, TEMPLATE_FILE},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn firebase_config() -> FirebaseClientConfig {
    FirebaseClientConfig {
        api_key: "AIzaSyTestKey".to_string(),
        auth_domain: "demo-project.firebaseapp.com".to_string(),
        project_id: "demo-project".to_string(),
        storage_bucket: "demo-project.appspot.com".to_string(),
        messaging_sender_id: "123456789012".to_string(),
        app_id: "1:123456789012:web:abcdef123456".to_string(),
    }
}

fn app_with_template(dir: &Path, template: &str) -> Router {
    std::fs::write(dir.join(TEMPLATE_FILE), template).unwrap();
    router(firebase_config(), dir)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    (status, content_type, body)
}

fn injected_config(html: &str) -> Value {
    let start = html.find("const firebaseConfig = ").unwrap() + "const firebaseConfig = ".len();
    let end = start + html[start..].find("};").unwrap() + 1;
    serde_json::from_str(&html[start..end]).unwrap()
}

#[tokio::test]
async fn index_injects_client_config() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_template(
        dir.path(),
        "<html><script>\nconst firebaseConfig = __FIREBASE_CONFIG__;\n</script></html>",
    );

    let (status, content_type, body) = get(app, "/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(!html.contains(CONFIG_PLACEHOLDER));
    assert_eq!(
        injected_config(&html),
        json!({
            "apiKey": "AIzaSyTestKey",
            "authDomain": "demo-project.firebaseapp.com",
            "projectId": "demo-project",
            "storageBucket": "demo-project.appspot.com",
            "messagingSenderId": "123456789012",
            "appId": "1:123456789012:web:abcdef123456",
        })
    );
}

#[tokio::test]
async fn shipped_page_has_a_single_placeholder() {
    let static_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
    let template = std::fs::read_to_string(static_dir.join(TEMPLATE_FILE)).unwrap();
    assert_eq!(template.matches(CONFIG_PLACEHOLDER).count(), 1);

    let (status, _, body) = get(router(firebase_config(), &static_dir), "/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(injected_config(&html)["projectId"], "demo-project");
}

#[tokio::test]
async fn index_fails_with_500_when_template_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(firebase_config(), dir.path());

    let (status, content_type, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, b"Internal Server Error");
}

#[tokio::test]
async fn index_fails_with_500_when_placeholder_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_template(dir.path(), "<script>const firebaseConfig = {};</script>");

    let (status, _, _) = get(app, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_project_and_auth_domain() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(firebase_config(), dir.path());

    let (status, content_type, body) = get(app, "/health").await;
    let health: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/json"));
    assert_eq!(health["status"], "OK");
    assert_eq!(
        health["firebase"],
        json!({ "projectId": "demo-project", "authDomain": "demo-project.firebaseapp.com" })
    );

    let timestamp = health["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn api_config_is_stable_across_concurrent_requests() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(firebase_config(), dir.path());

    let (first, second) = tokio::join!(get(app.clone(), "/api/config"), get(app, "/api/config"));

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);
    assert_eq!(first.2, second.2);

    let body: Value = serde_json::from_slice(&first.2).unwrap();
    assert_eq!(body["firebase"], serde_json::to_value(firebase_config()).unwrap());
    assert_eq!(
        body["note"],
        "This endpoint is for debugging. Remove in production."
    );
}

#[tokio::test]
async fn serves_other_files_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("styles.css"), "body { color: red; }").unwrap();
    let app = router(firebase_config(), dir.path());

    let (status, content_type, body) = get(app.clone(), "/styles.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/css"));
    assert_eq!(body, b"body { color: red; }");

    let (status, _, _) = get(app, "/does-not-exist.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
