#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use logsift::api::{set_silent, SearchClient};
use logsift::models::AppState;
use logsift::store::LogJournal;
use tempfile::TempDir;

pub const SAMPLE_LOGS: &str = r#"{"timestamp":"2024-03-01T10:00:00Z","level":"info","code":200,"msg":"user login ok"}
{"timestamp":"2024-03-01T10:00:05Z","level":"error","code":500,"msg":"db timeout"}
{"timestamp":"2024-03-01T10:00:09Z","level":"info","code":200,"msg":"user logout"}
"#;

/// State backed by a fresh journal in a temp dir. Keep the `TempDir` alive
/// for the duration of the test.
pub async fn test_state(search_base_url: &str) -> (AppState, TempDir) {
    set_silent(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let journal = LogJournal::open(dir.path().join("logfile")).await.expect("journal");
    let client = SearchClient::new(search_base_url).expect("client");
    let state = AppState::from_journal(journal, client, String::new())
        .await
        .expect("state");
    (state, dir)
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub fn post(uri: &str, content_type: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.into()))
        .expect("request")
}

/// `form_session=<id>` from a Set-Cookie header, ready to send back.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("form_session="))
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}
