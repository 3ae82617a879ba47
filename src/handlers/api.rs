use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::{AppState, SearchRequest};
use crate::store::process_log;

use super::helpers::status_text;

pub async fn hello() -> &'static str {
    "Hello, world!"
}

/// Ingest newline-delimited JSON logs. Lines are stored one at a time, so a
/// bad line leaves the lines before it ingested.
pub async fn ingest_logs(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(%e, "Rejected non-UTF-8 log body");
            return status_text(StatusCode::BAD_REQUEST, format!("Request body is not UTF-8: {}", e));
        }
    };
    let mut ingested = 0usize;
    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let doc = match process_log(line) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(%e, ingested, "Rejected log line");
                return status_text(StatusCode::BAD_REQUEST, format!("Couldn't parse JSON: {}", e));
            }
        };
        if let Err(e) = state.journal.append(line).await {
            tracing::error!(%e, "Failed to persist log line");
            return status_text(StatusCode::INTERNAL_SERVER_ERROR, format!("Unable to persist logs: {}", e));
        }
        state.store.push(doc);
        ingested += 1;
    }
    tracing::info!(ingested, total = state.store.len(), "Logs ingested");
    Json(json!({ "ingested": ingested })).into_response()
}

pub async fn search(State(state): State<AppState>, body: Bytes) -> Response {
    let request: SearchRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(%e, "Rejected search request");
            return status_text(StatusCode::BAD_REQUEST, format!("Couldn't parse JSON: {}", e));
        }
    };
    let results = state.store.search(&request);
    tracing::debug!(?request, hits = results.len(), "Search served");
    Json(results).into_response()
}
