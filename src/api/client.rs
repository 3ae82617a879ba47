use serde::Deserialize;
use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::SearchRequest;

use super::error::ClientError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Print the request as an equivalent curl command.
fn log_curl(method: &str, url: &str, content_type: &str, body: Option<&str>) {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));
    if let Some(b) = body {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new(format!("'Content-Type: {}'", content_type)).fg(yansi::Color::Magenta)
        ));
        let escaped = truncate_for_log(b, 512).replace('\'', "'\\''");
        parts.push(format!("{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped)).fg(yansi::Color::White)
        ));
    }
    log_output(format!("Request:\n{}", parts.join(" ")));
}

fn log_response(body: &str) {
    // Grayed out so it reads as secondary output
    log_output(format!("Response:\n{}", Paint::new(body).rgb(100, 100, 100)));
}

/// Cap long request bodies (bulk ingests) in the curl log.
fn truncate_for_log(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[derive(Deserialize)]
struct IngestResponse {
    ingested: usize,
}

/// Client for a logsift server's JSON API.
#[derive(Clone, Debug)]
pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("logsift/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: crate::config::sanitize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// POST a search and return the result items.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Value>, ClientError> {
        let url = self.url("/api/search");
        let body = serde_json::to_string(request)?;
        log_curl("POST", &url, "application/json", Some(&body));

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let text = checked_body(resp).await?;
        log_response(&text);
        Ok(serde_json::from_str::<Vec<Value>>(&text)?)
    }

    /// POST newline-delimited JSON logs; returns how many the server stored.
    pub async fn ingest(&self, ndjson: String) -> Result<usize, ClientError> {
        let url = self.url("/api/logs");
        log_curl("POST", &url, "application/x-ndjson", Some(&ndjson));

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(ndjson)
            .send()
            .await?;
        let text = checked_body(resp).await?;
        log_response(&text);
        Ok(serde_json::from_str::<IngestResponse>(&text)?.ingested)
    }

    pub async fn hello(&self) -> Result<String, ClientError> {
        let url = self.url("/api/hello");
        log_curl("GET", &url, "", None);
        let resp = self.client.get(&url).send().await?;
        let text = checked_body(resp).await?;
        log_response(&text);
        Ok(text)
    }
}

async fn checked_body(resp: reqwest::Response) -> Result<String, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_sanitized() {
        let client = SearchClient::new("http://example.test:9000/ ").unwrap();
        assert_eq!(client.base_url(), "http://example.test:9000");
        assert_eq!(client.url("/api/search"), "http://example.test:9000/api/search");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_for_log("short", 512), "short");
        assert_eq!(truncate_for_log("aé", 2), "a...");
    }
}
