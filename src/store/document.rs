use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::error::LogError;

/// A stored log record: a JSON object with a canonical `timestamp`.
pub type LogDocument = Map<String, Value>;

pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Parse one ingested line into a document.
///
/// The line must be a JSON object carrying a string `timestamp` in RFC 3339
/// form. The timestamp is rewritten in UTC so that equal instants compare
/// equal as strings.
pub fn process_log(line: &str) -> Result<LogDocument, LogError> {
    let value: Value = serde_json::from_str(line)?;
    let mut doc = match value {
        Value::Object(map) => map,
        _ => return Err(LogError::NotAnObject),
    };

    let raw = match doc.get(TIMESTAMP_FIELD) {
        None | Some(Value::Null) => return Err(LogError::MissingTimestamp),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(LogError::NonStringTimestamp),
    };

    let parsed = DateTime::parse_from_rfc3339(&raw)
        .map_err(|source| LogError::InvalidTimestamp { raw: raw.clone(), source })?;
    let canonical = parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true);
    doc.insert(TIMESTAMP_FIELD.to_string(), Value::String(canonical));

    Ok(doc)
}
