use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::config::DEFAULT_SEARCH_LIMIT;
use crate::models::SearchRequest;

use super::document::LogDocument;

/// Thread-safe in-memory store of ingested log documents, kept in
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct LogStore {
    inner: Arc<Mutex<Vec<LogDocument>>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, doc: LogDocument) {
        self.inner.lock().unwrap().push(doc);
    }

    pub fn extend<I: IntoIterator<Item = LogDocument>>(&self, docs: I) {
        self.inner.lock().unwrap().extend(docs);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return one page of documents matching every filter and search term.
    pub fn search(&self, request: &SearchRequest) -> Vec<LogDocument> {
        let limit = request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let page = request.page.unwrap_or(0);
        let skip = page.saturating_mul(limit);

        let docs = self.inner.lock().unwrap();
        docs.iter()
            .filter(|doc| matches(doc, request))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Filters require equality; search terms require a substring match but
/// only constrain fields that hold strings.
pub fn matches(doc: &LogDocument, request: &SearchRequest) -> bool {
    for (key, expected) in &request.filters {
        match doc.get(key) {
            Some(actual) if values_equal(actual, expected) => {}
            _ => return false,
        }
    }
    for (key, needle) in &request.searches {
        if let Some(Value::String(haystack)) = doc.get(key) {
            if !haystack.contains(needle.as_str()) {
                return false;
            }
        }
    }
    true
}

/// JSON equality with numbers compared by value, so `30` equals `30.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(fx), Some(fy)) => fx == fy,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(k, x)| ys.get(k).map_or(false, |y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> LogDocument {
        v.as_object().cloned().unwrap()
    }

    fn seeded() -> LogStore {
        let store = LogStore::new();
        store.push(doc(json!({"timestamp": "t1", "level": "info", "code": 200, "msg": "user login ok"})));
        store.push(doc(json!({"timestamp": "t2", "level": "error", "code": 500, "msg": "db timeout"})));
        store.push(doc(json!({"timestamp": "t3", "level": "info", "code": 200.0, "msg": "user logout"})));
        store.push(doc(json!({"timestamp": "t4", "level": "warn", "code": "200", "msg": 7})));
        store
    }

    fn request(filters: Value, searches: Value) -> SearchRequest {
        serde_json::from_value(json!({"filters": filters, "searches": searches})).unwrap()
    }

    #[test]
    fn empty_request_returns_everything_up_to_default_limit() {
        let store = seeded();
        assert_eq!(store.search(&SearchRequest::default()).len(), 4);
    }

    #[test]
    fn filters_compare_numbers_by_value_and_keep_types_apart() {
        let store = seeded();
        let hits = store.search(&request(json!({"code": 200}), json!({})));
        let stamps: Vec<_> = hits.iter().map(|d| d["timestamp"].clone()).collect();
        assert_eq!(stamps, vec![json!("t1"), json!("t3")]);

        let hits = store.search(&request(json!({"code": "200"}), json!({})));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["timestamp"], json!("t4"));
    }

    #[test]
    fn filter_on_missing_field_matches_nothing() {
        let store = seeded();
        assert!(store.search(&request(json!({"host": "a"}), json!({}))).is_empty());
    }

    #[test]
    fn searches_match_substrings_and_skip_non_strings() {
        let store = seeded();
        let hits = store.search(&request(json!({}), json!({"msg": "user"})));
        let stamps: Vec<_> = hits.iter().map(|d| d["timestamp"].clone()).collect();
        // t4 carries a numeric msg, which search terms do not constrain
        assert_eq!(stamps, vec![json!("t1"), json!("t3"), json!("t4")]);
    }

    #[test]
    fn filters_and_searches_combine() {
        let store = seeded();
        let hits = store.search(&request(json!({"level": "info"}), json!({"msg": "logout"})));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["timestamp"], json!("t3"));
    }

    #[test]
    fn pagination_skips_whole_pages_of_matches() {
        let store = LogStore::new();
        for i in 0..5 {
            store.push(doc(json!({"timestamp": format!("t{}", i), "n": i})));
        }
        let page = |p, l| store.search(&SearchRequest::default().with_page(Some(p), Some(l)));
        assert_eq!(page(0, 2).len(), 2);
        assert_eq!(page(1, 2)[0]["n"], json!(2));
        assert_eq!(page(2, 2).len(), 1);
        assert!(page(3, 2).is_empty());
        assert!(page(0, 0).is_empty());
    }
}
