use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/search`.
///
/// `filters` values are compared for equality against document fields, so
/// they keep their JSON type (the form sends numbers for integer-looking
/// input). `searches` are substring needles and are always strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub filters: Map<String, Value>,
    #[serde(default)]
    pub searches: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn with_page(mut self, page: Option<usize>, limit: Option<usize>) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_request_serializes_to_bare_maps() {
        let body = serde_json::to_value(SearchRequest::default()).unwrap();
        assert_eq!(body, json!({"filters": {}, "searches": {}}));
    }

    #[test]
    fn missing_maps_default_to_empty() {
        let req: SearchRequest = serde_json::from_str(r#"{"limit": 5}"#).unwrap();
        assert!(req.filters.is_empty());
        assert!(req.searches.is_empty());
        assert_eq!(req.limit, Some(5));
        assert_eq!(req.page, None);
    }

    #[test]
    fn rejects_non_string_search_values() {
        let res = serde_json::from_str::<SearchRequest>(r#"{"searches": {"msg": 3}}"#);
        assert!(res.is_err());
    }
}
