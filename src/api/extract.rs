//! Request extractors
//!
//! Pagination query parameters and helpers shared by the list endpoints.

use serde::Deserialize;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

/// Pagination query parameters (`?page=2&per_page=50`)
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Pagination {
    /// Page clamped to a sane lower bound
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Page size clamped into 1..=100
    pub fn per_page(&self) -> i64 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    /// SQL offset for the clamped page
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 20);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_pagination_clamping() {
        let pagination = Pagination { page: 0, per_page: 1000 };
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 100);

        let pagination = Pagination { page: -5, per_page: 0 };
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 1);
    }

    #[test]
    fn test_pagination_offset() {
        let pagination = Pagination { page: 3, per_page: 25 };
        assert_eq!(pagination.offset(), 50);
    }

    #[test]
    fn test_pagination_query_deserialization() {
        let pagination: Pagination = serde_urlencoded_like("page=2&per_page=50");
        assert_eq!(pagination.page(), 2);
        assert_eq!(pagination.per_page(), 50);

        let pagination: Pagination = serde_urlencoded_like("");
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 20);
    }

    fn serde_urlencoded_like(query: &str) -> Pagination {
        // serde_json stands in for the query deserializer in unit tests
        let mut map = serde_json::Map::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            if let Some((key, value)) = pair.split_once('=') {
                map.insert(key.to_string(), serde_json::json!(value.parse::<i64>().unwrap()));
            }
        }
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }
}
