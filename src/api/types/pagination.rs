//! Pagination query parameters

use std::collections::HashMap;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;

/// `limit`/`offset` pair decoded from the query string. Values that fail to
/// parse fall back to the defaults; `limit` is clamped to `1..=MAX_LIMIT`
/// and `offset` to non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub limit: i64,
    pub offset: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageParams {
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let limit = query
            .get("limit")
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        let offset = query
            .get("offset")
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or(0)
            .max(0);

        Self { limit, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let page = PageParams::from_query(&HashMap::new());
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_explicit_values() {
        let page = PageParams::from_query(&query(&[("limit", "10"), ("offset", "30")]));
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 30);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(
            PageParams::from_query(&query(&[("limit", "9999")])).limit,
            MAX_LIMIT
        );
        assert_eq!(PageParams::from_query(&query(&[("limit", "0")])).limit, 1);
        assert_eq!(PageParams::from_query(&query(&[("limit", "-5")])).limit, 1);
    }

    #[test]
    fn test_negative_offset_is_floored() {
        assert_eq!(
            PageParams::from_query(&query(&[("offset", "-10")])).offset,
            0
        );
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let page = PageParams::from_query(&query(&[("limit", "ten"), ("offset", "x")]));
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);
    }
}
