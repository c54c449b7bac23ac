//! Raw query endpoint payload

use serde::Deserialize;

/// Body for `POST /v1/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub sql: String,
}

impl QueryRequest {
    /// Only a single SELECT statement may pass through.
    pub fn validate(&self) -> Result<(), String> {
        let sql = self.sql.trim();
        if sql.is_empty() {
            return Err("sql must not be empty".to_string());
        }
        if !sql.to_ascii_lowercase().starts_with("select") {
            return Err("only SELECT statements are allowed".to_string());
        }

        let body = sql.strip_suffix(';').unwrap_or(sql);
        if body.contains(';') {
            return Err("multiple statements are not allowed".to_string());
        }
        Ok(())
    }

    /// Statement text with any trailing semicolon removed.
    pub fn statement(&self) -> &str {
        self.sql.trim().trim_end_matches(';').trim_end()
    }
}
