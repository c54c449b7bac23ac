//! Wire types: errors, request payloads, and pagination

pub mod error;
pub mod game;
pub mod pagination;
pub mod play;
pub mod query;

pub use error::ApiError;
pub use game::{CreateGameRequest, UpdateGameRequest};
pub use pagination::PageParams;
pub use play::{CreatePlayRequest, PlayerEntry};
pub use query::QueryRequest;

use serde::de::DeserializeOwned;

/// Decode a JSON request body, mapping failures to a 400 envelope.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        ApiError::bad_request("VALIDATION_ERROR", format!("Invalid JSON body: {}", err))
    })
}
