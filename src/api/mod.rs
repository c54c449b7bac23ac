//! API layer - pipeline, routing, middleware, and endpoint handlers

pub mod envelope;
pub mod info;
pub mod middleware;
pub mod pipeline;
pub mod routing;
pub mod state;
pub mod types;
pub mod v1;

pub use pipeline::app;
pub use state::AppState;
