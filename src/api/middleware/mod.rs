//! Request middleware: authentication and logging

pub mod auth;
pub mod logging;

pub use auth::Authenticator;
