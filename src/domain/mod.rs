//! Domain layer - permission model, key ring, and store abstraction

pub mod auth;
pub mod datastore;
pub mod error;

pub use auth::{
    permissions_for_level, required_permission, ApiKeyEntry, AuthorizationDecision, KeyRing,
    Level, Permission, PermissionSet,
};
pub use datastore::{Datastore, JsonRow, SqlValue};
pub use error::DomainError;
