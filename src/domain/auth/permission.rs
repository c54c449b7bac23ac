//! Permission and access-level model
//!
//! A key's configured level expands to a fixed permission set, and every
//! (method, path) pair resolves to the single permission it requires. The
//! two mappings are independent: registering a new route does not require
//! touching `required_permission`, but the route table and this module must
//! stay consistent by convention.

use std::collections::HashSet;
use std::fmt;

use axum::http::Method;
use serde::{Deserialize, Serialize};

/// Capability required to perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Write,
    Delete,
    Export,
    Query,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::Delete => write!(f, "delete"),
            Self::Export => write!(f, "export"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// Named permission bundle assignable to an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Admin,
    User,
    ReadOnly,
}

impl Level {
    /// Case-insensitive lookup; accepts both `read-only` and `readonly`.
    /// Unrecognized input is `None`, never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            "read-only" | "readonly" => Some(Self::ReadOnly),
            _ => None,
        }
    }

    /// Total mapping from level to its permission set. The sets are built
    /// explicitly per level rather than by inheritance.
    pub fn permissions(self) -> PermissionSet {
        match self {
            Self::Admin => PermissionSet::full(),
            Self::User => [Permission::Read, Permission::Write].into_iter().collect(),
            Self::ReadOnly => [Permission::Read].into_iter().collect(),
        }
    }
}

/// Set of permissions held by a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// All five permissions.
    pub fn full() -> Self {
        [
            Permission::Read,
            Permission::Write,
            Permission::Delete,
            Permission::Export,
            Permission::Query,
        ]
        .into_iter()
        .collect()
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Permission set granted to a level string; unknown levels resolve to the
/// empty set.
pub fn permissions_for_level(level: &str) -> PermissionSet {
    Level::parse(level)
        .map(Level::permissions)
        .unwrap_or_default()
}

/// Permission an endpoint requires, derived from method and path alone.
///
/// Methods outside the matched set fall back to requiring `read`.
pub fn required_permission(method: &Method, path: &str) -> Permission {
    match method.as_str() {
        "GET" if path == "/v1/export" => Permission::Export,
        "GET" => Permission::Read,
        "POST" if path == "/v1/query" => Permission::Query,
        "POST" | "PUT" | "PATCH" => Permission::Write,
        "DELETE" => Permission::Delete,
        _ => Permission::Read,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse_case_insensitive() {
        assert_eq!(Level::parse("admin"), Some(Level::Admin));
        assert_eq!(Level::parse("ADMIN"), Some(Level::Admin));
        assert_eq!(Level::parse("  User "), Some(Level::User));
        assert_eq!(Level::parse("read-only"), Some(Level::ReadOnly));
        assert_eq!(Level::parse("READONLY"), Some(Level::ReadOnly));
    }

    #[test]
    fn test_level_parse_unknown() {
        assert_eq!(Level::parse(""), None);
        assert_eq!(Level::parse("root"), None);
        assert_eq!(Level::parse("read only"), None);
    }

    #[test]
    fn test_admin_has_all_permissions() {
        let perms = Level::Admin.permissions();
        assert_eq!(perms.len(), 5);
        assert!(perms.contains(Permission::Read));
        assert!(perms.contains(Permission::Write));
        assert!(perms.contains(Permission::Delete));
        assert!(perms.contains(Permission::Export));
        assert!(perms.contains(Permission::Query));
    }

    #[test]
    fn test_user_permissions() {
        let perms = Level::User.permissions();
        assert!(perms.contains(Permission::Read));
        assert!(perms.contains(Permission::Write));
        assert!(!perms.contains(Permission::Delete));
        assert!(!perms.contains(Permission::Export));
        assert!(!perms.contains(Permission::Query));
    }

    #[test]
    fn test_read_only_permissions() {
        let perms = Level::ReadOnly.permissions();
        assert_eq!(perms.len(), 1);
        assert!(perms.contains(Permission::Read));
    }

    #[test]
    fn test_permissions_for_level_is_total() {
        assert_eq!(
            permissions_for_level("ADMIN"),
            permissions_for_level("admin")
        );
        assert!(permissions_for_level("superuser").is_empty());
        assert!(permissions_for_level("").is_empty());
    }

    #[test]
    fn test_required_permission_export() {
        assert_eq!(
            required_permission(&Method::GET, "/v1/export"),
            Permission::Export
        );
    }

    #[test]
    fn test_required_permission_get_is_read() {
        assert_eq!(
            required_permission(&Method::GET, "/v1/games"),
            Permission::Read
        );
        assert_eq!(required_permission(&Method::GET, "/"), Permission::Read);
    }

    #[test]
    fn test_required_permission_query() {
        assert_eq!(
            required_permission(&Method::POST, "/v1/query"),
            Permission::Query
        );
    }

    #[test]
    fn test_required_permission_writes() {
        assert_eq!(
            required_permission(&Method::POST, "/v1/games"),
            Permission::Write
        );
        assert_eq!(
            required_permission(&Method::PUT, "/v1/games/3"),
            Permission::Write
        );
        assert_eq!(
            required_permission(&Method::PATCH, "/v1/games/3"),
            Permission::Write
        );
    }

    #[test]
    fn test_required_permission_delete() {
        assert_eq!(
            required_permission(&Method::DELETE, "/v1/games/3"),
            Permission::Delete
        );
    }

    #[test]
    fn test_required_permission_unmatched_method_defaults_to_read() {
        let method = Method::from_bytes(b"PURGE").unwrap();
        assert_eq!(required_permission(&method, "/v1/games"), Permission::Read);
    }

    #[test]
    fn test_permission_display() {
        assert_eq!(Permission::Export.to_string(), "export");
        assert_eq!(Permission::Read.to_string(), "read");
    }
}
