//! Permission model and API key ring

pub mod keys;
pub mod permission;

pub use keys::{ApiKeyEntry, KeyRing};
pub use permission::{
    permissions_for_level, required_permission, Level, Permission, PermissionSet,
};

/// Outcome of authorizing a single request. Stack-local; never shared
/// across requests.
#[derive(Debug, Clone)]
pub struct AuthorizationDecision {
    pub authenticated: bool,
    pub permissions: PermissionSet,
    /// Redacted key identifier for logging; never the full secret.
    pub key_id: Option<String>,
}

impl AuthorizationDecision {
    /// Exempt public route: no identity, no permissions.
    pub fn public() -> Self {
        Self {
            authenticated: false,
            permissions: PermissionSet::empty(),
            key_id: None,
        }
    }

    /// Authentication disabled: everything granted, no identity.
    pub fn dev_mode() -> Self {
        Self {
            authenticated: false,
            permissions: PermissionSet::full(),
            key_id: None,
        }
    }

    /// A validated key with its resolved permissions and redacted id.
    pub fn authorized(permissions: PermissionSet, key_id: String) -> Self {
        Self {
            authenticated: true,
            permissions,
            key_id: Some(key_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_decision() {
        let decision = AuthorizationDecision::public();
        assert!(!decision.authenticated);
        assert!(decision.permissions.is_empty());
        assert!(decision.key_id.is_none());
    }

    #[test]
    fn test_dev_mode_grants_everything() {
        let decision = AuthorizationDecision::dev_mode();
        assert!(decision.permissions.contains(Permission::Export));
        assert!(decision.permissions.contains(Permission::Query));
        assert!(decision.key_id.is_none());
    }

    #[test]
    fn test_authorized_decision() {
        let decision =
            AuthorizationDecision::authorized(Level::User.permissions(), "abcd1234…".to_string());
        assert!(decision.authenticated);
        assert!(decision.permissions.contains(Permission::Write));
        assert_eq!(decision.key_id.as_deref(), Some("abcd1234…"));
    }
}
