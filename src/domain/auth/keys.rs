//! API key ring parsed from configuration
//!
//! Keys are loaded once per process from a single `secret:level[,...]`
//! string and never mutated or persisted afterwards.

use super::permission::{Level, PermissionSet};

/// A single configured API key.
#[derive(Debug, Clone)]
pub struct ApiKeyEntry {
    secret: String,
    level: Option<Level>,
}

impl ApiKeyEntry {
    pub fn new(secret: impl Into<String>, level: Option<Level>) -> Self {
        Self {
            secret: secret.into(),
            level,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Permission set for this key; a key without a recognized level grants
    /// nothing.
    pub fn permissions(&self) -> PermissionSet {
        self.level.map(Level::permissions).unwrap_or_default()
    }
}

/// Ordered, immutable list of API keys.
#[derive(Debug, Clone, Default)]
pub struct KeyRing {
    entries: Vec<ApiKeyEntry>,
}

impl KeyRing {
    /// Parse the comma-separated `secret:level` configuration string.
    ///
    /// Entries are trimmed and order is preserved. An entry without a colon
    /// keeps its whole text as the secret and resolves to no permissions;
    /// it does not abort parsing of the remaining entries. Empty entries
    /// are skipped.
    pub fn parse(raw: &str) -> Self {
        let mut entries = Vec::new();

        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (secret, level) = match entry.split_once(':') {
                Some((secret, level)) => (secret, Level::parse(level)),
                None => (entry, None),
            };
            entries.push(ApiKeyEntry::new(secret, level));
        }

        Self { entries }
    }

    /// First entry whose secret matches exactly. Comparison is plain string
    /// equality, not constant-time.
    pub fn lookup(&self, secret: &str) -> Option<&ApiKeyEntry> {
        self.entries.iter().find(|entry| entry.secret == secret)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
