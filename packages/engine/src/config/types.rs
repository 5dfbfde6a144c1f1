//! Core container configuration structure

use serde::{Deserialize, Serialize};

/// Delimiter used when none is configured
pub const DEFAULT_DELIMITER: &str = ".";

/// How element access reports a path that cannot be fully traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessPolicy {
    /// Fail with a `PathError` on partial traversal
    #[default]
    Strict,
    /// Return "not exists" on lookups and treat removals as no-ops
    Silent,
}

impl AccessPolicy {
    #[inline]
    #[must_use]
    pub fn is_strict(self) -> bool {
        matches!(self, AccessPolicy::Strict)
    }
}

/// Container configuration
///
/// The first delimiter is canonical; every other delimiter is folded into it
/// before a path string is split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Ordered delimiter set, canonical first
    pub delimiters: Vec<String>,

    /// Create missing path segments on `set` when no per-call value is given
    pub force_create: bool,

    /// Error policy used by `get`, `unset` and `view`
    pub access_policy: AccessPolicy,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            delimiters: vec![DEFAULT_DELIMITER.to_string()],
            force_create: false,
            access_policy: AccessPolicy::Strict,
        }
    }
}

impl ContainerConfig {
    /// Canonical delimiter
    #[inline]
    #[must_use]
    pub fn main_delimiter(&self) -> &str {
        self.delimiters
            .first()
            .map_or(DEFAULT_DELIMITER, String::as_str)
    }
}
