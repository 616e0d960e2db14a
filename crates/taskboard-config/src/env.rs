//! Typed snapshot of the environment variables the resolver consumes.
//!
//! # Design
//! - Lookups are explicit presence checks; a missing key is a normal input.
//! - The snapshot is taken once so resolution stays a pure function.

use std::collections::BTreeMap;

use crate::defaults::ENV_KEYS;

/// Immutable mapping of environment variable names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Construct an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the keys the resolver reads from the current process.
    ///
    /// Values that are not valid UTF-8 are treated as absent.
    #[must_use]
    pub fn from_process() -> Self {
        ENV_KEYS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (*key, value)))
            .collect()
    }

    /// Return a copy of the environment with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Raw value for `key`, including empty strings.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value for `key` when it is present and non-empty.
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
