//! Environment-related types for domain-specific operations

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Environment variables in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariables(IndexMap<String, String>);

impl EnvironmentVariables {
    /// Create a new empty environment
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert a variable, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Parse a `KEY=VALUE` assignment and insert it
    ///
    /// Only the first `=` separates key from value, so values may contain `=`.
    pub fn insert_assignment(&mut self, assignment: &str) -> crate::Result<()> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                self.insert(key, value);
                Ok(())
            }
            _ => Err(crate::Error::configuration(format!(
                "expected KEY=VALUE, got '{assignment}'"
            ))),
        }
    }
}

impl Deref for EnvironmentVariables {
    type Target = IndexMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for EnvironmentVariables {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<(String, String)> for EnvironmentVariables {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for EnvironmentVariables {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assignment() {
        let mut env = EnvironmentVariables::new();
        env.insert_assignment("DB_URL=postgres://u:p@h/db?a=b").unwrap();
        env.insert_assignment("EMPTY=").unwrap();

        assert_eq!(env.get("DB_URL").unwrap(), "postgres://u:p@h/db?a=b");
        assert_eq!(env.get("EMPTY").unwrap(), "");
    }

    #[test]
    fn test_insert_assignment_rejects_missing_key() {
        let mut env = EnvironmentVariables::new();
        assert!(env.insert_assignment("NO_EQUALS").is_err());
        assert!(env.insert_assignment("=value").is_err());
        assert!(env.is_empty());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let env: EnvironmentVariables = [("Z", "1"), ("A", "2"), ("M", "3")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let keys: Vec<_> = env.keys().cloned().collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }
}
