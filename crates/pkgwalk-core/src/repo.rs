//! Repository names: the main workspace and externally fetched repositories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a repository.
///
/// The main workspace is the distinguished empty name; every other name
/// identifies an external repository fetched alongside it. Names are stored
/// without the `@` marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// The main workspace repository.
    pub fn main() -> Self {
        RepositoryName(String::new())
    }

    /// Create a repository name. A leading `@` is accepted and stripped; the
    /// empty name denotes the main repository.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix('@') {
            Some(stripped) => RepositoryName(stripped.to_owned()),
            None => RepositoryName(name),
        }
    }

    /// Whether this is the main workspace repository.
    pub fn is_main(&self) -> bool {
        self.0.is_empty()
    }

    /// The bare name, without the `@` marker. Empty for the main repository.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_is_main() {
        assert!(RepositoryName::main().is_main());
        assert!(RepositoryName::new("").is_main());
        assert!(!RepositoryName::new("ext").is_main());
    }

    #[test]
    fn test_new_strips_at_marker() {
        assert_eq!(RepositoryName::new("@ext"), RepositoryName::new("ext"));
        assert_eq!(RepositoryName::new("@ext").as_str(), "ext");
    }

    #[test]
    fn test_display_includes_marker() {
        assert_eq!(RepositoryName::new("ext").to_string(), "@ext");
        assert_eq!(RepositoryName::main().to_string(), "@");
    }

    #[test]
    fn test_serde_is_transparent() {
        let name = RepositoryName::new("ext");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"ext\"");
        let back: RepositoryName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}
