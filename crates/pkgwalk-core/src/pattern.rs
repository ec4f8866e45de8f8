//! Target patterns and the subtree-coverage test the query universe needs.
//!
//! Pattern syntax parsing belongs to the query frontend; this layer receives
//! patterns already structured.

use crate::package::PackageIdentifier;
use crate::path::PathFragment;
use crate::repo::RepositoryName;
use serde::{Deserialize, Serialize};

/// A structured query pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPattern {
    /// One explicit target, e.g. `//foo:bar`.
    SingleTarget {
        package: PackageIdentifier,
        target: String,
    },
    /// Every target of one package, e.g. `//foo:all`.
    TargetsInPackage { package: PackageIdentifier },
    /// Every target of a directory and of all packages below it,
    /// e.g. `//foo/...`.
    TargetsBelowDirectory { directory: PackageIdentifier },
}

impl TargetPattern {
    /// A targets-below-directory pattern for `directory` in `repository`.
    pub fn below_directory(repository: RepositoryName, directory: PathFragment) -> Self {
        TargetPattern::TargetsBelowDirectory {
            directory: PackageIdentifier::new(repository, directory),
        }
    }

    /// True only for targets-below-directory patterns whose directory is
    /// `package` or one of its ancestors in the same repository. Such a
    /// pattern forced evaluation of every package transitively below
    /// `package`, which is what makes recursive queries under it answerable.
    pub fn covers_all_transitive_subdirectories_of(&self, package: &PackageIdentifier) -> bool {
        match self {
            TargetPattern::TargetsBelowDirectory { directory } => {
                directory.repository() == package.repository()
                    && package.package_path().starts_with(directory.package_path())
            }
            TargetPattern::SingleTarget { .. } | TargetPattern::TargetsInPackage { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn below(dir: &str) -> TargetPattern {
        TargetPattern::below_directory(RepositoryName::main(), PathFragment::new(dir))
    }

    #[test]
    fn test_below_directory_covers_self_and_descendants() {
        let pattern = below("foo");
        assert!(pattern.covers_all_transitive_subdirectories_of(&PackageIdentifier::in_main("foo")));
        assert!(
            pattern
                .covers_all_transitive_subdirectories_of(&PackageIdentifier::in_main("foo/bar/baz"))
        );
        assert!(
            !pattern.covers_all_transitive_subdirectories_of(&PackageIdentifier::in_main("food"))
        );
        assert!(
            !pattern.covers_all_transitive_subdirectories_of(&PackageIdentifier::in_main("other"))
        );
    }

    #[test]
    fn test_coverage_requires_same_repository() {
        let pattern = below("foo");
        let in_ext = PackageIdentifier::new(RepositoryName::new("ext"), PathFragment::new("foo"));
        assert!(!pattern.covers_all_transitive_subdirectories_of(&in_ext));
    }

    #[test]
    fn test_non_recursive_patterns_cover_nothing() {
        let id = PackageIdentifier::in_main("foo");
        let single = TargetPattern::SingleTarget {
            package: id.clone(),
            target: "bar".to_owned(),
        };
        let in_package = TargetPattern::TargetsInPackage { package: id.clone() };
        assert!(!single.covers_all_transitive_subdirectories_of(&id));
        assert!(!in_package.covers_all_transitive_subdirectories_of(&id));
    }

    #[test]
    fn test_below_empty_directory_covers_whole_repository() {
        let pattern = below("");
        assert!(pattern.covers_all_transitive_subdirectories_of(&PackageIdentifier::in_main("a")));
        assert!(pattern.covers_all_transitive_subdirectories_of(&PackageIdentifier::in_main("")));
    }
}
