//! Package identity and the package unit itself.

use crate::path::{PathFragment, RootedPath};
use crate::repo::RepositoryName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a package: the repository it lives in plus its path there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageIdentifier {
    repository: RepositoryName,
    package_path: PathFragment,
}

impl PackageIdentifier {
    pub fn new(repository: RepositoryName, package_path: PathFragment) -> Self {
        PackageIdentifier { repository, package_path }
    }

    /// A package in the main repository.
    pub fn in_main(package_path: impl AsRef<str>) -> Self {
        PackageIdentifier {
            repository: RepositoryName::main(),
            package_path: PathFragment::new(package_path),
        }
    }

    pub fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    pub fn package_path(&self) -> &PathFragment {
        &self.package_path
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repository.is_main() {
            write!(f, "{}", self.package_path)
        } else {
            write!(f, "{}//{}", self.repository, self.package_path)
        }
    }
}

/// A directory recognized as a build unit: its identity, the definition file
/// that declares it, and the names of the targets it declares.
///
/// Packages are produced by the evaluator ahead of time; this layer only
/// stores and returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageIdentifier,
    /// Where the definition file was found, including which root won.
    pub build_file: RootedPath,
    /// Declared target names, in declaration order.
    pub targets: Vec<String>,
}

impl Package {
    /// A package with no targets declared yet.
    pub fn new(id: PackageIdentifier, build_file: RootedPath) -> Self {
        Package { id, build_file, targets: Vec::new() }
    }
}
