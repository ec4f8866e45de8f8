//! Memoized node values, one arm per key kind.

use crate::key::NodeKind;
use pkgwalk_core::package::Package;
use pkgwalk_core::path::{Root, RootedPath};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Value of a package key: the fully loaded package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    package: Arc<Package>,
}

impl PackageNode {
    pub fn new(package: Package) -> Self {
        PackageNode { package: Arc::new(package) }
    }

    pub fn package(&self) -> &Arc<Package> {
        &self.package
    }
}

/// Value of a package-lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageLookupNode {
    pub exists: bool,
}

/// Value of a repository-root key: where an external repository landed on
/// disk, or the record that fetching it never produced anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRootNode {
    root: Option<Root>,
}

impl RepositoryRootNode {
    /// A repository that was fetched to `root`.
    pub fn fetched(root: Root) -> Self {
        RepositoryRootNode { root: Some(root) }
    }

    /// A repository that was looked for but never materialized.
    pub fn missing() -> Self {
        RepositoryRootNode { root: None }
    }

    pub fn exists(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&Root> {
        self.root.as_ref()
    }
}

/// Value of a directory-aggregate key: everything a traversal needs to know
/// about one directory without touching the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryAggregateNode {
    /// Whether the directory itself is a package.
    pub is_package: bool,
    /// For each immediate subdirectory, whether its subtree transitively
    /// contains at least one package. A `false` entry exists so traversals
    /// can skip the subtree without another lookup.
    pub subdirectories: BTreeMap<RootedPath, bool>,
    /// A non-fatal problem recorded while aggregating this directory.
    pub error: Option<String>,
}

/// A memoized node value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    Package(PackageNode),
    PackageLookup(PackageLookupNode),
    RepositoryRoot(RepositoryRootNode),
    DirectoryAggregate(DirectoryAggregateNode),
}

impl NodeValue {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeValue::Package(_) => NodeKind::Package,
            NodeValue::PackageLookup(_) => NodeKind::PackageLookup,
            NodeValue::RepositoryRoot(_) => NodeKind::RepositoryRoot,
            NodeValue::DirectoryAggregate(_) => NodeKind::DirectoryAggregate,
        }
    }
}
