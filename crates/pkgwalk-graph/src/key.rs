//! Graph keys: one kind per node kind the query layer reads.

use pkgwalk_core::package::PackageIdentifier;
use pkgwalk_core::path::{PathFragment, RootedPath};
use pkgwalk_core::repo::RepositoryName;
use std::collections::BTreeSet;
use std::fmt;

/// The kind of a key or of a node value. A stored value's kind always
/// agrees with its key's kind; the snapshot builder enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Package,
    PackageLookup,
    RepositoryRoot,
    DirectoryAggregate,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Package => "package",
            NodeKind::PackageLookup => "package-lookup",
            NodeKind::RepositoryRoot => "repository-root",
            NodeKind::DirectoryAggregate => "directory-aggregate",
        };
        f.write_str(name)
    }
}

/// Identifier of one memoized node in the evaluation graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GraphKey {
    /// The loaded package for an identifier.
    Package(PackageIdentifier),
    /// Whether an identifier names a package at all.
    PackageLookup(PackageIdentifier),
    /// Where an external repository was materialized, if it ever was.
    RepositoryRoot(RepositoryName),
    /// Pre-aggregated packages-below-directory state.
    DirectoryAggregate(DirectoryAggregateKey),
}

impl GraphKey {
    pub fn kind(&self) -> NodeKind {
        match self {
            GraphKey::Package(_) => NodeKind::Package,
            GraphKey::PackageLookup(_) => NodeKind::PackageLookup,
            GraphKey::RepositoryRoot(_) => NodeKind::RepositoryRoot,
            GraphKey::DirectoryAggregate(_) => NodeKind::DirectoryAggregate,
        }
    }
}

/// Key of a directory-aggregate node.
///
/// The blacklist is part of the identity: a traversal evaluated under a
/// different blacklist is a genuinely different pre-computation, so asking
/// for it must address a different node. Excluded directories are absent on
/// purpose. They are filtered after the fact by the traversal engine and
/// never influence which nodes exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryAggregateKey {
    pub repository: RepositoryName,
    pub directory: RootedPath,
    pub blacklist: BTreeSet<PathFragment>,
}
