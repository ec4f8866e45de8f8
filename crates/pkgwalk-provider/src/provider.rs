//! The package provider facade: single and bulk package lookup, existence
//! checks, and recursive packages-under-directory enumeration.

use crate::roots::{self, PackagePath};
use crate::traversal::{self, TraversalInfo};
use crate::universe::Universe;
use pkgwalk_core::cancel::{CancelToken, Interrupted};
use pkgwalk_core::error::{EvalError, PackageError};
use pkgwalk_core::events::{Event, EventHandler};
use pkgwalk_core::package::{Package, PackageIdentifier};
use pkgwalk_core::path::{self, PathFragment};
use pkgwalk_core::repo::RepositoryName;
use pkgwalk_graph::key::GraphKey;
use pkgwalk_graph::node::NodeValue;
use pkgwalk_graph::snapshot::WalkableGraph;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

/// Answers package queries from a frozen, pre-evaluated graph snapshot.
///
/// Construction pins the (graph, universe, package path) triple for the
/// provider's lifetime. The provider holds no mutable state, so any number
/// of queries may run concurrently against one instance.
///
/// The universe is closed: a key the graph does not hold corresponds to no
/// package at all. Misses are definitive and nothing here retries.
#[derive(Debug)]
pub struct GraphPackageProvider<G> {
    graph: G,
    universe: Universe,
    package_path: PackagePath,
}

impl<G: WalkableGraph> GraphPackageProvider<G> {
    /// A provider over `graph`, answering recursive queries only for
    /// directories `universe` covers, walking `package_path` roots for the
    /// main repository.
    pub fn new(graph: G, universe: Universe, package_path: PackagePath) -> Self {
        GraphPackageProvider { graph, universe, package_path }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn package_path(&self) -> &PackagePath {
        &self.package_path
    }

    /// Fetch the package named by `id`.
    ///
    /// A memoized success value wins. A recorded no-such-package error is
    /// returned unchanged. A key caught in a dependency cycle answers
    /// no-such-package with a cycle reason. Anything else means the key is
    /// not in the closed universe, so the package definitively does not
    /// exist.
    ///
    /// # Panics
    ///
    /// Panics when the graph recorded an error outside the no-such-package
    /// taxonomy for this key; the evaluator never does that for package
    /// keys, so such a snapshot is corrupt.
    pub fn get_package(&self, id: &PackageIdentifier) -> Result<Arc<Package>, PackageError> {
        let key = GraphKey::Package(id.clone());

        if let Some(value) = self.graph.value(&key) {
            match value.as_ref() {
                NodeValue::Package(node) => return Ok(Arc::clone(node.package())),
                other => panic!("package key for '{id}' resolved to a {} node", other.kind()),
            }
        }

        match self.graph.error(&key) {
            Some(EvalError::Package(error)) if error.is_no_such_package() => return Err(error),
            Some(error) => panic!("unexpected error recorded for package '{id}': {error}"),
            None => {}
        }

        if self.graph.is_cycle(&key) {
            return Err(PackageError::NoSuchPackage {
                id: id.clone(),
                reason: "package depends on a cycle".to_owned(),
            });
        }

        Err(PackageError::BuildFileNotFound {
            id: id.clone(),
            reason: "build file not found on package path".to_owned(),
        })
    }

    /// Fetch every package in `ids` that resolves, in one batched read.
    ///
    /// The result holds exactly the ids whose individual lookup would
    /// succeed. On the first id that cannot resolve (first in caller order,
    /// duplicates ignored), fails with that id's error; the remaining
    /// failures are not collected.
    ///
    /// # Panics
    ///
    /// Panics when a package key resolves to a node of a different kind.
    pub fn bulk_get_packages(
        &self,
        ids: &[PackageIdentifier],
    ) -> Result<BTreeMap<PackageIdentifier, Arc<Package>>, EvalError> {
        let mut seen = HashSet::new();
        let unique: Vec<&PackageIdentifier> = ids.iter().filter(|id| seen.insert(*id)).collect();
        let keys: Vec<GraphKey> = unique
            .iter()
            .map(|id| GraphKey::Package((*id).clone()))
            .collect();

        let values = self.graph.successful_values(&keys);

        let mut packages = BTreeMap::new();
        let mut unknown: Vec<(&PackageIdentifier, GraphKey)> = Vec::new();
        for (id, key) in unique.iter().zip(&keys) {
            match values.get(key) {
                Some(value) => match value.as_ref() {
                    NodeValue::Package(node) => {
                        packages.insert((*id).clone(), Arc::clone(node.package()));
                    }
                    other => {
                        panic!("package key for '{id}' resolved to a {} node", other.kind())
                    }
                },
                None => unknown.push((*id, key.clone())),
            }
        }

        if unknown.is_empty() {
            return Ok(packages);
        }
        tracing::warn!(
            "{} of {} packages missing from batch lookup; consulting recorded errors",
            unknown.len(),
            unique.len()
        );

        let unknown_keys: Vec<GraphKey> = unknown.iter().map(|(_, key)| key.clone()).collect();
        let missing = self.graph.missing_and_errors(&unknown_keys);

        let (first_id, first_key) = &unknown[0];
        match missing.get(first_key).cloned().flatten() {
            Some(error) => Err(error),
            None => Err(EvalError::Package(PackageError::BuildFileNotFound {
                id: (*first_id).clone(),
                reason: "package not found".to_owned(),
            })),
        }
    }

    /// Whether `id` names a package.
    ///
    /// Never fails for ordinary negative results: a recorded no-such-package
    /// or inconsistent-filesystem error is reported to `events` and answered
    /// with `false`, and an id the universe never covered is plain `false`.
    ///
    /// # Panics
    ///
    /// Panics when the lookup key sits on a dependency cycle (lookup nodes
    /// cannot depend on cycles) or carries an error outside those two kinds.
    pub fn is_package(&self, events: &dyn EventHandler, id: &PackageIdentifier) -> bool {
        let key = GraphKey::PackageLookup(id.clone());

        if let Some(value) = self.graph.value(&key) {
            match value.as_ref() {
                NodeValue::PackageLookup(node) => return node.exists,
                other => {
                    panic!("package-lookup key for '{id}' resolved to a {} node", other.kind())
                }
            }
        }

        assert!(
            !self.graph.is_cycle(&key),
            "package-lookup key for '{id}' depends on a cycle"
        );

        match self.graph.error(&key) {
            // Not in the universe's closure at all, hence not a package.
            None => false,
            Some(EvalError::Package(error))
                if error.is_no_such_package() || error.is_inconsistent_filesystem() =>
            {
                events.handle(Event::error(error.to_string()));
                false
            }
            Some(error) => {
                panic!("unexpected error recorded during package lookup for '{id}': {error}")
            }
        }
    }

    /// Every package at or below `directory` in `repository`, as paths
    /// relative to the repository root.
    ///
    /// `blacklisted` names subtrees the snapshot was evaluated without; the
    /// set is part of the identity of the aggregate nodes the walk reads.
    /// `excluded` names subtrees to drop from this particular answer;
    /// excluding a directory prunes its whole subtree. Both sets may only
    /// contain `directory` itself or paths below it.
    ///
    /// Directories the universe does not cover, repositories never
    /// materialized, and (directory, blacklist) pairs outside the closure
    /// all answer with the empty set: under a closed universe, absence is a
    /// real answer. Checks `cancel` before each traversal round and returns
    /// [`Interrupted`] once it trips.
    ///
    /// # Panics
    ///
    /// Panics when a blacklisted or excluded path lies outside `directory`.
    pub fn packages_under_directory(
        &self,
        events: &dyn EventHandler,
        cancel: &CancelToken,
        repository: &RepositoryName,
        directory: &PathFragment,
        blacklisted: &BTreeSet<PathFragment>,
        excluded: &BTreeSet<PathFragment>,
    ) -> Result<BTreeSet<PathFragment>, Interrupted> {
        if blacklisted.contains(directory) || excluded.contains(directory) {
            return Ok(BTreeSet::new());
        }
        path::check_all_under(blacklisted, directory);
        path::check_all_under(excluded, directory);

        if !self.universe.covers_recursively(repository, directory) {
            return Ok(BTreeSet::new());
        }

        let roots = roots::resolve_roots(&self.graph, &self.package_path, repository);
        if roots.is_empty() {
            return Ok(BTreeSet::new());
        }

        // One seed per root; the walk batches all of them round by round.
        let seeds: HashSet<TraversalInfo> = roots
            .into_iter()
            .map(|root| {
                TraversalInfo::new(
                    root.rooted(directory.clone()),
                    blacklisted.clone(),
                    excluded.clone(),
                )
            })
            .collect();

        traversal::collect_packages_under(&self.graph, events, cancel, repository, seeds)
    }
}
