//! The round-based frontier walk over pre-aggregated directory nodes.

use pkgwalk_core::cancel::{CancelToken, Interrupted};
use pkgwalk_core::events::{Event, EventHandler};
use pkgwalk_core::path::{PathFragment, RootedPath};
use pkgwalk_core::repo::RepositoryName;
use pkgwalk_graph::key::{DirectoryAggregateKey, GraphKey};
use pkgwalk_graph::node::NodeValue;
use pkgwalk_graph::snapshot::WalkableGraph;
use std::collections::{BTreeSet, HashSet};

/// One directory's worth of pending work.
///
/// The blacklist travels with the item because it is part of the identity of
/// the aggregate node to request: the evaluator keyed each node by
/// (directory, blacklist), narrowing the blacklist at every descent, so the
/// walk must re-derive the same narrowed set to address the same node. The
/// exclude set travels too but stays out of the key; excluded directories
/// are filtered here, after the fact.
///
/// Structural equality doubles as the frontier dedup rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct TraversalInfo {
    pub rooted_dir: RootedPath,
    pub blacklisted: BTreeSet<PathFragment>,
    pub excluded: BTreeSet<PathFragment>,
}

impl TraversalInfo {
    pub fn new(
        rooted_dir: RootedPath,
        blacklisted: BTreeSet<PathFragment>,
        excluded: BTreeSet<PathFragment>,
    ) -> Self {
        TraversalInfo { rooted_dir, blacklisted, excluded }
    }

    /// The aggregate key this item resolves through.
    fn aggregate_key(&self, repository: &RepositoryName) -> GraphKey {
        GraphKey::DirectoryAggregate(DirectoryAggregateKey {
            repository: repository.clone(),
            directory: self.rooted_dir.clone(),
            blacklist: self.blacklisted.clone(),
        })
    }
}

/// What expanding one resolved frontier item produced.
struct Expansion {
    package: Option<PathFragment>,
    children: Vec<TraversalInfo>,
}

/// Walk the aggregate nodes reachable from `seeds`, collecting the
/// root-relative path of every package found.
///
/// Runs level by level: each round resolves the whole frontier in one
/// batched read, then expands every hit. Items whose key is absent are
/// dropped silently; that (directory, blacklist) pair was never part of the
/// pre-evaluated closure, so there is nothing under it to enumerate. Errors
/// recorded on aggregate nodes go to `events` and never abort the walk.
///
/// Checks `cancel` at the start of every round.
pub(crate) fn collect_packages_under<G: WalkableGraph>(
    graph: &G,
    events: &dyn EventHandler,
    cancel: &CancelToken,
    repository: &RepositoryName,
    seeds: HashSet<TraversalInfo>,
) -> Result<BTreeSet<PathFragment>, Interrupted> {
    use rayon::prelude::*;

    let mut packages = BTreeSet::new();
    let mut frontier = seeds;

    while !frontier.is_empty() {
        if cancel.is_cancelled() {
            return Err(Interrupted);
        }

        let items: Vec<TraversalInfo> = frontier.drain().collect();
        let keys: Vec<GraphKey> = items
            .iter()
            .map(|item| item.aggregate_key(repository))
            .collect();
        let values = graph.successful_values(&keys);
        tracing::debug!(
            "resolved {} of {} frontier directories",
            values.len(),
            items.len()
        );

        // Expansion never touches the graph; the batched read above is the
        // round's only graph access.
        let expansions: Vec<Expansion> = items
            .par_iter()
            .zip(keys.par_iter())
            .filter_map(|(item, key)| values.get(key).map(|value| (item, value)))
            .map(|(item, value)| expand(item, value, events))
            .collect();

        let mut next = HashSet::new();
        for expansion in expansions {
            packages.extend(expansion.package);
            next.extend(expansion.children);
        }
        frontier = next;
    }

    Ok(packages)
}

/// Expand one resolved aggregate node.
fn expand(item: &TraversalInfo, value: &NodeValue, events: &dyn EventHandler) -> Expansion {
    let NodeValue::DirectoryAggregate(aggregate) = value else {
        panic!(
            "directory-aggregate key for '{}' resolved to a {} node",
            item.rooted_dir,
            value.kind()
        );
    };

    let package = aggregate
        .is_package
        .then(|| item.rooted_dir.relative().clone());

    if let Some(message) = &aggregate.error {
        events.handle(Event::error(message.clone()));
    }

    let mut children = Vec::new();
    for (subdirectory, contains_packages) in &aggregate.subdirectories {
        if !*contains_packages {
            continue;
        }
        let subdir_path = subdirectory.relative();

        // Narrowing both sets to this subdirectory reproduces the key the
        // evaluator used for the child node and carries deeper exclusions
        // down to the level where they become verbatim.
        let blacklisted = narrow_to(&item.blacklisted, subdir_path);
        let excluded = narrow_to(&item.excluded, subdir_path);

        if excluded.contains(subdir_path) {
            continue;
        }
        children.push(TraversalInfo::new(subdirectory.clone(), blacklisted, excluded));
    }

    Expansion { package, children }
}

/// The subset of `paths` equal to or below `directory`.
fn narrow_to(paths: &BTreeSet<PathFragment>, directory: &PathFragment) -> BTreeSet<PathFragment> {
    paths
        .iter()
        .filter(|path| path.starts_with(directory))
        .cloned()
        .collect()
}
