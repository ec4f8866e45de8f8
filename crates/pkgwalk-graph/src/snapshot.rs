//! Read-only access to a frozen graph, and the in-memory snapshot.

use crate::key::GraphKey;
use crate::node::NodeValue;
use pkgwalk_core::error::EvalError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Batched, read-only access to a frozen snapshot of the evaluation graph.
///
/// Implementations must be shareable across threads; queries never write.
/// A key absent here is definitively absent: the universe the snapshot was
/// evaluated for is closed, so there is nothing to retry.
pub trait WalkableGraph: Send + Sync {
    /// The memoized value for `key`, if evaluation produced one.
    fn value(&self, key: &GraphKey) -> Option<Arc<NodeValue>>;

    /// The error recorded for `key`, if evaluation failed.
    fn error(&self, key: &GraphKey) -> Option<EvalError>;

    /// Whether `key` participates in a dependency cycle.
    fn is_cycle(&self, key: &GraphKey) -> bool;

    /// Values for every key in `keys` that evaluated successfully. Keys
    /// without a value are simply absent from the result.
    ///
    /// The default resolves keys one at a time; implementations backed by
    /// remote or lazy state should override it to answer in one round.
    fn successful_values(&self, keys: &[GraphKey]) -> HashMap<GraphKey, Arc<NodeValue>> {
        keys.iter()
            .filter_map(|key| self.value(key).map(|value| (key.clone(), value)))
            .collect()
    }

    /// For every key in `keys` without a successful value: the recorded
    /// error, or `None` when the key is simply not in the closure.
    fn missing_and_errors(&self, keys: &[GraphKey]) -> HashMap<GraphKey, Option<EvalError>> {
        keys.iter()
            .filter(|key| self.value(key).is_none())
            .map(|key| (key.clone(), self.error(key)))
            .collect()
    }
}

/// One snapshot shared by any number of providers.
impl<G: WalkableGraph> WalkableGraph for Arc<G> {
    fn value(&self, key: &GraphKey) -> Option<Arc<NodeValue>> {
        self.as_ref().value(key)
    }

    fn error(&self, key: &GraphKey) -> Option<EvalError> {
        self.as_ref().error(key)
    }

    fn is_cycle(&self, key: &GraphKey) -> bool {
        self.as_ref().is_cycle(key)
    }

    fn successful_values(&self, keys: &[GraphKey]) -> HashMap<GraphKey, Arc<NodeValue>> {
        self.as_ref().successful_values(keys)
    }

    fn missing_and_errors(&self, keys: &[GraphKey]) -> HashMap<GraphKey, Option<EvalError>> {
        self.as_ref().missing_and_errors(keys)
    }
}

/// A fully materialized, immutable snapshot.
///
/// Assembled once through [`FrozenGraphBuilder`], then only read. Node
/// values are `Arc`-shared so batched reads hand out clones of pointers,
/// not of packages.
#[derive(Debug)]
pub struct FrozenGraph {
    nodes: HashMap<GraphKey, Arc<NodeValue>>,
    errors: HashMap<GraphKey, EvalError>,
    cycles: HashSet<GraphKey>,
}

impl FrozenGraph {
    pub fn builder() -> FrozenGraphBuilder {
        FrozenGraphBuilder::new()
    }

    /// Number of memoized values.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl WalkableGraph for FrozenGraph {
    fn value(&self, key: &GraphKey) -> Option<Arc<NodeValue>> {
        self.nodes.get(key).cloned()
    }

    fn error(&self, key: &GraphKey) -> Option<EvalError> {
        self.errors.get(key).cloned()
    }

    fn is_cycle(&self, key: &GraphKey) -> bool {
        self.cycles.contains(key)
    }
}

/// Accumulates nodes, errors, and cycle marks, then freezes them.
#[derive(Debug, Default)]
pub struct FrozenGraphBuilder {
    nodes: HashMap<GraphKey, Arc<NodeValue>>,
    errors: HashMap<GraphKey, EvalError>,
    cycles: HashSet<GraphKey>,
}

impl FrozenGraphBuilder {
    pub fn new() -> Self {
        FrozenGraphBuilder::default()
    }

    /// Record a successful value.
    ///
    /// # Panics
    ///
    /// Panics when the value's kind does not match the key's kind. The
    /// evaluator never stores mismatched nodes, so a mismatch means the code
    /// assembling this snapshot is broken.
    pub fn value(mut self, key: GraphKey, value: NodeValue) -> Self {
        assert_eq!(
            key.kind(),
            value.kind(),
            "node kind must match key kind for {key:?}"
        );
        self.nodes.insert(key, Arc::new(value));
        self
    }

    /// Record an evaluation error for `key`.
    pub fn error(mut self, key: GraphKey, error: EvalError) -> Self {
        self.errors.insert(key, error);
        self
    }

    /// Mark `key` as participating in a dependency cycle.
    pub fn mark_cycle(mut self, key: GraphKey) -> Self {
        self.cycles.insert(key);
        self
    }

    pub fn freeze(self) -> FrozenGraph {
        FrozenGraph {
            nodes: self.nodes,
            errors: self.errors,
            cycles: self.cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::PackageLookupNode;
    use pkgwalk_core::error::PackageError;
    use pkgwalk_core::package::PackageIdentifier;

    fn lookup_key(path: &str) -> GraphKey {
        GraphKey::PackageLookup(PackageIdentifier::in_main(path))
    }

    fn lookup_node(exists: bool) -> NodeValue {
        NodeValue::PackageLookup(PackageLookupNode { exists })
    }

    #[test]
    fn test_frozen_graph_lookups() {
        let error_key = lookup_key("broken");
        let cycle_key = lookup_key("cyclic");
        let graph = FrozenGraph::builder()
            .value(lookup_key("foo"), lookup_node(true))
            .error(
                error_key.clone(),
                EvalError::Package(PackageError::NoSuchPackage {
                    id: PackageIdentifier::in_main("broken"),
                    reason: "bad definition".to_owned(),
                }),
            )
            .mark_cycle(cycle_key.clone())
            .freeze();

        assert_eq!(graph.len(), 1);
        assert!(graph.value(&lookup_key("foo")).is_some());
        assert!(graph.value(&lookup_key("missing")).is_none());
        assert!(graph.error(&error_key).is_some());
        assert!(graph.is_cycle(&cycle_key));
        assert!(!graph.is_cycle(&error_key));
    }

    #[test]
    #[should_panic(expected = "node kind must match key kind")]
    fn test_builder_rejects_kind_mismatch() {
        let _ = FrozenGraph::builder().value(
            GraphKey::Package(PackageIdentifier::in_main("foo")),
            lookup_node(true),
        );
    }

    #[test]
    fn test_successful_values_returns_only_hits() {
        let graph = FrozenGraph::builder()
            .value(lookup_key("a"), lookup_node(true))
            .value(lookup_key("b"), lookup_node(false))
            .freeze();

        let keys = vec![lookup_key("a"), lookup_key("b"), lookup_key("missing")];
        let values = graph.successful_values(&keys);
        assert_eq!(values.len(), 2);
        assert!(values.contains_key(&lookup_key("a")));
        assert!(!values.contains_key(&lookup_key("missing")));
    }

    #[test]
    fn test_missing_and_errors_distinguishes_absence_from_failure() {
        let failed = lookup_key("failed");
        let graph = FrozenGraph::builder()
            .value(lookup_key("ok"), lookup_node(true))
            .error(failed.clone(), EvalError::Other("io error".to_owned()))
            .freeze();

        let keys = vec![lookup_key("ok"), failed.clone(), lookup_key("absent")];
        let report = graph.missing_and_errors(&keys);
        assert_eq!(report.len(), 2);
        assert!(matches!(report.get(&failed), Some(Some(EvalError::Other(_)))));
        assert_eq!(report.get(&lookup_key("absent")), Some(&None));
    }

    #[test]
    fn test_shared_snapshot_answers_through_arc() {
        let graph = Arc::new(
            FrozenGraph::builder()
                .value(lookup_key("foo"), lookup_node(true))
                .freeze(),
        );
        assert!(graph.value(&lookup_key("foo")).is_some());
        assert!(!graph.is_cycle(&lookup_key("foo")));
    }
}
