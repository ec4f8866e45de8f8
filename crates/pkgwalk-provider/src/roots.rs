//! Resolving which filesystem roots to walk for a repository.

use pkgwalk_core::path::Root;
use pkgwalk_core::repo::RepositoryName;
use pkgwalk_graph::key::GraphKey;
use pkgwalk_graph::node::NodeValue;
use pkgwalk_graph::snapshot::WalkableGraph;

/// The ordered package-path roots configured for the main repository.
///
/// A package may physically live under any of them, so directory queries
/// walk every root and union the results. There is no first-match shortcut
/// at this level.
#[derive(Debug, Clone, Default)]
pub struct PackagePath {
    roots: Vec<Root>,
}

impl PackagePath {
    pub fn new(roots: Vec<Root>) -> Self {
        PackagePath { roots }
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// The roots to walk for `repository`.
///
/// The main repository walks the configured package path. An external
/// repository resolves through its repository-root node; a repository the
/// graph never materialized, or one recorded as never fetched, yields no
/// roots at all. That is an ordinary outside-the-universe answer, not an
/// error.
pub(crate) fn resolve_roots(
    graph: &impl WalkableGraph,
    package_path: &PackagePath,
    repository: &RepositoryName,
) -> Vec<Root> {
    if repository.is_main() {
        return package_path.roots().to_vec();
    }

    let key = GraphKey::RepositoryRoot(repository.clone());
    match graph.value(&key) {
        Some(value) => match value.as_ref() {
            NodeValue::RepositoryRoot(node) => match node.root() {
                Some(root) => vec![root.clone()],
                None => Vec::new(),
            },
            other => panic!(
                "repository-root key for '{repository}' resolved to a {} node",
                other.kind()
            ),
        },
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgwalk_graph::node::RepositoryRootNode;
    use pkgwalk_graph::snapshot::FrozenGraph;

    #[test]
    fn test_main_repository_uses_all_configured_roots() {
        let graph = FrozenGraph::builder().freeze();
        let package_path = PackagePath::new(vec![Root::new("/ws"), Root::new("/overlay")]);

        let roots = resolve_roots(&graph, &package_path, &RepositoryName::main());
        assert_eq!(roots, vec![Root::new("/ws"), Root::new("/overlay")]);
    }

    #[test]
    fn test_fetched_external_repository_has_one_root() {
        let repo = RepositoryName::new("ext");
        let graph = FrozenGraph::builder()
            .value(
                GraphKey::RepositoryRoot(repo.clone()),
                NodeValue::RepositoryRoot(RepositoryRootNode::fetched(Root::new("/external/ext"))),
            )
            .freeze();

        let roots = resolve_roots(&graph, &PackagePath::default(), &repo);
        assert_eq!(roots, vec![Root::new("/external/ext")]);
    }

    #[test]
    fn test_unfetched_external_repository_has_no_roots() {
        let repo = RepositoryName::new("ext");
        let graph = FrozenGraph::builder()
            .value(
                GraphKey::RepositoryRoot(repo.clone()),
                NodeValue::RepositoryRoot(RepositoryRootNode::missing()),
            )
            .freeze();

        assert!(resolve_roots(&graph, &PackagePath::default(), &repo).is_empty());
    }

    #[test]
    fn test_unknown_external_repository_has_no_roots() {
        let graph = FrozenGraph::builder().freeze();
        let roots = resolve_roots(&graph, &PackagePath::default(), &RepositoryName::new("ghost"));
        assert!(roots.is_empty());
    }
}
