//! The query universe: the patterns the graph was pre-evaluated for.

use pkgwalk_core::package::PackageIdentifier;
use pkgwalk_core::path::PathFragment;
use pkgwalk_core::pattern::TargetPattern;
use pkgwalk_core::repo::RepositoryName;

/// The fixed, ordered set of target patterns whose transitive closure was
/// evaluated into the snapshot before any query runs.
///
/// Answering a recursive query for a directory no pattern covers would
/// return a silently partial result, so such directories are gated to an
/// immediate empty answer instead, before any graph read.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    patterns: Vec<TargetPattern>,
}

impl Universe {
    pub fn new(patterns: Vec<TargetPattern>) -> Self {
        Universe { patterns }
    }

    pub fn patterns(&self) -> &[TargetPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether some targets-below-directory pattern covers `directory` in
    /// `repository` together with everything below it.
    pub fn covers_recursively(
        &self,
        repository: &RepositoryName,
        directory: &PathFragment,
    ) -> bool {
        let package = PackageIdentifier::new(repository.clone(), directory.clone());
        self.patterns
            .iter()
            .any(|pattern| pattern.covers_all_transitive_subdirectories_of(&package))
    }
}
