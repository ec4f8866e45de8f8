//! Error taxonomy shared by the query layer.
//!
//! Package-level failures are typed and reach callers unchanged. Failures
//! discovered mid-traversal on individual directories go to the event
//! handler instead and never abort a walk.

use crate::package::PackageIdentifier;
use thiserror::Error;

/// A package-level failure, either recorded in the graph at evaluation time
/// or derived from a definitive miss against the closed universe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageError {
    /// The package does not exist or could not be loaded.
    #[error("no such package '{id}': {reason}")]
    NoSuchPackage {
        id: PackageIdentifier,
        reason: String,
    },

    /// No definition file marks this directory as a package. A more specific
    /// flavor of [`PackageError::NoSuchPackage`].
    #[error("no such package '{id}': {reason}")]
    BuildFileNotFound {
        id: PackageIdentifier,
        reason: String,
    },

    /// The filesystem changed underneath evaluation.
    #[error("inconsistent filesystem while loading package '{id}': {reason}")]
    InconsistentFilesystem {
        id: PackageIdentifier,
        reason: String,
    },
}

impl PackageError {
    /// The package the failure is about.
    pub fn package_id(&self) -> &PackageIdentifier {
        match self {
            PackageError::NoSuchPackage { id, .. }
            | PackageError::BuildFileNotFound { id, .. }
            | PackageError::InconsistentFilesystem { id, .. } => id,
        }
    }

    /// Whether this is a "no such package" failure, in either flavor.
    pub fn is_no_such_package(&self) -> bool {
        matches!(
            self,
            PackageError::NoSuchPackage { .. } | PackageError::BuildFileNotFound { .. }
        )
    }

    pub fn is_inconsistent_filesystem(&self) -> bool {
        matches!(self, PackageError::InconsistentFilesystem { .. })
    }
}

/// An error recorded in the graph for a key whose evaluation failed.
///
/// Package call sites understand the `Package` arm; any other arm reaching
/// one of them means the snapshot holds something the evaluator never
/// produces for that key kind, and the call site treats it as corruption.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Package(#[from] PackageError),

    /// An evaluation failure outside the package taxonomy, such as an io
    /// error while listing a directory.
    #[error("evaluation failed: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> PackageIdentifier {
        PackageIdentifier::in_main("foo/bar")
    }

    #[test]
    fn test_display_messages() {
        let err = PackageError::NoSuchPackage {
            id: id(),
            reason: "package depends on a cycle".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "no such package 'foo/bar': package depends on a cycle"
        );

        let err = PackageError::InconsistentFilesystem {
            id: id(),
            reason: "directory vanished".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "inconsistent filesystem while loading package 'foo/bar': directory vanished"
        );
    }

    #[test]
    fn test_no_such_package_covers_both_flavors() {
        let plain = PackageError::NoSuchPackage { id: id(), reason: String::new() };
        let build_file = PackageError::BuildFileNotFound { id: id(), reason: String::new() };
        let fs = PackageError::InconsistentFilesystem { id: id(), reason: String::new() };

        assert!(plain.is_no_such_package());
        assert!(build_file.is_no_such_package());
        assert!(!fs.is_no_such_package());
        assert!(fs.is_inconsistent_filesystem());
    }

    #[test]
    fn test_eval_error_from_package_error() {
        let err: EvalError = PackageError::BuildFileNotFound {
            id: id(),
            reason: "package not found".to_owned(),
        }
        .into();
        assert_eq!(err.to_string(), "no such package 'foo/bar': package not found");
    }
}
