//! Relative path fragments and root-anchored paths.
//!
//! A [`PathFragment`] is always relative and slash-separated; a
//! [`RootedPath`] pins one under an absolute [`Root`]. Containment tests are
//! segment-wise, so `"foo/bar"` is under `"foo"` but not under `"fo"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A normalized, slash-separated path relative to some root.
///
/// Fragments carry no leading or trailing slash; the empty fragment names
/// the root directory itself. Construction drops empty and `.` segments but
/// performs no filesystem access and no `..` resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathFragment(String);

impl PathFragment {
    /// The empty fragment, naming the root directory itself.
    pub fn empty() -> Self {
        PathFragment(String::new())
    }

    /// Create a fragment from a slash-separated relative path.
    pub fn new(path: impl AsRef<str>) -> Self {
        let joined = path
            .as_ref()
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        PathFragment(joined)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path segments in order. The empty fragment has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// Whether `self` is `ancestor` or lies below it, segment-wise.
    pub fn starts_with(&self, ancestor: &PathFragment) -> bool {
        if ancestor.is_empty() {
            return true;
        }
        if self.0 == ancestor.0 {
            return true;
        }
        self.0.len() > ancestor.0.len()
            && self.0.starts_with(ancestor.0.as_str())
            && self.0.as_bytes()[ancestor.0.len()] == b'/'
    }

    /// Strict form of [`PathFragment::starts_with`]: true only for proper
    /// descendants of `ancestor`.
    pub fn is_under(&self, ancestor: &PathFragment) -> bool {
        self.0 != ancestor.0 && self.starts_with(ancestor)
    }

    /// The parent directory, or `None` for the empty fragment.
    pub fn parent(&self) -> Option<PathFragment> {
        if self.is_empty() {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some((parent, _)) => Some(PathFragment(parent.to_owned())),
            None => Some(PathFragment::empty()),
        }
    }

    /// `self` extended by a relative child path.
    pub fn join(&self, child: &PathFragment) -> PathFragment {
        if self.is_empty() {
            return child.clone();
        }
        if child.is_empty() {
            return self.clone();
        }
        PathFragment(format!("{}/{}", self.0, child.0))
    }
}

impl fmt::Display for PathFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An absolute filesystem root that relative paths are anchored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Root(PathBuf);

impl Root {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Root(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Anchor `relative` under this root.
    pub fn rooted(&self, relative: PathFragment) -> RootedPath {
        RootedPath { root: self.clone(), relative }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// An absolute root paired with a path relative to it.
///
/// Equality is structural: the same directory reached through two different
/// roots compares unequal, which is what keying pre-computed per-root state
/// requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RootedPath {
    root: Root,
    relative: PathFragment,
}

impl RootedPath {
    pub fn new(root: Root, relative: PathFragment) -> Self {
        RootedPath { root, relative }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    /// The path relative to the root.
    pub fn relative(&self) -> &PathFragment {
        &self.relative
    }
}

impl fmt::Display for RootedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]/[{}]", self.root, self.relative)
    }
}

/// Panic unless every path in `paths` is `directory` or lies below it.
///
/// Callers own normalization of query arguments, so a stray path here is a
/// programmer error rather than a runtime failure.
pub fn check_all_under<'a>(
    paths: impl IntoIterator<Item = &'a PathFragment>,
    directory: &PathFragment,
) {
    for path in paths {
        assert!(
            path.starts_with(directory),
            "path '{path}' is not beneath the queried directory '{directory}'"
        );
    }
}
