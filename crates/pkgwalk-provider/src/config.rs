//! Configuration for the query layer.
//!
//! Load order: `.pkgwalk/config.toml` → environment variables → defaults.

use crate::roots::PackagePath;
use anyhow::Result;
use pkgwalk_core::path::Root;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level query-layer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub package_path: PackagePathConfig,
}

/// Package path configuration for the main repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagePathConfig {
    /// Absolute roots walked, in order, when resolving main-repository
    /// packages. External repositories resolve their root from the graph
    /// and ignore this list.
    pub roots: Vec<PathBuf>,
}

impl QueryConfig {
    /// Load config from `.pkgwalk/config.toml` in the workspace root, with
    /// env var overrides. Falls back to defaults if no config file exists.
    ///
    /// `PKGWALK_PACKAGE_PATH` (colon-separated) replaces the configured
    /// root list wholesale.
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let config_path = workspace_root.join(".pkgwalk").join("config.toml");

        let mut config: QueryConfig = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        // Environment variable override
        if let Ok(value) = std::env::var("PKGWALK_PACKAGE_PATH")
            && !value.is_empty()
        {
            config.package_path.roots = value.split(':').map(PathBuf::from).collect();
        }

        // Validate roots
        for root in &config.package_path.roots {
            if !root.is_absolute() {
                anyhow::bail!(
                    "package path root '{}' must be absolute",
                    root.display()
                );
            }
        }

        Ok(config)
    }

    /// The configured roots as a [`PackagePath`].
    pub fn package_path(&self) -> PackagePath {
        PackagePath::new(
            self.package_path
                .roots
                .iter()
                .cloned()
                .map(Root::new)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QueryConfig::default();
        assert!(config.package_path.roots.is_empty());
        assert!(config.package_path().is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[package_path]
roots = ["/workspace", "/overlay"]
"#;
        let config: QueryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.package_path.roots,
            vec![PathBuf::from("/workspace"), PathBuf::from("/overlay")]
        );
        let package_path = config.package_path();
        assert_eq!(package_path.roots()[0], Root::new("/workspace"));
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = QueryConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert!(config.package_path.roots.is_empty());
    }

    #[test]
    fn test_load_reads_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".pkgwalk");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            r#"
[package_path]
roots = ["/workspace"]
"#,
        )
        .unwrap();

        let config = QueryConfig::load(tmp.path()).unwrap();
        assert_eq!(config.package_path.roots, vec![PathBuf::from("/workspace")]);
    }

    #[test]
    fn test_load_rejects_relative_roots() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".pkgwalk");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            r#"
[package_path]
roots = ["relative/root"]
"#,
        )
        .unwrap();

        let err = QueryConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("must be absolute"));
    }
}
