//! Configuration for cmake-relink
//!
//! Settings come from an optional `cmake-relink.toml` at the project root, or
//! from the file named by `--config` / `CMAKE_RELINK_CONFIG`. Command-line
//! flags override file values; exclusion lists are merged.
//!
//! ```toml
//! # Targets starting with this prefix are listed first
//! internal_prefix = "velox"
//! list_file = "CMakeLists.txt"
//! exclude = ["proto", "external", "build*"]
//!
//! # Extra header-prefix to link-target mappings
//! [third_party]
//! "duckdb/" = "duckdb"
//! "folly/experimental/coro/" = "Folly::folly"
//! ```
//!
//! A relative `project_dir` is resolved against the directory of the
//! configuration file.

pub mod parser;

pub use parser::parse_config;

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::CONFIG_FILE_NAME;
use crate::core::RelinkError;

/// Contents of `cmake-relink.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelinkConfig {
    /// Prefix of project-internal target names
    pub internal_prefix: Option<String>,
    /// Project root, relative to the configuration file
    pub project_dir: Option<PathBuf>,
    /// Name or glob of the list files to process
    pub list_file: Option<String>,
    /// Directory-name patterns to skip
    pub exclude: Vec<String>,
    /// Header prefix to dependency identifier, on top of the built-in table
    pub third_party: BTreeMap<String, String>,
}

impl RelinkConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Otherwise `cmake-relink.toml` in
    /// `search_dir` is used when present, and defaults when not.
    ///
    /// # Errors
    ///
    /// Returns [`RelinkError::ConfigError`] if the file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, search_dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = search_dir.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    debug!("No {CONFIG_FILE_NAME} in {}, using defaults", search_dir.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        debug!("Loading configuration from {}", path.display());
        let mut config: Self = parse_config(&path).map_err(|e| RelinkError::ConfigError {
            message: format!("{e:#}"),
        })?;

        if let (Some(project_dir), Some(base)) = (&config.project_dir, path.parent()) {
            if project_dir.is_relative() {
                config.project_dir = Some(base.join(project_dir));
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let temp = tempdir().unwrap();
        let config = RelinkConfig::load(None, temp.path()).unwrap();
        assert_eq!(config, RelinkConfig::default());
    }

    #[test]
    fn test_load_from_search_dir() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"
internal_prefix = "velox"
project_dir = "src"
exclude = ["proto", "external"]

[third_party]
"duckdb/" = "duckdb"
"#,
        )
        .unwrap();

        let config = RelinkConfig::load(None, temp.path()).unwrap();
        assert_eq!(config.internal_prefix.as_deref(), Some("velox"));
        assert_eq!(config.project_dir, Some(temp.path().join("src")));
        assert_eq!(config.exclude, vec!["proto", "external"]);
        assert_eq!(config.third_party.get("duckdb/").map(String::as_str), Some("duckdb"));
        assert_eq!(config.list_file, None);
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "exclude_dirs = [\"x\"]\n").unwrap();

        let err = RelinkConfig::load(Some(&path), temp.path()).unwrap_err();
        assert!(matches!(
            err.downcast::<RelinkError>().unwrap(),
            RelinkError::ConfigError { .. }
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = tempdir().unwrap();
        assert!(RelinkConfig::load(Some(&temp.path().join("nope.toml")), temp.path()).is_err());
    }
}
