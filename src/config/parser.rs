//! TOML parsing with file-path context.

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into `T`.
///
/// Errors carry the path and whether reading or parsing failed:
///
/// ```text
/// Failed to parse config file: /repo/cmake-relink.toml
/// Caused by:
///     unknown field `exclude_dirs`, expected one of ...
/// ```
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, serde::Deserialize)]
    struct Sample {
        name: String,
        depth: u32,
    }

    #[test]
    fn test_parse_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sample.toml");
        std::fs::write(&path, "name = \"velox\"\ndepth = 3\n").unwrap();

        let config: Sample = parse_config(&path).unwrap();
        assert_eq!(config.name, "velox");
        assert_eq!(config.depth, 3);
    }

    #[test]
    fn test_parse_config_errors_name_the_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "name = ").unwrap();

        let err = parse_config::<Sample>(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        assert!(err.to_string().contains("broken.toml"));

        let err = parse_config::<Sample>(&temp.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
