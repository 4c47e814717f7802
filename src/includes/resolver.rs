//! Include extraction from C and C++ files.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::canonical::CanonicalNames;

static INCLUDE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*#[ \t]*include[ \t]*[<"]([^>"\n]+)[>"]"#).expect("valid regex")
});

/// Source of include information for the header-ownership mapper.
pub trait IncludeResolver {
    /// Header paths included by `path`, in file order.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    fn includes_of(&self, path: &Path) -> Result<Vec<String>>;

    /// Third-party dependency that provides `header`, if known.
    fn canonical_dependency(&self, header: &str) -> Option<String>;
}

/// Scans `#include` directives with a regular expression.
///
/// Directives inside comments or disabled preprocessor branches are reported
/// as well; the mapper only keeps includes it can attribute.
#[derive(Debug, Clone, Default)]
pub struct SourceIncludeResolver {
    names: CanonicalNames,
}

impl SourceIncludeResolver {
    #[must_use]
    pub const fn new(names: CanonicalNames) -> Self {
        Self { names }
    }

    /// Includes found in `text`.
    #[must_use]
    pub fn scan(text: &str) -> Vec<String> {
        INCLUDE_DIRECTIVE
            .captures_iter(text)
            .map(|captures| captures[1].trim().to_string())
            .collect()
    }
}

impl IncludeResolver for SourceIncludeResolver {
    fn includes_of(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::scan(&String::from_utf8_lossy(&bytes)))
    }

    fn canonical_dependency(&self, header: &str) -> Option<String> {
        self.names.lookup(header).map(str::to_string)
    }
}
