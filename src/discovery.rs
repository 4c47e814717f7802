//! List-file discovery for cmake-relink.
//!
//! Walks a project tree and collects every build-description file whose name
//! matches a glob pattern, skipping directories the user excluded.
//!
//! # Exclusions
//!
//! Exclusion patterns are matched against directory *names*, not full paths,
//! so `third_party` prunes every directory of that name anywhere in the tree
//! and `build*` prunes `build`, `build-debug` and so on. A pruned directory is
//! never descended into.
//!
//! # Determinism
//!
//! Results are sorted, so the declaration pass always sees files in the same
//! order. The first definition of a target wins, which makes the order
//! observable.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cmake_relink::discovery::ListFileFinder;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut finder = ListFileFinder::new("CMakeLists.txt")?;
//! finder.exclude("third_party")?;
//! finder.exclude("build*")?;
//!
//! for file in finder.find(Path::new("/path/to/project"))? {
//!     println!("{}", file.display());
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Finds list files below a root directory.
#[derive(Debug, Clone)]
pub struct ListFileFinder {
    file_pattern: Pattern,
    exclude_patterns: Vec<Pattern>,
}

impl ListFileFinder {
    /// Creates a finder for files whose name matches `file_pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if `file_pattern` is not a valid glob.
    pub fn new(file_pattern: &str) -> Result<Self> {
        let file_pattern = Pattern::new(file_pattern)
            .with_context(|| format!("Invalid list file pattern: {file_pattern}"))?;

        Ok(Self {
            file_pattern,
            exclude_patterns: Vec::new(),
        })
    }

    /// Adds a directory-name pattern to prune from the walk.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid glob.
    pub fn exclude(&mut self, pattern: &str) -> Result<()> {
        let pattern = Pattern::new(pattern)
            .with_context(|| format!("Invalid exclusion pattern: {pattern}"))?;
        self.exclude_patterns.push(pattern);
        Ok(())
    }

    /// Adds several exclusion patterns.
    ///
    /// # Errors
    ///
    /// Returns the first invalid pattern.
    pub fn exclude_all<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<()> {
        for pattern in patterns {
            self.exclude(pattern.as_ref())?;
        }
        Ok(())
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        // the root itself is never pruned
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.exclude_patterns.iter().any(|pattern| pattern.matches(&name))
    }

    /// Returns every matching file below `root`, sorted.
    ///
    /// Symlinks are not followed. Unreadable directories are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not an existing directory.
    pub fn find(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("Project directory does not exist: {}", root.display());
        }
        debug!("Searching for '{}' below {}", self.file_pattern, root.display());

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                let excluded = self.is_excluded(entry);
                if excluded {
                    trace!("Excluding {}", entry.path().display());
                }
                !excluded
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if entry.file_type().is_file()
                && self.file_pattern.matches(&entry.file_name().to_string_lossy())
            {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!("Found {} list files", files.len());
        Ok(files)
    }
}
