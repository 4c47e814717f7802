//! The end-to-end synchronization pipeline.
//!
//! 1. Discover list files below the project root.
//! 2. Parse every file and run the declaration pass over all of them.
//! 3. Check alias chains, then map includes to observed dependencies.
//! 4. Reset `reconciled` and run the rewrite pass file by file, collecting
//!    one edit list per file.
//! 5. Materialize every changed file in memory.
//! 6. Write the changed files, only after every file has been computed.
//!
//! A fatal error in any step leaves the tree untouched.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cmake::{ListFile, walk};
use crate::config::RelinkConfig;
use crate::constants::DEFAULT_LIST_FILE;
use crate::discovery::ListFileFinder;
use crate::graph::TargetGraph;
use crate::includes::{CanonicalNames, HeaderIndex, MappingStats, SourceIncludeResolver, map_includes};
use crate::listeners::{DeclarationListener, DependencyOrdering, RewriteListener};
use crate::utils::fs::safe_write;

/// Inputs of a run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Project root to search
    pub root: PathBuf,
    /// Name or glob of the list files
    pub list_file: String,
    /// Directory-name patterns to skip
    pub exclude: Vec<String>,
    /// Prefix of project-internal targets, listed first
    pub internal_prefix: Option<String>,
    /// Additional header-prefix mappings
    pub third_party: BTreeMap<String, String>,
}

impl SyncOptions {
    /// Defaults for the project at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            list_file: DEFAULT_LIST_FILE.to_string(),
            exclude: Vec::new(),
            internal_prefix: None,
            third_party: BTreeMap::new(),
        }
    }

    /// Options for `root` taking every unset value from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &RelinkConfig) -> Self {
        let mut options = Self::new(root);
        if let Some(list_file) = &config.list_file {
            options.list_file.clone_from(list_file);
        }
        options.exclude.clone_from(&config.exclude);
        options.internal_prefix.clone_from(&config.internal_prefix);
        options.third_party.clone_from(&config.third_party);
        options
    }

    #[must_use]
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    #[must_use]
    pub fn with_internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.internal_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_list_file(mut self, list_file: impl Into<String>) -> Self {
        self.list_file = list_file.into();
        self
    }

    /// Ordering derived from the internal prefix.
    #[must_use]
    pub fn ordering(&self) -> DependencyOrdering {
        self.internal_prefix
            .as_deref()
            .map(DependencyOrdering::with_prefix)
            .unwrap_or_default()
    }
}

/// A list file whose text would change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// File to rewrite
    pub path: PathBuf,
    /// Text as read
    pub original: String,
    /// Text after applying the edits
    pub updated: String,
}

impl FileChange {
    /// Number of lines that differ, position by position.
    #[must_use]
    pub fn changed_lines(&self) -> usize {
        let original: Vec<_> = self.original.lines().collect();
        let updated: Vec<_> = self.updated.lines().collect();
        let common = original.iter().zip(&updated).filter(|(a, b)| a != b).count();
        common + original.len().abs_diff(updated.len())
    }
}

/// A parsed and analyzed project.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    files: Vec<ListFile>,
    graph: TargetGraph,
    index: HeaderIndex,
    stats: MappingStats,
}

impl Project {
    /// Discover, parse and analyze the project described by `options`.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable root, any list-file syntax error, a fatal
    /// declaration error or an alias cycle.
    pub fn analyze(options: &SyncOptions) -> Result<Self> {
        let root = options
            .root
            .canonicalize()
            .with_context(|| format!("Failed to resolve project directory: {}", options.root.display()))?;

        let mut finder = ListFileFinder::new(&options.list_file)?;
        finder.exclude_all(&options.exclude)?;
        let paths = finder.find(&root)?;

        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            files.push(ListFile::read(path)?);
        }

        let mut graph = TargetGraph::new();
        let mut index = HeaderIndex::new(&root);
        for file in &files {
            let mut listener = DeclarationListener::new(&mut graph).with_header_index(&mut index);
            walk(file, &mut listener)
                .with_context(|| format!("Failed to read targets from {}", file.path().display()))?;
        }
        graph.check_aliases()?;

        let names = CanonicalNames::builtin().with_entries(options.third_party.clone());
        let resolver = SourceIncludeResolver::new(names);
        let stats = map_includes(&mut graph, &mut index, &resolver);

        info!(
            "Analyzed {} list files: {} targets defined, {} nodes, {} source files scanned",
            files.len(),
            graph.defined().count(),
            graph.len(),
            stats.files_scanned
        );

        Ok(Self {
            root,
            files,
            graph,
            index,
            stats,
        })
    }

    /// Run the rewrite pass and return every file whose text would change.
    ///
    /// Updates the resolved state of the graph. Nothing is written.
    ///
    /// # Errors
    ///
    /// Fails on a fatal reconciliation error or overlapping edits.
    pub fn plan(&mut self, ordering: &DependencyOrdering) -> Result<Vec<FileChange>> {
        self.graph.reset_reconciled();

        let mut changes = Vec::new();
        for file in &self.files {
            let mut listener = RewriteListener::new(&mut self.graph, ordering);
            walk(file, &mut listener)
                .with_context(|| format!("Failed to update {}", file.path().display()))?;

            let edits = listener.into_edits();
            if edits.is_empty() {
                continue;
            }
            let updated = edits.apply(&file.path().display().to_string(), file.source())?;
            if updated == file.source() {
                debug!("{} already up to date", file.path().display());
                continue;
            }
            changes.push(FileChange {
                path: file.path().to_path_buf(),
                original: file.source().to_string(),
                updated,
            });
        }
        Ok(changes)
    }

    /// Canonical project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn graph(&self) -> &TargetGraph {
        &self.graph
    }

    #[must_use]
    pub fn header_index(&self) -> &HeaderIndex {
        &self.index
    }

    /// Include-mapping counters.
    #[must_use]
    pub const fn stats(&self) -> MappingStats {
        self.stats
    }

    /// Parsed list files in discovery order.
    #[must_use]
    pub fn files(&self) -> &[ListFile] {
        &self.files
    }
}

/// Write every change. Call only once all changes have been computed.
///
/// # Errors
///
/// Returns the first failed write.
pub fn write_changes(changes: &[FileChange]) -> Result<()> {
    for change in changes {
        safe_write(&change.path, &change.updated)?;
        info!("Updated {} ({} lines)", change.path.display(), change.changed_lines());
    }
    Ok(())
}

/// Analyze the project, plan the rewrite and, unless `dry_run`, apply it.
///
/// Returns the planned changes.
pub fn sync(options: &SyncOptions, dry_run: bool) -> Result<Vec<FileChange>> {
    let mut project = Project::analyze(options)?;
    let changes = project.plan(&options.ordering())?;
    if !dry_run {
        write_changes(&changes)?;
    }
    Ok(changes)
}
