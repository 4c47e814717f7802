//! Reverse map from header path to the targets that own it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::graph::TargetId;
use crate::listeners::args::normalize;

/// Header ownership keyed by repository-relative path with `/` separators.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    root: PathBuf,
    owners: HashMap<String, Vec<TargetId>>,
}

impl HeaderIndex {
    /// Create an index for the repository at `root`.
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: normalize(root.as_ref()),
            owners: HashMap::new(),
        }
    }

    /// Repository root the keys are relative to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Index key for `path`: relative to the root if inside it, else the full path.
    #[must_use]
    pub fn key_for(&self, path: &Path) -> String {
        let path = normalize(path);
        match path.strip_prefix(&self.root) {
            Ok(relative) => relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path.to_string_lossy().replace('\\', "/"),
        }
    }

    /// Record that the header at `path` belongs to `target`.
    pub fn record(&mut self, path: &Path, target: TargetId) {
        let key = self.key_for(path);
        self.record_key(key, target);
    }

    /// Record ownership under an already computed key.
    pub fn record_key(&mut self, key: impl Into<String>, target: TargetId) {
        let owners = self.owners.entry(key.into()).or_default();
        if !owners.contains(&target) {
            owners.push(target);
        }
    }

    /// Add `key` only if nothing owns it yet.
    pub fn insert_if_absent(&mut self, key: &str, target: TargetId) {
        if !self.owners.contains_key(key) {
            self.owners.insert(key.to_string(), vec![target]);
        }
    }

    /// Owners of `key`, empty if unknown.
    #[must_use]
    pub fn owners(&self, key: &str) -> &[TargetId] {
        self.owners.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.owners.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
