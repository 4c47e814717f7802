//! Options shared by every subcommand.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::RelinkConfig;
use crate::sync::{FileChange, SyncOptions};

/// Which project to process and how.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Project root, as an option
    #[arg(long, value_name = "DIR", conflicts_with = "root")]
    pub project_dir: Option<PathBuf>,

    /// Directory-name pattern to skip; may be repeated
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Prefix of project-internal targets, which are listed first
    #[arg(long, value_name = "PREFIX")]
    pub internal_prefix: Option<String>,

    /// Name or glob of the list files to process
    #[arg(long, value_name = "NAME")]
    pub list_file: Option<String>,
}

impl ProjectArgs {
    /// Merge these flags with the configuration file into run options.
    ///
    /// The configuration is looked up in the project directory given on the
    /// command line, or the current directory.
    pub fn resolve(&self, config_path: Option<&Path>) -> Result<SyncOptions> {
        let explicit_root = self.root.clone().or_else(|| self.project_dir.clone());
        let search_dir = explicit_root.clone().unwrap_or_else(|| PathBuf::from("."));
        let config = RelinkConfig::load(config_path, &search_dir)?;

        let root = explicit_root
            .or_else(|| config.project_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let mut options = SyncOptions::from_config(root, &config);
        options.exclude.extend(self.exclude.iter().cloned());
        if let Some(prefix) = &self.internal_prefix {
            options.internal_prefix = Some(prefix.clone());
        }
        if let Some(list_file) = &self.list_file {
            options.list_file.clone_from(list_file);
        }
        Ok(options)
    }
}

/// Path of a changed file for display, relative to `root` when possible.
pub(crate) fn display_path(change: &FileChange, root: &Path) -> String {
    change
        .path
        .strip_prefix(root)
        .unwrap_or(&change.path)
        .display()
        .to_string()
}
