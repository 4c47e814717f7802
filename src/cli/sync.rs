//! `cmake-relink sync`: rewrite link statements in place.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::common::{ProjectArgs, display_path};
use crate::sync::{Project, write_changes};

/// Rewrite every out-of-date `target_link_libraries` statement.
#[derive(Args, Debug)]
pub struct SyncCommand {
    #[command(flatten)]
    project: ProjectArgs,

    /// Report what would change without writing
    #[arg(long)]
    dry_run: bool,
}

impl SyncCommand {
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let options = self.project.resolve(config_path)?;
        let mut project = Project::analyze(&options)?;
        let changes = project.plan(&options.ordering())?;

        if changes.is_empty() {
            println!("{}", "All link statements are up to date".green());
            return Ok(());
        }

        for change in &changes {
            let verb = if self.dry_run { "would update" } else { "updated" };
            println!("  {} {}", verb.yellow(), display_path(change, project.root()));
        }

        if self.dry_run {
            println!("{} file(s) would change (dry run)", changes.len());
        } else {
            write_changes(&changes)?;
            println!("{} {} file(s)", "Updated".green().bold(), changes.len());
        }
        Ok(())
    }
}
