//! `cmake-relink check`: fail if any link statement is out of date.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::common::{ProjectArgs, display_path};
use crate::core::RelinkError;
use crate::sync::Project;

/// Run the full pipeline without writing; non-zero exit when files would change.
#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    project: ProjectArgs,
}

impl CheckCommand {
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let options = self.project.resolve(config_path)?;
        let mut project = Project::analyze(&options)?;
        let changes = project.plan(&options.ordering())?;

        if changes.is_empty() {
            println!("{}", "All link statements are up to date".green());
            return Ok(());
        }

        for change in &changes {
            println!(
                "  {} {} ({} lines)",
                "out of date".red(),
                display_path(change, project.root()),
                change.changed_lines()
            );
        }
        Err(RelinkError::OutOfSync {
            count: changes.len(),
        }
        .into())
    }
}
