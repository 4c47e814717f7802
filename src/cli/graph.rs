//! `cmake-relink graph`: print the link graph in Graphviz DOT.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::common::ProjectArgs;
use crate::graph::export::{EdgeSource, LinkGraph};
use crate::sync::Project;

/// Print declared (or reconciled) link edges as a DOT digraph.
#[derive(Args, Debug)]
pub struct GraphCommand {
    #[command(flatten)]
    project: ProjectArgs,

    /// Use the reconciled lists instead of the declared ones
    #[arg(long)]
    resolved: bool,
}

impl GraphCommand {
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let options = self.project.resolve(config_path)?;
        let mut project = Project::analyze(&options)?;

        let source = if self.resolved {
            project.plan(&options.ordering())?;
            EdgeSource::Resolved
        } else {
            EdgeSource::Declared
        };

        let link_graph = LinkGraph::build(project.graph(), source);
        print!("{}", link_graph.to_dot());
        Ok(())
    }
}
