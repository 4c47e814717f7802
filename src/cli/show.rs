//! `cmake-relink show`: inspect one target.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use strsim::levenshtein;

use super::common::ProjectArgs;
use crate::core::RelinkError;
use crate::graph::{TargetGraph, TargetId, TargetKind, TargetNode};
use crate::sync::Project;

/// Maximum edit distance for suggestions, as a percentage of the name length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print the declared, observed and reconciled state of a target.
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Target name as used in the list files
    pub(crate) target: String,

    #[command(flatten)]
    project: ProjectArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub(crate) format: OutputFormat,
}

impl ShowCommand {
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let options = self.project.resolve(config_path)?;
        let mut project = Project::analyze(&options)?;
        project.plan(&options.ordering())?;

        let graph = project.graph();
        let Some(id) = graph.get(&self.target) else {
            return Err(RelinkError::TargetNotFound {
                suggestions: suggest(graph, &self.target),
                name: self.target,
            }
            .into());
        };

        match self.format {
            OutputFormat::Text => print!("{}", render_text(graph, id)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&render_json(graph, id))?),
        }
        Ok(())
    }
}

/// Up to three target names close to `name`, closest first.
pub(crate) fn suggest(graph: &TargetGraph, name: &str) -> Vec<String> {
    let mut scored: Vec<_> = graph
        .names()
        .map(|candidate| (candidate.to_string(), levenshtein(name, candidate)))
        .collect();
    scored.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    scored
        .into_iter()
        .filter(|(_, distance)| *distance <= name.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(candidate, _)| candidate)
        .collect()
}

fn names<'a>(graph: &TargetGraph, ids: impl IntoIterator<Item = &'a TargetId>) -> Vec<String> {
    ids.into_iter().map(|id| graph.name(*id).to_string()).collect()
}

fn path_list(paths: &BTreeSet<PathBuf>) -> Vec<String> {
    paths.iter().map(|path| path.display().to_string()).collect()
}

fn kind_text(graph: &TargetGraph, node: &TargetNode) -> String {
    match node.kind {
        TargetKind::Alias(target) => format!("alias of {}", graph.name(target)),
        kind => kind.label().to_string(),
    }
}

fn render_text(graph: &TargetGraph, id: TargetId) -> String {
    let node = graph.node(id);
    let mut out = format!("{}\n", node.name.bold());

    let status = if node.is_defined() { kind_text(graph, node) } else { "external".to_string() };
    out.push_str(&format!("  {:<20}{}\n", "kind:", status));
    if let Some(path) = &node.definition_path {
        out.push_str(&format!("  {:<20}{}\n", "defined in:", path.display()));
    }

    for (title, items) in [
        ("sources", path_list(&node.sources)),
        ("headers", path_list(&node.headers)),
        ("declared public", names(graph, &node.declared_public_deps)),
        ("declared private", names(graph, &node.declared_private_deps)),
        ("declared interface", names(graph, &node.declared_interface_deps)),
        ("observed public", names(graph, &node.observed_public_deps)),
        ("observed private", names(graph, &node.observed_private_deps)),
        ("resolved public", names(graph, &node.resolved_public_deps)),
        ("resolved private", names(graph, &node.resolved_private_deps)),
    ] {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("  {}\n", title.cyan()));
        for item in items {
            out.push_str(&format!("    {item}\n"));
        }
    }
    out
}

fn render_json(graph: &TargetGraph, id: TargetId) -> serde_json::Value {
    let node = graph.node(id);
    let kind = if node.is_defined() { kind_text(graph, node) } else { "external".to_string() };
    json!({
        "name": node.name,
        "kind": kind,
        "definition_path": node.definition_path,
        "sources": node.sources,
        "headers": node.headers,
        "declared": {
            "public": names(graph, &node.declared_public_deps),
            "private": names(graph, &node.declared_private_deps),
            "interface": names(graph, &node.declared_interface_deps),
        },
        "observed": {
            "public": names(graph, &node.observed_public_deps),
            "private": names(graph, &node.observed_private_deps),
            "public_includes": node.observed_public_includes,
            "private_includes": node.observed_private_includes,
        },
        "resolved": {
            "public": names(graph, &node.resolved_public_deps),
            "private": names(graph, &node.resolved_private_deps),
        },
    })
}
