//! Second pass: rewrites `target_link_libraries` statements in place.

use anyhow::Result;
use tracing::{debug, trace};

use super::args::{Scope, command_args};
use super::reconcile::{DependencyOrdering, reconcile};
use crate::cmake::{CommandInvocation, ListFile, ListFileListener};
use crate::constants::LINK_COMMAND;
use crate::edit::TextEdits;
use crate::graph::TargetGraph;

/// Collects the edits for one list file.
///
/// The first link statement of each defined target has its argument region
/// replaced with the reconciled list. Later statements for the same target
/// only gain a scope keyword when they have none, since CMake rejects mixing
/// keyword and plain signatures for one target.
pub struct RewriteListener<'a> {
    graph: &'a mut TargetGraph,
    ordering: &'a DependencyOrdering,
    edits: TextEdits,
}

impl<'a> RewriteListener<'a> {
    pub fn new(graph: &'a mut TargetGraph, ordering: &'a DependencyOrdering) -> Self {
        Self {
            graph,
            ordering,
            edits: TextEdits::new(),
        }
    }

    /// Edits collected so far.
    #[must_use]
    pub fn into_edits(self) -> TextEdits {
        self.edits
    }
}

impl ListFileListener for RewriteListener<'_> {
    fn exit_modify_target(&mut self, file: &ListFile, command: &CommandInvocation) -> Result<()> {
        if !command.is(LINK_COMMAND) {
            return Ok(());
        }

        let args = command_args(file, command, false)?;
        let name = &args[0];
        let Some(id) = self.graph.get(name) else {
            trace!("Skipping link statement for unknown target '{name}'");
            return Ok(());
        };
        let node = self.graph.node(id);
        if !node.is_defined() || node.is_alias() {
            trace!("Skipping link statement for external target '{name}'");
            return Ok(());
        }

        if !node.reconciled {
            let result = reconcile(self.graph, id, self.ordering)?;
            debug!("Rewriting link statement of '{name}' in {}", file.path().display());
            self.edits
                .replace(command.argument_span(file.tokens()), result.rendered);

            let node = self.graph.node_mut(id);
            node.resolved_public_deps = result.public;
            node.resolved_private_deps = result.private;
            node.reconciled = true;
            return Ok(());
        }

        if args[1..].iter().any(|arg| Scope::from_keyword(arg).is_some()) {
            return Ok(());
        }
        let keyword = if node.is_interface() { Scope::Interface } else { Scope::Public };
        if let Some(first_item) = command.simple_arguments().nth(1) {
            let offset = file.tokens()[first_item.first_token].start;
            debug!("Adding {keyword} to repeated link statement of '{name}'");
            self.edits.insert(offset, format!("{keyword} "));
        }
        Ok(())
    }
}
