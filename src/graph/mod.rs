//! In-memory registry of dependency nodes.
//!
//! The graph is the single source of truth shared by every pass. Nodes are
//! created on first mention, so a link statement may refer to a target whose
//! `add_library` appears in a file parsed later (or never, for external
//! libraries). Alias links are plain [`TargetId`] references; there is no
//! ownership between nodes.
//!
//! # Lifecycle
//!
//! 1. The declaration pass calls [`TargetGraph::get_or_create`],
//!    [`TargetGraph::define`] and [`TargetGraph::define_alias`] while walking
//!    every list file.
//! 2. The include mapper fills the `observed_*` sets.
//! 3. [`TargetGraph::reset_reconciled`] runs before the rewrite pass, which
//!    looks nodes up with [`TargetGraph::get`] so it never grows the graph.

pub mod export;
mod node;

pub use node::{TargetId, TargetKind, TargetNode};

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::warn;

use crate::core::RelinkError;

/// Registry of every dependency name referenced in the tree.
#[derive(Debug, Default)]
pub struct TargetGraph {
    nodes: Vec<TargetNode>,
    index: HashMap<String, TargetId>,
}

impl TargetGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the node named `name`, creating it if needed.
    pub fn get_or_create(&mut self, name: &str) -> TargetId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = TargetId(self.nodes.len());
        self.nodes.push(TargetNode::new(name));
        self.index.insert(name.to_string(), id);
        id
    }

    /// Id of the node named `name`, if it exists.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TargetId> {
        self.index.get(name).copied()
    }

    /// Borrow a node.
    #[must_use]
    pub fn node(&self, id: TargetId) -> &TargetNode {
        &self.nodes[id.0]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: TargetId) -> &mut TargetNode {
        &mut self.nodes[id.0]
    }

    /// Name of a node.
    #[must_use]
    pub fn name(&self, id: TargetId) -> &str {
        &self.nodes[id.0].name
    }

    /// Record the defining statement of a target.
    ///
    /// Returns `false` (and logs a warning) if the target was already defined;
    /// the first definition is kept.
    pub fn define(&mut self, id: TargetId, kind: TargetKind, definition_path: PathBuf) -> bool {
        let node = &mut self.nodes[id.0];
        if let Some(existing) = &node.definition_path {
            warn!(
                "Target '{}' already defined in {}; ignoring definition in {}",
                node.name,
                existing.display(),
                definition_path.display()
            );
            return false;
        }
        node.kind = kind;
        node.definition_path = Some(definition_path);
        true
    }

    /// Define `id` as an alias of `target`, with the same first-wins rule as [`define`](Self::define).
    pub fn define_alias(&mut self, id: TargetId, target: TargetId, definition_path: PathBuf) -> bool {
        self.define(id, TargetKind::Alias(target), definition_path)
    }

    /// Follow alias links from `id` to the concrete node.
    ///
    /// # Errors
    ///
    /// Returns [`RelinkError::AliasCycle`] if the chain revisits a node.
    pub fn resolve_alias(&self, id: TargetId) -> Result<TargetId> {
        let mut current = id;
        let mut seen = HashSet::new();
        let mut chain = vec![self.name(id).to_string()];

        while let TargetKind::Alias(target) = self.nodes[current.0].kind {
            if !seen.insert(current) {
                return Err(RelinkError::AliasCycle {
                    chain: chain.join(" -> "),
                }
                .into());
            }
            chain.push(self.name(target).to_string());
            current = target;
        }

        Ok(current)
    }

    /// Check every alias chain in the graph.
    ///
    /// # Errors
    ///
    /// Returns the first [`RelinkError::AliasCycle`] found.
    pub fn check_aliases(&self) -> Result<()> {
        for (id, node) in self.iter() {
            if node.is_alias() {
                self.resolve_alias(id)?;
            }
        }
        Ok(())
    }

    /// Clear every `reconciled` flag ahead of a rewrite pass.
    pub fn reset_reconciled(&mut self) {
        for node in &mut self.nodes {
            node.reconciled = false;
        }
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &TargetNode)> {
        self.nodes.iter().enumerate().map(|(index, node)| (TargetId(index), node))
    }

    /// Ids of nodes that have a defining statement, in insertion order.
    pub fn defined(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.iter().filter(|(_, node)| node.is_defined()).map(|(id, _)| id)
    }

    /// Every node name, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.name.as_str())
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
