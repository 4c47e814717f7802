//! Graphviz export of the link graph.

use petgraph::algo::is_cyclic_directed;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use super::{TargetGraph, TargetId, TargetKind};

/// Which dependency lists become edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    /// Items of the first link statement as written
    Declared,
    /// Lists computed by reconciliation
    Resolved,
}

/// Edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    Public,
    Private,
    Interface,
    Alias,
}

impl fmt::Display for LinkScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Interface => "INTERFACE",
            Self::Alias => "ALIAS",
        })
    }
}

/// Directed view of the target graph: an edge `a -> b` means `a` links `b`.
pub struct LinkGraph {
    graph: DiGraph<String, LinkScope>,
}

impl LinkGraph {
    /// Build the link graph from every defined target.
    #[must_use]
    pub fn build(targets: &TargetGraph, source: EdgeSource) -> Self {
        let mut graph = DiGraph::new();
        let mut indices: HashMap<TargetId, NodeIndex> = HashMap::new();
        let mut ensure = |graph: &mut DiGraph<String, LinkScope>, id: TargetId| {
            *indices
                .entry(id)
                .or_insert_with(|| graph.add_node(targets.name(id).to_string()))
        };

        for id in targets.defined() {
            let node = targets.node(id);
            let from = ensure(&mut graph, id);

            if let TargetKind::Alias(target) = node.kind {
                let to = ensure(&mut graph, target);
                graph.update_edge(from, to, LinkScope::Alias);
                continue;
            }

            let lists: Vec<(LinkScope, &[TargetId])> = match source {
                EdgeSource::Declared => vec![
                    (LinkScope::Public, node.declared_public_deps.as_slice()),
                    (LinkScope::Private, node.declared_private_deps.as_slice()),
                    (LinkScope::Interface, node.declared_interface_deps.as_slice()),
                ],
                EdgeSource::Resolved => vec![
                    (LinkScope::Public, node.resolved_public_deps.as_slice()),
                    (LinkScope::Private, node.resolved_private_deps.as_slice()),
                ],
            };

            for (scope, deps) in lists {
                for dep in deps {
                    let to = ensure(&mut graph, *dep);
                    graph.update_edge(from, to, scope);
                }
            }
        }

        Self { graph }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether some target transitively links itself.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Render as Graphviz DOT, warning first if the graph has a cycle.
    #[must_use]
    pub fn to_dot(&self) -> String {
        if self.is_cyclic() {
            warn!("Link graph contains a cycle");
        }
        let content = Dot::with_config(&self.graph, &[Config::GraphContentOnly]);
        format!("digraph {{\n{content}}}\n")
    }
}
