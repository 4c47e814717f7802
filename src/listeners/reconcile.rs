//! Computes the corrected link list of a target from its graph state.

use anyhow::Result;
use std::collections::BTreeSet;
use tracing::debug;

use crate::core::RelinkError;
use crate::graph::{TargetGraph, TargetId, TargetKind, TargetNode};

/// Sort order for rendered dependency lists.
///
/// Names starting with the internal prefix come first, then everything else;
/// both groups are alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyOrdering {
    internal_prefix: Option<String>,
}

impl DependencyOrdering {
    /// Order with `prefix` marking project-internal targets.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            internal_prefix: Some(prefix.into()).filter(|prefix| !prefix.is_empty()),
        }
    }

    #[must_use]
    pub fn internal_prefix(&self) -> Option<&str> {
        self.internal_prefix.as_deref()
    }

    fn is_internal(&self, name: &str) -> bool {
        self.internal_prefix
            .as_deref()
            .is_some_and(|prefix| name.starts_with(prefix))
    }

    /// Deduplicate and order `ids` by name.
    #[must_use]
    pub fn sort(&self, graph: &TargetGraph, ids: impl IntoIterator<Item = TargetId>) -> Vec<TargetId> {
        let mut ids: Vec<TargetId> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        ids.sort_by(|a, b| {
            let (a, b) = (graph.name(*a), graph.name(*b));
            (!self.is_internal(a), a).cmp(&(!self.is_internal(b), b))
        });
        ids
    }
}

/// Result of reconciling one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Ordered public (or, for interface targets, interface) dependencies
    pub public: Vec<TargetId>,
    /// Ordered private dependencies; always empty for interface targets
    pub private: Vec<TargetId>,
    /// Replacement text for the region between the parentheses
    pub rendered: String,
}

/// Whether a declared dependency is kept even though no include implies it.
///
/// Interface targets keep everything. Object and interface libraries, and
/// `${VAR}` items, cannot be discovered through includes.
fn keeps_declared(graph: &TargetGraph, target: &TargetNode, dep: TargetId) -> Result<bool> {
    if target.is_interface() || graph.node(dep).is_variable() {
        return Ok(true);
    }
    let concrete = graph.resolve_alias(dep)?;
    Ok(matches!(
        graph.node(concrete).kind,
        TargetKind::ObjectLibrary | TargetKind::InterfaceOnly
    ))
}

fn kept_declared(graph: &TargetGraph, target: &TargetNode, deps: &[TargetId]) -> Result<Vec<TargetId>> {
    let mut kept = Vec::new();
    for dep in deps {
        if keeps_declared(graph, target, *dep)? {
            kept.push(*dep);
        }
    }
    Ok(kept)
}

/// Reconcile the link list of `id`.
///
/// # Errors
///
/// [`RelinkError::NoDependencies`] when a non-interface target ends up with
/// nothing to link, and [`RelinkError::AliasCycle`] from alias resolution.
pub fn reconcile(graph: &TargetGraph, id: TargetId, ordering: &DependencyOrdering) -> Result<Reconciliation> {
    let target = graph.node(id);

    let mut public: BTreeSet<TargetId> = target.observed_public_deps.clone();
    public.extend(kept_declared(graph, target, &target.declared_public_deps)?);
    if target.is_interface() {
        public.extend(target.declared_interface_deps.iter().copied());
    } else if !target.declared_interface_deps.is_empty() {
        debug!("Dropping INTERFACE items of non-interface target '{}'", target.name);
    }

    let mut private: BTreeSet<TargetId> = target
        .observed_private_deps
        .iter()
        .filter(|dep| !public.contains(dep))
        .copied()
        .collect();
    private.extend(
        kept_declared(graph, target, &target.declared_private_deps)?
            .into_iter()
            .filter(|dep| !public.contains(dep)),
    );

    public.remove(&id);
    private.remove(&id);

    if public.is_empty() && private.is_empty() && !target.is_interface() {
        let declared = target.declared_public_deps.iter().chain(&target.declared_private_deps);
        public.extend(declared.copied().filter(|dep| *dep != id));
        if public.is_empty() {
            return Err(RelinkError::NoDependencies {
                target: target.name.clone(),
            }
            .into());
        }
        debug!("No observed dependencies for '{}', keeping declared ones", target.name);
    }

    if target.is_interface() {
        let all = ordering.sort(graph, public.into_iter().chain(private));
        let rendered = render(graph, &target.name, &[("INTERFACE", all.as_slice())]);
        return Ok(Reconciliation {
            public: all,
            private: Vec::new(),
            rendered,
        });
    }

    let public = ordering.sort(graph, public);
    let private = ordering.sort(graph, private);
    let rendered = render(graph, &target.name, &[("PUBLIC", public.as_slice()), ("PRIVATE", private.as_slice())]);
    Ok(Reconciliation {
        public,
        private,
        rendered,
    })
}

fn render(graph: &TargetGraph, name: &str, clauses: &[(&str, &[TargetId])]) -> String {
    let mut out = name.to_string();
    for (keyword, deps) in clauses {
        if deps.is_empty() {
            continue;
        }
        out.push(' ');
        out.push_str(keyword);
        for dep in *deps {
            out.push(' ');
            out.push_str(graph.name(*dep));
        }
    }
    out
}
