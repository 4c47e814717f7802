//! Header-ownership mapping: turns scanned includes into observed dependencies.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

use super::{HeaderIndex, IncludeResolver};
use crate::graph::{TargetGraph, TargetId};
use crate::listeners::args::normalize;

/// Counters reported after mapping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MappingStats {
    /// Files whose includes were scanned
    pub files_scanned: usize,
    /// Files that could not be read
    pub files_skipped: usize,
    /// Includes attributed to an owner
    pub includes_resolved: usize,
}

/// Fill the `observed_*` state of every defined, non-alias target.
///
/// Includes from headers become public observations and includes from
/// sources private ones. An include is attributed by, in order: the header
/// index entry for the include resolved against the including file's
/// directory, the entry for the include as a repository-relative path, and
/// finally the canonical third-party dependency, which is created in the graph
/// and recorded in the index.
pub fn map_includes(graph: &mut TargetGraph, index: &mut HeaderIndex, resolver: &dyn IncludeResolver) -> MappingStats {
    let mut stats = MappingStats::default();
    let targets: Vec<TargetId> = graph.defined().filter(|id| !graph.node(*id).is_alias()).collect();

    for target in targets {
        let node = graph.node(target);
        let files: Vec<(std::path::PathBuf, bool)> = node
            .sources
            .iter()
            .map(|path| (path.clone(), false))
            .chain(node.headers.iter().map(|path| (path.clone(), true)))
            .collect();

        for (file, public) in files {
            let includes = match resolver.includes_of(&file) {
                Ok(includes) => includes,
                Err(e) => {
                    warn!("Skipping includes of {}: {e:#}", file.display());
                    stats.files_skipped += 1;
                    continue;
                }
            };
            stats.files_scanned += 1;

            let mut owners = BTreeSet::new();
            for include in &includes {
                let found = resolve_owners(graph, index, resolver, &file, include);
                if !found.is_empty() {
                    stats.includes_resolved += 1;
                }
                owners.extend(found.into_iter().filter(|owner| *owner != target));
            }

            let node = graph.node_mut(target);
            if public {
                node.observed_public_includes.extend(includes);
                node.observed_public_deps.extend(owners);
            } else {
                node.observed_private_includes.extend(includes);
                node.observed_private_deps.extend(owners);
            }
        }

        debug!(
            "Mapped '{}': {} public, {} private",
            graph.name(target),
            graph.node(target).observed_public_deps.len(),
            graph.node(target).observed_private_deps.len()
        );
    }

    stats
}

fn resolve_owners(
    graph: &mut TargetGraph,
    index: &mut HeaderIndex,
    resolver: &dyn IncludeResolver,
    including_file: &Path,
    include: &str,
) -> Vec<TargetId> {
    if let Some(directory) = including_file.parent() {
        let key = index.key_for(&normalize(&directory.join(include)));
        let owners = index.owners(&key);
        if !owners.is_empty() {
            return owners.to_vec();
        }
    }

    let owners = index.owners(include);
    if !owners.is_empty() {
        return owners.to_vec();
    }

    match resolver.canonical_dependency(include) {
        Some(name) => {
            let id = graph.get_or_create(&name);
            index.insert_if_absent(include, id);
            vec![id]
        }
        None => Vec::new(),
    }
}
