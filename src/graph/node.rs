//! Node types stored in the [`TargetGraph`](super::TargetGraph).

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Index of a node in the target graph.
///
/// Ids are handed out in insertion order and stay valid for the lifetime of
/// the graph; nodes are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub(super) usize);

impl TargetId {
    /// Position of the node in insertion order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of target a node describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetKind {
    /// Regular library or executable
    #[default]
    Normal,
    /// `add_library(<name> INTERFACE ...)`
    InterfaceOnly,
    /// `add_library(<name> OBJECT ...)`
    ObjectLibrary,
    /// `add_library(<name> ALIAS <target>)`
    Alias(TargetId),
}

impl TargetKind {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::InterfaceOnly => "interface",
            Self::ObjectLibrary => "object",
            Self::Alias(_) => "alias",
        }
    }
}

/// One dependency node: a target defined in the tree, or any name a link
/// statement or include mapping referred to.
#[derive(Debug, Clone, Default)]
pub struct TargetNode {
    /// Unique registry key
    pub name: String,
    /// Compiled sources attributed to the target
    pub sources: BTreeSet<PathBuf>,
    /// Headers attributed to the target, explicit or paired with a source
    pub headers: BTreeSet<PathBuf>,
    /// Include paths seen in the target's headers
    pub observed_public_includes: BTreeSet<String>,
    /// Include paths seen in the target's sources
    pub observed_private_includes: BTreeSet<String>,
    /// Owners of the public includes
    pub observed_public_deps: BTreeSet<TargetId>,
    /// Owners of the private includes
    pub observed_private_deps: BTreeSet<TargetId>,
    /// `PUBLIC` items of the first link statement
    pub declared_public_deps: Vec<TargetId>,
    /// `PRIVATE` items of the first link statement
    pub declared_private_deps: Vec<TargetId>,
    /// `INTERFACE` items of the first link statement
    pub declared_interface_deps: Vec<TargetId>,
    /// Reconciled public dependencies
    pub resolved_public_deps: Vec<TargetId>,
    /// Reconciled private dependencies
    pub resolved_private_deps: Vec<TargetId>,
    /// Target kind; meaningful once defined
    pub kind: TargetKind,
    /// Directory of the list file that first defined the target
    pub definition_path: Option<PathBuf>,
    /// Whether the first link statement has populated the `declared_*` lists
    pub link_declared: bool,
    /// Whether the link statement has been rewritten in the current pass
    pub reconciled: bool,
}

impl TargetNode {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether a defining statement has been seen.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.definition_path.is_some()
    }

    /// Whether this node is an `ALIAS` of another.
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self.kind, TargetKind::Alias(_))
    }

    /// Whether this node is an interface-only library.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, TargetKind::InterfaceOnly)
    }

    /// Whether the name is a variable reference such as `${FOLLY_LIBRARIES}`.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.name.starts_with("${")
    }

    /// Iterate over every attributed file, sources first.
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.sources.iter().chain(self.headers.iter())
    }
}
