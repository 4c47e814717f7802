//! Argument handling shared by the declaration and rewrite passes.
//!
//! This covers argument cleaning, file classification, path expansion and the
//! link scope state machine.

use anyhow::Result;
use regex::Regex;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

use crate::cmake::{CommandInvocation, ListFile};
use crate::constants::{HEADER_EXTENSIONS, LIST_DIR_VARIABLES, NOOP_KEYWORDS, SOURCE_EXTENSIONS};
use crate::core::RelinkError;

/// Whole-token generator expression or whole-token variable reference.
static GENEX_OR_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$<.*>$|^\$\{.*\}$").expect("valid regex"));

/// Generator expression, or a name only partially given by a variable.
static GENEX_OR_PARTIAL_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$<.*>$|.+\$\{.*\}$|^\$\{.*\}.+").expect("valid regex"));

/// Arguments of a target command, after the zero-argument and compound checks.
///
/// # Errors
///
/// [`RelinkError::MissingTargetName`] for `cmd()` and
/// [`RelinkError::CompoundArgument`] when `reject_compound` is set and a
/// parenthesized argument is present.
pub fn command_args(file: &ListFile, command: &CommandInvocation, reject_compound: bool) -> Result<Vec<String>> {
    if command.arguments.is_empty() {
        return Err(RelinkError::MissingTargetName {
            command: command.name.to_ascii_lowercase(),
            file: file.path().display().to_string(),
        }
        .into());
    }
    if reject_compound && command.has_compound_argument() {
        return Err(RelinkError::CompoundArgument {
            command: command.name.to_ascii_lowercase(),
            file: file.path().display().to_string(),
            line: command.line,
        }
        .into());
    }

    let args = command.simple_values();
    if args.is_empty() {
        return Err(RelinkError::MissingTargetName {
            command: command.name.to_ascii_lowercase(),
            file: file.path().display().to_string(),
        }
        .into());
    }
    Ok(args)
}

/// Whether `arg` is a pure variable reference such as `${VAR}`.
#[must_use]
pub fn is_variable_reference(arg: &str) -> bool {
    arg.starts_with("${") && arg.ends_with('}')
}

/// Drop no-op keywords, whole generator expressions and whole variable references.
///
/// Arguments with any literal component survive unchanged.
#[must_use]
pub fn clean_target_args(args: &[String]) -> Vec<String> {
    args.iter()
        .filter(|arg| !NOOP_KEYWORDS.contains(&arg.as_str()))
        .filter(|arg| !GENEX_OR_VARIABLE.is_match(arg))
        .cloned()
        .collect()
}

/// Split link items into the ones that can be modeled and the removed ones.
///
/// Generator expressions and partially-variable names are removed; a pure
/// `${VAR}` item is kept because it names a single library list.
#[must_use]
pub fn clean_link_args(args: &[String]) -> (Vec<String>, Vec<String>) {
    args.iter()
        .cloned()
        .partition(|arg| !GENEX_OR_PARTIAL_VARIABLE.is_match(arg))
}

/// Role of a listed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Source,
    Header,
    Other,
}

/// Classify a file by its extension.
#[must_use]
pub fn classify(path: &Path) -> FileClass {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return FileClass::Other;
    };
    if SOURCE_EXTENSIONS.contains(&extension) {
        FileClass::Source
    } else if HEADER_EXTENSIONS.contains(&extension) {
        FileClass::Header
    } else {
        FileClass::Other
    }
}

/// Resolve a listed file against the directory of the list file.
///
/// Returns `None` for paths that still reference a variable after expanding
/// the current-directory variables.
#[must_use]
pub fn expand_path(arg: &str, directory: &Path) -> Option<PathBuf> {
    let mut expanded = arg.to_string();
    for variable in LIST_DIR_VARIABLES {
        expanded = expanded.replace(variable, &directory.to_string_lossy());
    }
    if expanded.contains("${") {
        debug!("Skipping file with unexpanded variable: {arg}");
        return None;
    }

    let path = Path::new(&expanded);
    let joined = if path.is_absolute() { path.to_path_buf() } else { directory.join(path) };
    Some(normalize(&joined))
}

/// Lexically remove `.` and `..` components.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Sources and headers found among a command's file arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClassifiedFiles {
    pub sources: Vec<PathBuf>,
    pub headers: Vec<PathBuf>,
}

/// Expand and classify file arguments; anything else is ignored.
#[must_use]
pub fn classify_files(args: &[String], directory: &Path) -> ClassifiedFiles {
    let mut files = ClassifiedFiles::default();
    for path in args.iter().filter_map(|arg| expand_path(arg, directory)) {
        match classify(&path) {
            FileClass::Source => files.sources.push(path),
            FileClass::Header => files.headers.push(path),
            FileClass::Other => {}
        }
    }
    files
}

/// Link scope keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Public,
    Private,
    Interface,
}

impl Scope {
    /// Parse a scope keyword; case-sensitive, as CMake is.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "PUBLIC" => Some(Self::Public),
            "PRIVATE" => Some(Self::Private),
            "INTERFACE" => Some(Self::Interface),
            _ => None,
        }
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Interface => "INTERFACE",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Link items grouped by scope, in statement order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LinkScopes {
    pub public: Vec<String>,
    pub private: Vec<String>,
    pub interface: Vec<String>,
}

impl LinkScopes {
    /// Run the scope state machine over link items (target name excluded).
    ///
    /// Items before the first keyword are public.
    #[must_use]
    pub fn split(items: &[String]) -> Self {
        let mut scopes = Self::default();
        let mut scope = Scope::Public;
        for item in items {
            if let Some(next) = Scope::from_keyword(item) {
                scope = next;
                continue;
            }
            let list = match scope {
                Scope::Public => &mut scopes.public,
                Scope::Private => &mut scopes.private,
                Scope::Interface => &mut scopes.interface,
            };
            list.push(item.clone());
        }
        scopes
    }
}
