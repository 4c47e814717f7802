//! Global constants used throughout the cmake-relink codebase.
//!
//! Keyword tables, file classification rules and default file names live here
//! so the listeners, the scanner and the CLI agree on a single definition.

/// Default name of the build-description files the tool discovers.
pub const DEFAULT_LIST_FILE: &str = "CMakeLists.txt";

/// Name of the optional configuration file at the repository root.
pub const CONFIG_FILE_NAME: &str = "cmake-relink.toml";

/// Environment variable that points at an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "CMAKE_RELINK_CONFIG";

/// Keywords accepted by `add_library`/`add_executable` that carry no
/// information the dependency model needs.
pub const NOOP_KEYWORDS: &[&str] = &[
    "EXCLUDE_FROM_ALL",
    "WIN32",
    "MACOSX",
    "IMPORTED",
    "GLOBAL",
    "STATIC",
    "SHARED",
    "MODULE",
];

/// Extensions (without the dot) that classify a file as a compiled source.
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cpp", "cxx", "cc", "c++"];

/// Extensions (without the dot) that classify an explicitly listed file as a header.
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hpp"];

/// Glob used to find implicit headers next to a target's sources.
pub const PAIRED_HEADER_GLOB: &str = "*.h*";

/// Variables that expand to the directory of the list file being processed.
pub const LIST_DIR_VARIABLES: &[&str] = &["${CMAKE_CURRENT_LIST_DIR}", "${CMAKE_CURRENT_SOURCE_DIR}"];

/// Command names that define a new target.
pub const ADD_TARGET_COMMANDS: &[&str] = &["add_library", "add_executable"];

/// Command that declares link dependencies.
pub const LINK_COMMAND: &str = "target_link_libraries";

/// Command that attaches further sources to an existing target.
pub const SOURCES_COMMAND: &str = "target_sources";
