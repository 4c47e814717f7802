//! cmake-relink - keep CMake link statements honest
//!
//! Scans a C/C++ project's `CMakeLists.txt` files and sources, works out which
//! targets each target really depends on from its `#include`s, and rewrites
//! every `target_link_libraries` statement to match. Only the text between the
//! statement's parentheses changes; comments, formatting and every other
//! command are preserved byte for byte.
//!
//! # Architecture Overview
//!
//! The pipeline is a two-pass batch over an in-memory [`graph::TargetGraph`]:
//!
//! 1. **Declaration** - every list file is parsed ([`cmake`]) and walked by a
//!    [`listeners::DeclarationListener`], which records targets, their sources
//!    and headers, aliases and the first link statement of each target.
//! 2. **Observation** - [`includes::map_includes`] scans every attributed file
//!    and maps each include to the target that owns the header, or to a
//!    well-known third-party package.
//! 3. **Rewrite** - a [`listeners::RewriteListener`] walks each file again,
//!    reconciles the declared and observed state of each target and records a
//!    [`edit::TextEdits`] list that is applied once per file.
//!
//! All files are computed before any is written ([`sync`]), so a fatal error
//! never leaves a half-edited tree.
//!
//! # Modules
//!
//! - [`cmake`] - lexer, parser and listener dispatch for list files
//! - [`graph`] - target registry, alias resolution and DOT export
//! - [`listeners`] - the declaration and rewrite passes
//! - [`includes`] - include scanning, canonical names and header ownership
//! - [`discovery`] - list-file discovery with directory exclusions
//! - [`sync`] - the end-to-end pipeline
//! - [`config`] - `cmake-relink.toml` handling
//! - [`cli`] - command-line interface
//! - [`core`] - error types and user-facing error rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use cmake_relink::sync::{SyncOptions, sync};
//!
//! # fn example() -> anyhow::Result<()> {
//! let options = SyncOptions::new("/path/to/velox")
//!     .with_internal_prefix("velox")
//!     .with_exclude("proto")
//!     .with_exclude("external");
//!
//! let changes = sync(&options, true)?;
//! for change in &changes {
//!     println!("would update {}", change.path.display());
//! }
//! # Ok(())
//! # }
//! ```

// Front end
pub mod cmake;
pub mod discovery;

// Model and passes
pub mod edit;
pub mod graph;
pub mod includes;
pub mod listeners;
pub mod sync;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
