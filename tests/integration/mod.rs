//! Integration test suite for cmake-relink
//!
//! End-to-end tests over temporary project trees.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: declaration, include mapping and rewriting through the library API
//! - **properties**: round-trip, idempotence, ordering and self-reference guarantees
//! - **error_scenarios**: fatal errors leave the tree untouched
//! - **cli**: the binary's subcommands and exit codes

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod error_scenarios;
mod pipeline;
mod properties;
