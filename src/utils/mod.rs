//! Utility helpers shared across modules.

pub mod fs;

pub use fs::{atomic_write, safe_write};
