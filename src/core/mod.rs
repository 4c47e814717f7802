//! Core types for cmake-relink
//!
//! Currently this is the error system shared by every other module:
//! - [`RelinkError`] - Enumerated fatal error types
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format

pub mod error;

pub use error::{ErrorContext, RelinkError, user_friendly_error};
