//! Error handling for cmake-relink
//!
//! This module provides the typed error enum used for every fatal condition the
//! tool can hit, plus the user-facing wrapper the CLI prints.
//!
//! # Architecture
//!
//! - [`RelinkError`] - Enumerated error types for all fatal failures
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! Recoverable conditions (a re-defined target, an invalid link item that was
//! dropped, an unreadable source file) are never represented here. They are
//! reported through `tracing::warn!` and the run continues.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cmake_relink::core::{RelinkError, user_friendly_error};
//!
//! let error = RelinkError::NoDependencies {
//!     target: "velox_common_base".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for cmake-relink operations
///
/// Every variant aborts the current run. Because all rewritten files are
/// materialized in memory before anything is written, none of these errors
/// leave a partially edited tree behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelinkError {
    /// A list file could not be tokenized or parsed
    ///
    /// # Fields
    /// - `file`: The list file that failed to parse
    /// - `line`, `column`: 1-based position of the offending token
    /// - `message`: What the parser expected
    #[error("{file} line {line}:{column} {message}")]
    Syntax {
        /// Path of the list file
        file: String,
        /// 1-based line number
        line: usize,
        /// 1-based column number
        column: usize,
        /// Description of the syntax problem
        message: String,
    },

    /// A target-defining or linking command was invoked without arguments
    #[error("`{command}` called without arguments in {file}")]
    MissingTargetName {
        /// The command name as written
        command: String,
        /// File containing the command
        file: String,
    },

    /// A parenthesized argument appeared where only simple arguments are supported
    #[error("Compound arguments not valid for `{command}` in {file} line {line}")]
    CompoundArgument {
        /// The command name as written
        command: String,
        /// File containing the command
        file: String,
        /// Line of the command
        line: usize,
    },

    /// Reconciliation produced nothing to link for a non-interface target
    ///
    /// This happens when neither the scanned includes nor the declared link
    /// statement name a single dependency, so the statement cannot be re-emitted.
    #[error("No targets to link to found for `{target}`")]
    NoDependencies {
        /// Name of the target being reconciled
        target: String,
    },

    /// `ALIAS` definitions form a loop
    ///
    /// # Fields
    /// - `chain`: The alias chain showing the circular reference
    #[error("Circular alias chain detected: {chain}")]
    AliasCycle {
        /// String representation of the alias chain
        chain: String,
    },

    /// Two edits against the same file touch overlapping byte ranges
    #[error("Overlapping edits at byte {offset} in {file}")]
    OverlappingEdits {
        /// File being rewritten
        file: String,
        /// Byte offset where the second edit starts
        offset: usize,
    },

    /// Configuration file is missing or invalid
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Check mode found files whose link statements are out of date
    #[error("{count} file(s) have out-of-date link statements")]
    OutOfSync {
        /// Number of files that would change
        count: usize,
    },

    /// Requested target does not exist in the graph
    #[error("Target '{name}' not found")]
    TargetNotFound {
        /// Name that was looked up
        name: String,
        /// Close matches from the graph, best first
        suggestions: Vec<String>,
    },

    /// Catch-all for errors that do not warrant their own variant
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error wrapper carrying user-facing details and a suggestion
///
/// Details are printed in yellow and suggestions in green, below the red
/// error line.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: RelinkError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: RelinkError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`RelinkError`] anywhere in the `anyhow` chain as well as
/// [`std::io::Error`]; everything else is reported with its full context chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(relink_error) = error.downcast_ref::<RelinkError>() {
        return create_error_context(relink_error.clone());
    }

    for cause in error.chain() {
        if let Some(relink_error) = cause.downcast_ref::<RelinkError>() {
            return create_error_context(relink_error.clone())
                .with_details(format!("{error:#}"));
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(RelinkError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check that the list files are writable by the current user");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(RelinkError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check that the project root and the configured paths exist");
            }
            _ => {}
        }
    }

    ErrorContext::new(RelinkError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: RelinkError) -> ErrorContext {
    match &error {
        RelinkError::Syntax { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the syntax error, or exclude the directory with --exclude")
            .with_details("Only plain command invocations, comments and arguments are understood"),
        RelinkError::MissingTargetName { .. } => ErrorContext::new(error)
            .with_suggestion("Give the command a target name as its first argument"),
        RelinkError::CompoundArgument { .. } => ErrorContext::new(error)
            .with_suggestion("Move parenthesized expressions out of the target definition")
            .with_details("Target definitions may only contain plain, quoted or bracket arguments"),
        RelinkError::NoDependencies { target } => {
            let suggestion = format!(
                "Check that the sources of `{target}` are listed in its definition, or remove its target_link_libraries call"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Neither the scanned includes nor the declared link statement named a dependency")
        }
        RelinkError::AliasCycle { .. } => ErrorContext::new(error)
            .with_suggestion("Point every ALIAS at a concrete library or executable target"),
        RelinkError::OutOfSync { .. } => ErrorContext::new(error)
            .with_suggestion("Run `cmake-relink sync` to rewrite the affected statements"),
        RelinkError::TargetNotFound { suggestions, .. } if !suggestions.is_empty() => {
            let hint = format!("Did you mean: {}?", suggestions.join(", "));
            ErrorContext::new(error).with_suggestion(hint)
        }
        RelinkError::ConfigError { .. } => ErrorContext::new(error).with_suggestion(format!(
            "Check {} or the file passed with --config",
            crate::constants::CONFIG_FILE_NAME
        )),
        _ => ErrorContext::new(error),
    }
}
