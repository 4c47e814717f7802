//! CMake list-file front end.
//!
//! - [`lexer`] splits text into tokens that cover every byte of the input
//! - [`parser`] groups tokens into [`CommandInvocation`]s with exact spans
//! - [`listener`] dispatches target commands to a [`ListFileListener`]

pub mod lexer;
pub mod listener;
pub mod parser;

pub use lexer::{Token, TokenKind};
pub use listener::{CommandKind, ListFileListener, walk};
pub use parser::{Argument, ArgumentKind, CommandInvocation, ListFile};
