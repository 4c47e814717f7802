//! Structural parser turning tokens into command invocations.
//!
//! A list file is a flat sequence of `name(args...)` invocations separated by
//! whitespace and comments. The parser keeps token indices for the command
//! name and both parentheses so later passes can address the exact byte range
//! between them.

use anyhow::{Context, Result};
use std::ops::Range;
use std::path::{Path, PathBuf};

use super::lexer::{SyntaxError, Token, TokenKind, tokenize};
use crate::core::RelinkError;

/// How an argument was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Bare word, may contain variable references and generator expressions
    Unquoted,
    /// `"..."`
    Quoted,
    /// `[=[ ... ]=]`
    Bracket,
    /// Parenthesized group of nested arguments
    Compound(Vec<Argument>),
}

/// One argument of a command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// How the argument was written
    pub kind: ArgumentKind,
    /// Raw source text, delimiters included
    pub raw: String,
    /// Index of the first token of the argument
    pub first_token: usize,
    /// Index of the last token of the argument
    pub last_token: usize,
}

impl Argument {
    /// Argument value with quote or bracket delimiters stripped.
    #[must_use]
    pub fn value(&self) -> &str {
        match self.kind {
            ArgumentKind::Quoted => self
                .raw
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(&self.raw),
            ArgumentKind::Bracket => {
                let equals = self.raw[1..].bytes().take_while(|byte| *byte == b'=').count();
                let delimiter = equals + 2;
                if self.raw.len() >= delimiter * 2 {
                    &self.raw[delimiter..self.raw.len() - delimiter]
                } else {
                    &self.raw
                }
            }
            ArgumentKind::Unquoted | ArgumentKind::Compound(_) => &self.raw,
        }
    }

    /// Whether this is a plain (non-parenthesized) argument.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        !matches!(self.kind, ArgumentKind::Compound(_))
    }
}

/// A single `name(args...)` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Command name as written
    pub name: String,
    /// 1-based line of the command name
    pub line: usize,
    /// Token index of the command name
    pub name_token: usize,
    /// Token index of the opening parenthesis
    pub open_paren: usize,
    /// Token index of the matching closing parenthesis
    pub close_paren: usize,
    /// Arguments in source order
    pub arguments: Vec<Argument>,
}

impl CommandInvocation {
    /// Values of all simple arguments, delimiters stripped.
    ///
    /// Compound arguments are skipped; callers that cannot tolerate them check
    /// [`has_compound_argument`](Self::has_compound_argument) first.
    #[must_use]
    pub fn simple_values(&self) -> Vec<String> {
        self.arguments
            .iter()
            .filter(|argument| argument.is_simple())
            .map(|argument| argument.value().to_string())
            .collect()
    }

    /// Simple arguments in source order.
    pub fn simple_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|argument| argument.is_simple())
    }

    /// Whether any argument is parenthesized.
    #[must_use]
    pub fn has_compound_argument(&self) -> bool {
        self.arguments.iter().any(|argument| !argument.is_simple())
    }

    /// Byte range strictly between the parentheses.
    #[must_use]
    pub fn argument_span(&self, tokens: &[Token]) -> Range<usize> {
        tokens[self.open_paren].end..tokens[self.close_paren].start
    }

    /// Whether the command name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A parsed list file: the original text, its tokens and its commands.
#[derive(Debug, Clone)]
pub struct ListFile {
    path: PathBuf,
    source: String,
    tokens: Vec<Token>,
    commands: Vec<CommandInvocation>,
}

impl ListFile {
    /// Parse `source` as the contents of the list file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RelinkError::Syntax`] with the file, line and column of the
    /// first problem.
    pub fn parse(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let source = source.into();
        let with_file = |error: SyntaxError| RelinkError::Syntax {
            file: path.display().to_string(),
            line: error.line,
            column: error.column,
            message: error.message,
        };

        let tokens = tokenize(&source).map_err(with_file)?;
        let commands = Parser::new(&source, &tokens).parse().map_err(with_file)?;

        Ok(Self {
            path,
            source,
            tokens,
            commands,
        })
    }

    /// Read and parse the list file at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read list file: {}", path.display()))?;
        Self::parse(path, source)
    }

    /// Path this file was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing this file; relative file names resolve against it.
    #[must_use]
    pub fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// The original, unmodified text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All tokens, trivia included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Commands in file order.
    #[must_use]
    pub fn commands(&self) -> &[CommandInvocation] {
        &self.commands
    }

    /// Regenerate the text from the token stream.
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens.iter().map(|token| token.text(&self.source)).collect()
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Vec<CommandInvocation>, SyntaxError> {
        let mut commands = Vec::new();

        while let Some(name_token) = self.next_significant() {
            let token = self.tokens[name_token];
            let name = token.text(self.source);
            if token.kind != TokenKind::Word || !is_identifier(name) {
                return Err(self.error_at(name_token, format!("expected command name, found '{name}'")));
            }
            self.pos = name_token + 1;

            let open_paren = match self.next_significant() {
                Some(index) if self.tokens[index].kind == TokenKind::LeftParen => index,
                _ => return Err(self.error_at(name_token, format!("expected '(' after '{name}'"))),
            };
            self.pos = open_paren + 1;

            let (arguments, close_paren) = self.parse_arguments(open_paren)?;

            commands.push(CommandInvocation {
                name: name.to_string(),
                line: token.line,
                name_token,
                open_paren,
                close_paren,
                arguments,
            });
        }

        Ok(commands)
    }

    /// Parse arguments up to the parenthesis matching `open_paren`.
    fn parse_arguments(&mut self, open_paren: usize) -> Result<(Vec<Argument>, usize), SyntaxError> {
        let mut arguments = Vec::new();

        loop {
            let Some(index) = self.next_significant() else {
                return Err(self.error_at(open_paren, "unterminated argument list".to_string()));
            };
            let token = self.tokens[index];
            self.pos = index + 1;

            let kind = match token.kind {
                TokenKind::RightParen => return Ok((arguments, index)),
                TokenKind::LeftParen => {
                    let (nested, close) = self.parse_arguments(index)?;
                    arguments.push(Argument {
                        kind: ArgumentKind::Compound(nested),
                        raw: self.source[token.start..self.tokens[close].end].to_string(),
                        first_token: index,
                        last_token: close,
                    });
                    continue;
                }
                TokenKind::QuotedArgument => ArgumentKind::Quoted,
                TokenKind::BracketArgument => ArgumentKind::Bracket,
                _ => ArgumentKind::Unquoted,
            };

            arguments.push(Argument {
                kind,
                raw: token.text(self.source).to_string(),
                first_token: index,
                last_token: index,
            });
        }
    }

    /// Skip trivia and return the index of the next meaningful token, if any.
    fn next_significant(&mut self) -> Option<usize> {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.pos += 1;
        }
        (self.pos < self.tokens.len()).then_some(self.pos)
    }

    fn error_at(&self, index: usize, message: String) -> SyntaxError {
        let token = self.tokens[index];
        SyntaxError {
            line: token.line,
            column: token.column,
            message,
        }
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
