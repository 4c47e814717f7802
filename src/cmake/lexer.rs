//! Tokenizer for CMake list files.
//!
//! The lexer never drops input: every byte of the source belongs to exactly one
//! token, so concatenating the token texts reproduces the file verbatim. That is
//! what lets the rewrite pass replace a single byte range and leave comments,
//! indentation and line endings elsewhere untouched.

use std::ops::Range;
use thiserror::Error;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of spaces, tabs or lone carriage returns
    Space,
    /// `\n` or `\r\n`
    Newline,
    /// `# ...` up to (not including) the end of the line
    LineComment,
    /// `#[[ ... ]]` or `#[==[ ... ]==]`
    BracketComment,
    /// Command name or unquoted argument
    Word,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `"..."` including the quotes
    QuotedArgument,
    /// `[[ ... ]]` or `[==[ ... ]==]` including the brackets
    BracketArgument,
}

impl TokenKind {
    /// Tokens that carry no syntactic meaning between arguments.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Space | Self::Newline | Self::LineComment | Self::BracketComment)
    }
}

/// A token with its byte span and 1-based start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
    /// 1-based line of the first byte
    pub line: usize,
    /// 1-based column (in bytes) of the first byte
    pub column: usize,
}

impl Token {
    /// Text of this token within `source`.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Byte range of this token.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Position-annotated syntax problem, before a file name is attached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}:{column} {message}")]
pub struct SyntaxError {
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    /// What went wrong
    pub message: String,
}

/// Split `source` into tokens.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for an unterminated quoted argument, bracket
/// argument or bracket comment.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let line = self.line;
            let column = start - self.line_start + 1;

            let kind = match self.bytes[start] {
                b'\n' => {
                    self.advance();
                    TokenKind::Newline
                }
                b'\r' if self.peek(1) == Some(b'\n') => {
                    self.advance();
                    self.advance();
                    TokenKind::Newline
                }
                b' ' | b'\t' | b'\r' => {
                    self.consume_space();
                    TokenKind::Space
                }
                b'(' => {
                    self.advance();
                    TokenKind::LeftParen
                }
                b')' => {
                    self.advance();
                    TokenKind::RightParen
                }
                b'#' => {
                    if let Some(equals) = self.bracket_open_at(start + 1) {
                        self.advance();
                        self.consume_bracket(equals, line, column, "bracket comment")?;
                        TokenKind::BracketComment
                    } else {
                        self.consume_line_comment();
                        TokenKind::LineComment
                    }
                }
                b'"' => {
                    self.consume_quoted(line, column)?;
                    TokenKind::QuotedArgument
                }
                b'[' if self.bracket_open_at(start).is_some() => {
                    let equals = self.bracket_open_at(start).unwrap_or_default();
                    self.consume_bracket(equals, line, column, "bracket argument")?;
                    TokenKind::BracketArgument
                }
                _ => {
                    self.consume_word(line, column)?;
                    TokenKind::Word
                }
            };

            self.tokens.push(Token {
                kind,
                start,
                end: self.pos,
                line,
                column,
            });
        }

        Ok(self.tokens)
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if self.bytes[self.pos] == b'\n' {
            self.line += 1;
            self.line_start = self.pos + 1;
        }
        self.pos += 1;
    }

    fn consume_space(&mut self) {
        while let Some(byte) = self.peek(0) {
            let lone_cr = byte == b'\r' && self.peek(1) != Some(b'\n');
            if byte == b' ' || byte == b'\t' || lone_cr {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn consume_line_comment(&mut self) {
        while let Some(byte) = self.peek(0) {
            if byte == b'\n' || (byte == b'\r' && self.peek(1) == Some(b'\n')) {
                break;
            }
            self.advance();
        }
    }

    /// Number of `=` signs if a bracket opener (`[`, `=`*, `[`) starts at `at`.
    fn bracket_open_at(&self, at: usize) -> Option<usize> {
        if self.bytes.get(at) != Some(&b'[') {
            return None;
        }
        let equals = self.bytes[at + 1..].iter().take_while(|byte| **byte == b'=').count();
        (self.bytes.get(at + 1 + equals) == Some(&b'[')).then_some(equals)
    }

    /// Consume `[=*[ ... ]=*]` starting at the current position.
    fn consume_bracket(
        &mut self,
        equals: usize,
        line: usize,
        column: usize,
        what: &str,
    ) -> Result<(), SyntaxError> {
        for _ in 0..equals + 2 {
            self.advance();
        }

        let mut closer = Vec::with_capacity(equals + 2);
        closer.push(b']');
        closer.extend(std::iter::repeat_n(b'=', equals));
        closer.push(b']');

        while self.pos < self.bytes.len() {
            if self.bytes[self.pos..].starts_with(&closer) {
                for _ in 0..closer.len() {
                    self.advance();
                }
                return Ok(());
            }
            self.advance();
        }

        Err(SyntaxError {
            line,
            column,
            message: format!("unterminated {what}"),
        })
    }

    fn consume_quoted(&mut self, line: usize, column: usize) -> Result<(), SyntaxError> {
        // opening quote
        self.advance();
        while let Some(byte) = self.peek(0) {
            match byte {
                b'\\' => {
                    self.advance();
                    if self.pos < self.bytes.len() {
                        self.advance();
                    }
                }
                b'"' => {
                    self.advance();
                    return Ok(());
                }
                _ => self.advance(),
            }
        }

        Err(SyntaxError {
            line,
            column,
            message: "unterminated quoted argument".to_string(),
        })
    }

    fn consume_word(&mut self, line: usize, column: usize) -> Result<(), SyntaxError> {
        while let Some(byte) = self.peek(0) {
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' | b'(' | b')' | b'#' => break,
                b'\\' => {
                    self.advance();
                    if self.pos < self.bytes.len() {
                        self.advance();
                    }
                }
                // legacy `-DX="a b"` style: the quoted part belongs to the word
                b'"' => self.consume_quoted(line, column)?,
                _ => self.advance(),
            }
        }
        Ok(())
    }
}
