//! Deferred text edits against an immutable original.
//!
//! Edits are recorded against byte offsets of the original text and applied
//! once, in offset order, so earlier edits never shift the positions of later
//! ones.

use anyhow::Result;
use std::ops::Range;

use crate::core::RelinkError;

/// A single replacement of `range` in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Bytes of the original text to replace; empty for an insertion
    pub range: Range<usize>,
    /// Replacement text
    pub replacement: String,
}

/// Ordered collection of non-overlapping edits for one file.
#[derive(Debug, Clone, Default)]
pub struct TextEdits {
    edits: Vec<TextEdit>,
}

impl TextEdits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `range` with `replacement`.
    pub fn replace(&mut self, range: Range<usize>, replacement: impl Into<String>) {
        self.edits.push(TextEdit {
            range,
            replacement: replacement.into(),
        });
    }

    /// Insert `text` at byte `offset`.
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.replace(offset..offset, text);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Produce the edited text.
    ///
    /// # Errors
    ///
    /// Returns [`RelinkError::OverlappingEdits`] if two edits touch the same
    /// bytes, or if a range falls outside `original`.
    pub fn apply(mut self, file: &str, original: &str) -> Result<String> {
        self.edits.sort_by_key(|edit| (edit.range.start, edit.range.end));

        let mut output = String::with_capacity(original.len());
        let mut cursor = 0;
        for edit in &self.edits {
            let Range { start, end } = edit.range;
            if start < cursor || end > original.len() || start > end {
                return Err(RelinkError::OverlappingEdits {
                    file: file.to_string(),
                    offset: start,
                }
                .into());
            }
            output.push_str(&original[cursor..start]);
            output.push_str(&edit.replacement);
            cursor = end;
        }
        output.push_str(&original[cursor..]);

        Ok(output)
    }
}
