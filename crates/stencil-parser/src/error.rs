//! Error types for template parsing.

use thiserror::Error;

use crate::node::BlockKind;

/// A structural problem found while parsing a template.
///
/// Every variant carries the byte offset of the directive that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `{{` with no matching `}}`.
    #[error("unclosed directive at offset {offset}: missing `}}}}`")]
    UnclosedDelimiter { offset: usize },

    /// `{{}}` or a directive containing only whitespace.
    #[error("empty directive at offset {offset}")]
    EmptyDirective { offset: usize },

    /// The directive does not contain a valid dotted path.
    #[error("invalid path `{path}` at offset {offset}")]
    InvalidPath { path: String, offset: usize },

    /// `{{#if}}` or `{{#each}}` with nothing to test or iterate.
    #[error("`#{kind}` at offset {offset} is missing a path")]
    MissingPath { kind: BlockKind, offset: usize },

    /// A `#` or `/` directive with an unrecognized keyword.
    #[error("unknown directive `{directive}` at offset {offset}")]
    UnknownDirective { directive: String, offset: usize },

    /// A block opened at `offset` was never closed.
    #[error("`#{kind}` opened at offset {offset} is never closed")]
    UnclosedBlock { kind: BlockKind, offset: usize },

    /// A close marker with no open block.
    #[error("unexpected `/{kind}` at offset {offset}: no open block")]
    UnexpectedClose { kind: BlockKind, offset: usize },

    /// A close marker that does not match the innermost open block.
    #[error("mismatched `/{found}` at offset {offset}: expected `/{expected}`")]
    MismatchedClose {
        expected: BlockKind,
        found: BlockKind,
        offset: usize,
    },

    /// More than `max` blocks open at once.
    #[error("block nesting exceeds {max} at offset {offset}")]
    DepthExceeded { max: usize, offset: usize },

    /// `{{else}}` outside of an `if` block.
    #[error("`else` at offset {offset} is not inside an `if` block")]
    OrphanElse { offset: usize },

    /// A second `{{else}}` in the same `if` block.
    #[error("duplicate `else` at offset {offset}")]
    DuplicateElse { offset: usize },
}

impl ParseError {
    /// Byte offset of the directive that caused the error.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnclosedDelimiter { offset }
            | ParseError::EmptyDirective { offset }
            | ParseError::InvalidPath { offset, .. }
            | ParseError::MissingPath { offset, .. }
            | ParseError::UnknownDirective { offset, .. }
            | ParseError::UnclosedBlock { offset, .. }
            | ParseError::UnexpectedClose { offset, .. }
            | ParseError::MismatchedClose { offset, .. }
            | ParseError::DepthExceeded { offset, .. }
            | ParseError::OrphanElse { offset }
            | ParseError::DuplicateElse { offset } => *offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_escapes_braces() {
        let err = ParseError::UnclosedDelimiter { offset: 4 };
        assert_eq!(
            err.to_string(),
            "unclosed directive at offset 4: missing `}}`"
        );
    }

    #[test]
    fn test_display_mismatched() {
        let err = ParseError::MismatchedClose {
            expected: BlockKind::Each,
            found: BlockKind::If,
            offset: 12,
        };
        assert_eq!(
            err.to_string(),
            "mismatched `/if` at offset 12: expected `/each`"
        );
        assert_eq!(err.offset(), 12);
    }
}
