//! Tokenizer for `{{...}}` directives.

use crate::error::ParseError;
use crate::node::BlockKind;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A lexical unit of a template. Directive tokens borrow their path text
/// and record the byte offset of their opening `{{`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text between directives.
    Text(&'a str),
    /// `{{path}}`
    Variable { path: &'a str, offset: usize },
    /// `{{#if path}}` or `{{#each path}}`
    Open {
        kind: BlockKind,
        path: &'a str,
        offset: usize,
    },
    /// `{{else}}`
    Else { offset: usize },
    /// `{{/if}}` or `{{/each}}`
    Close { kind: BlockKind, offset: usize },
}

/// Splits a template into text and directive tokens.
///
/// Yields an error and then stops if a directive cannot be classified.
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    fn classify(inner: &'a str, offset: usize) -> Result<Token<'a>, ParseError> {
        if inner.is_empty() {
            return Err(ParseError::EmptyDirective { offset });
        }

        if let Some(rest) = inner.strip_prefix('#') {
            let (keyword, path) = match rest.find(char::is_whitespace) {
                Some(idx) => (&rest[..idx], rest[idx..].trim()),
                None => (rest, ""),
            };
            let kind =
                BlockKind::from_keyword(keyword).ok_or_else(|| ParseError::UnknownDirective {
                    directive: inner.to_string(),
                    offset,
                })?;
            if path.is_empty() {
                return Err(ParseError::MissingPath { kind, offset });
            }
            return Ok(Token::Open { kind, path, offset });
        }

        if let Some(rest) = inner.strip_prefix('/') {
            let kind =
                BlockKind::from_keyword(rest.trim()).ok_or_else(|| ParseError::UnknownDirective {
                    directive: inner.to_string(),
                    offset,
                })?;
            return Ok(Token::Close { kind, offset });
        }

        if inner == "else" {
            return Ok(Token::Else { offset });
        }

        Ok(Token::Variable {
            path: inner,
            offset,
        })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];

        match remaining.find(OPEN) {
            Some(0) => {}
            Some(idx) => {
                self.pos += idx;
                return Some(Ok(Token::Text(&remaining[..idx])));
            }
            None => {
                self.pos = self.input.len();
                return Some(Ok(Token::Text(remaining)));
            }
        }

        let offset = self.pos;
        let after_open = &remaining[OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            self.failed = true;
            return Some(Err(ParseError::UnclosedDelimiter { offset }));
        };

        self.pos += OPEN.len() + close + CLOSE.len();
        let token = Self::classify(after_open[..close].trim(), offset);
        if token.is_err() {
            self.failed = true;
        }
        Some(token)
    }
}
