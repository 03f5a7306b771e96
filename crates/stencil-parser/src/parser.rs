//! Single-pass, stack-based tree construction.

use crate::error::ParseError;
use crate::node::{BlockKind, Node, Path};
use crate::token::{Token, Tokenizer};

/// A block whose close marker has not been seen yet.
struct OpenBlock {
    kind: BlockKind,
    path: Path,
    offset: usize,
    /// Set once `{{else}}` is seen; `nodes` then collects the else branch.
    then_body: Option<Vec<Node>>,
    nodes: Vec<Node>,
}

impl OpenBlock {
    fn into_node(self) -> Node {
        let OpenBlock {
            kind,
            path,
            then_body,
            nodes,
            ..
        } = self;

        match (kind, then_body) {
            (BlockKind::If, Some(then_body)) => Node::Conditional {
                path,
                then_body,
                else_body: nodes,
            },
            (BlockKind::If, None) => Node::Conditional {
                path,
                then_body: nodes,
                else_body: Vec::new(),
            },
            (BlockKind::Each, _) => Node::Iteration { path, body: nodes },
        }
    }
}

/// Parses a template into a node tree.
///
/// Close markers always pair with the innermost open block. Any structural
/// problem is returned as a [`ParseError`]; the parser never panics on
/// malformed input.
///
/// ```rust
/// use stencil_parser::{parse, Node, ParseError};
///
/// let nodes = parse("Hello {{name}}!").unwrap();
/// assert_eq!(nodes.len(), 3);
/// assert!(matches!(nodes[1], Node::Variable(_)));
///
/// assert!(matches!(
///     parse("{{#if flag}}never closed"),
///     Err(ParseError::UnclosedBlock { .. })
/// ));
/// ```
pub fn parse(template: &str) -> Result<Vec<Node>, ParseError> {
    parse_with_max_depth(template, None)
}

/// Parses a template, rejecting it as soon as more than `max_depth` blocks
/// are open at once.
///
/// The check happens while scanning, before any deeper tree exists, so
/// adversarially nested input is refused in bounded memory and stack.
///
/// ```rust
/// use stencil_parser::{parse_with_max_depth, ParseError};
///
/// assert!(parse_with_max_depth("{{#if a}}{{/if}}", Some(1)).is_ok());
/// assert_eq!(
///     parse_with_max_depth("{{#if a}}{{#each b}}{{/each}}{{/if}}", Some(1)),
///     Err(ParseError::DepthExceeded { max: 1, offset: 9 })
/// );
/// ```
pub fn parse_with_max_depth(
    template: &str,
    max_depth: Option<usize>,
) -> Result<Vec<Node>, ParseError> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();

    for token in Tokenizer::new(template) {
        match token? {
            Token::Text(text) => {
                sink(&mut root, &mut stack).push(Node::Text(text.to_string()));
            }
            Token::Variable { path, offset } => {
                let path = parse_path(path, offset)?;
                sink(&mut root, &mut stack).push(Node::Variable(path));
            }
            Token::Open { kind, path, offset } => {
                if let Some(max) = max_depth {
                    if stack.len() >= max {
                        return Err(ParseError::DepthExceeded { max, offset });
                    }
                }
                stack.push(OpenBlock {
                    kind,
                    path: parse_path(path, offset)?,
                    offset,
                    then_body: None,
                    nodes: Vec::new(),
                });
            }
            Token::Else { offset } => match stack.last_mut() {
                Some(block) if block.kind == BlockKind::If => {
                    if block.then_body.is_some() {
                        return Err(ParseError::DuplicateElse { offset });
                    }
                    block.then_body = Some(std::mem::take(&mut block.nodes));
                }
                _ => return Err(ParseError::OrphanElse { offset }),
            },
            Token::Close { kind, offset } => {
                let Some(block) = stack.pop() else {
                    return Err(ParseError::UnexpectedClose { kind, offset });
                };
                if block.kind != kind {
                    return Err(ParseError::MismatchedClose {
                        expected: block.kind,
                        found: kind,
                        offset,
                    });
                }
                let node = block.into_node();
                sink(&mut root, &mut stack).push(node);
            }
        }
    }

    if let Some(block) = stack.pop() {
        return Err(ParseError::UnclosedBlock {
            kind: block.kind,
            offset: block.offset,
        });
    }

    Ok(root)
}

/// The node list currently receiving children: the innermost open block,
/// or the root when no block is open.
fn sink<'s>(root: &'s mut Vec<Node>, stack: &'s mut [OpenBlock]) -> &'s mut Vec<Node> {
    match stack.last_mut() {
        Some(block) => &mut block.nodes,
        None => root,
    }
}

fn parse_path(raw: &str, offset: usize) -> Result<Path, ParseError> {
    Path::parse(raw).ok_or_else(|| ParseError::InvalidPath {
        path: raw.to_string(),
        offset,
    })
}
