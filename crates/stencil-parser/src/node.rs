//! Template tree types.

use std::fmt;

/// The keyword of a block directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `{{#if path}}`
    If,
    /// `{{#each path}}`
    Each,
}

impl BlockKind {
    /// Looks up a block keyword (`if` or `each`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "if" => Some(BlockKind::If),
            "each" => Some(BlockKind::Each),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::Each => "each",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A validated dotted key path such as `user.profile.age` or `this.name`.
///
/// A leading `this` segment is not stored as a key: it marks the path as
/// anchored to the innermost scope frame. `{{this}}` is an anchored path with
/// no segments and refers to the frame value itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    raw: String,
    segments: Vec<String>,
    anchored: bool,
}

impl Path {
    /// Parses a dotted path, returning `None` if any segment is empty or
    /// contains characters outside `[A-Za-z0-9_$-]` (letters may be Unicode).
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments = raw
            .split('.')
            .map(|segment| is_identifier(segment).then(|| segment.to_string()))
            .collect::<Option<Vec<_>>>()?;

        let anchored = segments.first().is_some_and(|first| first == "this");
        if anchored {
            segments.remove(0);
        }

        Some(Self {
            raw: raw.to_string(),
            segments,
            anchored,
        })
    }

    /// The path as written in the template.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Key segments to walk, excluding a leading `this`.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path starts with `this` and so only consults the
    /// innermost scope frame.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// The last segment as written (`this` for a bare `{{this}}`).
    pub fn last_segment(&self) -> &str {
        self.segments.last().map_or("this", String::as_str)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn is_identifier(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '$'))
}

/// A node in the parsed template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, emitted unchanged.
    Text(String),

    /// `{{path}}`
    Variable(Path),

    /// `{{#if path}}then{{else}}else{{/if}}`
    Conditional {
        path: Path,
        then_body: Vec<Node>,
        else_body: Vec<Node>,
    },

    /// `{{#each path}}body{{/each}}`
    Iteration { path: Path, body: Vec<Node> },
}

impl Node {
    /// Returns `true` for conditionals and iterations.
    pub fn is_block(&self) -> bool {
        matches!(self, Node::Conditional { .. } | Node::Iteration { .. })
    }
}

/// Maximum block nesting depth of a node sequence (0 for flat templates).
pub fn nesting_depth(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(_) | Node::Variable(_) => 0,
            Node::Conditional {
                then_body,
                else_body,
                ..
            } => 1 + nesting_depth(then_body).max(nesting_depth(else_body)),
            Node::Iteration { body, .. } => 1 + nesting_depth(body),
        })
        .max()
        .unwrap_or(0)
}
