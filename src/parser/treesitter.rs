//! Tree-sitter plumbing shared by the parser backends.
//!
//! Tree-sitter never fails on bad input: it recovers and marks the damage with
//! `ERROR` nodes (unexpected text) and zero-width `MISSING` nodes (tokens it
//! had to invent). This module turns those markers into issues and converts
//! trees into serializable [`SyntaxNode`]s.

use tree_sitter::{Language, Node, Parser as TsParser, Tree};

use crate::analysis::{LineIndex, Position, SyntaxNode};
use crate::error::ParseError;

/// Longest token excerpt quoted in a message.
const MAX_TOKEN_CHARS: usize = 24;

/// Deepest level kept when converting a tree.
pub const MAX_TREE_DEPTH: usize = 256;

/// What went wrong at a parse issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Text the grammar could not place.
    Unexpected(String),
    /// A token the parser had to insert.
    Missing(String),
    /// The input ended in the middle of a construct.
    UnexpectedEnd,
}

/// A syntax problem located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Byte offset where the issue starts.
    pub start_byte: usize,
    pub kind: IssueKind,
    /// Whether the issue sits directly under the root node.
    pub top_level: bool,
}

/// Parse `source` with the given grammar.
pub fn parse(language: &Language, grammar: &'static str, source: &str) -> Result<Tree, ParseError> {
    let mut parser = TsParser::new();
    parser.set_language(language)?;
    parser
        .parse(source, None)
        .ok_or(ParseError::NoTree { grammar })
}

/// Collect every outermost `ERROR` node and every `MISSING` node, in
/// document order.
pub fn collect_issues(tree: &Tree, source: &str) -> Vec<ParseIssue> {
    let mut issues = Vec::new();
    let root = tree.root_node();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            issues.push(issue_for(node, source));
            continue;
        }
        if !node.has_error() {
            continue;
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    issues
}

/// The first issue in document order, if any.
pub fn first_issue(tree: &Tree, source: &str) -> Option<ParseIssue> {
    collect_issues(tree, source).into_iter().next()
}

fn issue_for(node: Node, source: &str) -> ParseIssue {
    let top_level = node.parent().is_some_and(|p| p.parent().is_none());

    let kind = if node.is_missing() {
        IssueKind::Missing(node.kind().to_string())
    } else if node.start_byte() >= source.len() || node.start_byte() == node.end_byte() {
        IssueKind::UnexpectedEnd
    } else {
        IssueKind::Unexpected(token_excerpt(first_leaf(node), source))
    };

    ParseIssue {
        start_byte: node.start_byte(),
        kind,
        top_level,
    }
}

fn first_leaf(node: Node) -> Node {
    let mut current = node;
    while let Some(child) = current.child(0) {
        current = child;
    }
    current
}

fn token_excerpt(node: Node, source: &str) -> String {
    let text = node.utf8_text(source.as_bytes()).unwrap_or("");
    let first_line = text.lines().next().unwrap_or("").trim();
    first_line.chars().take(MAX_TOKEN_CHARS).collect()
}

/// Convert a node and its named descendants into a [`SyntaxNode`].
///
/// Levels below [`MAX_TREE_DEPTH`] are cut off; the last kept node says so in
/// its `message`.
pub fn to_syntax_node(node: Node, index: &LineIndex) -> SyntaxNode {
    // Pre-order, so every node comes after its parent.
    let mut flat: Vec<(SyntaxNode, Option<usize>)> = Vec::new();
    let mut stack = vec![(node, None, 1)];

    while let Some((node, parent, depth)) = stack.pop() {
        let slot = flat.len();
        let mut out = convert_node(node, index);

        let mut cursor = node.walk();
        let children: Vec<Node> = node
            .children(&mut cursor)
            .filter(|child| child.is_named() || child.is_error() || child.is_missing())
            .collect();
        if depth >= MAX_TREE_DEPTH && !children.is_empty() {
            out.message = Some(format!("children omitted below depth {}", MAX_TREE_DEPTH));
        } else {
            stack.extend(children.into_iter().rev().map(|child| (child, Some(slot), depth + 1)));
        }
        flat.push((out, parent));
    }

    // Fold back to front: a node's children are all attached before it is.
    let mut root = None;
    while let Some((mut out, parent)) = flat.pop() {
        out.children.reverse();
        match parent {
            Some(p) => flat[p].0.children.push(out),
            None => root = Some(out),
        }
    }
    root.unwrap_or_else(|| SyntaxNode::new(node.kind()))
}

fn convert_node(node: Node, index: &LineIndex) -> SyntaxNode {
    let (start_line, start_col) = index.position_of_byte(node.start_byte());
    let (end_line, end_col) = index.position_of_byte(node.end_byte());

    let mut out = SyntaxNode::new(node.kind());
    out.start = Some(Position {
        line: start_line,
        column: start_col,
    });
    out.end = Some(Position {
        line: end_line,
        column: end_col,
    });
    if node.is_missing() {
        out.message = Some(format!("missing {}", node.kind()));
    }
    out
}
