//! Core types for analysis results.

use serde::{Deserialize, Serialize};

use super::LineIndex;
use crate::language::Language;

/// Severity levels for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    /// Reserved; no analyzer emits it yet.
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// A single reported issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in chars)
    pub column: usize,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(line: usize, column: usize, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity,
        }
    }

    pub fn error(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::new(line, column, message, Severity::Error)
    }

    pub fn warning(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::new(line, column, message, Severity::Warning)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A 1-indexed position inside a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Serializable snapshot of a syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: None,
            start: None,
            end: None,
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Number of levels in this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

/// The syntax-tree artifact attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyntaxTree {
    Node(SyntaxNode),
    /// Parsing failed before a tree was produced; serializes as `{}`.
    Empty {},
}

impl SyntaxTree {
    /// Placeholder for languages analyzed without a parser.
    pub fn placeholder() -> Self {
        let mut note = SyntaxNode::new("SimpleAST");
        note.message =
            Some("Full syntax tree not available for this language in this environment".to_string());
        let mut root = SyntaxNode::new("TranslationUnit");
        root.children.push(note);
        SyntaxTree::Node(root)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SyntaxTree::Empty {})
    }

    pub fn root(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxTree::Node(node) => Some(node),
            SyntaxTree::Empty {} => None,
        }
    }
}

/// Result of analyzing one snippet.
///
/// Constructed once per call; `is_valid` is derived from the diagnostics and
/// cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    language: Language,
    code: String,
    title: String,
    diagnostics: Vec<Diagnostic>,
    syntax_tree: SyntaxTree,
    is_valid: bool,
}

impl AnalysisResult {
    /// Build a result, clamping every diagnostic onto a real position in `code`.
    pub fn new(
        language: Language,
        code: &str,
        title: &str,
        mut diagnostics: Vec<Diagnostic>,
        syntax_tree: SyntaxTree,
    ) -> Self {
        let index = LineIndex::new(code);
        for diag in &mut diagnostics {
            let (line, column) = index.clamp(diag.line, diag.column);
            diag.line = line;
            diag.column = column;
        }
        let is_valid = !diagnostics.iter().any(Diagnostic::is_error);

        Self {
            language,
            code: code.to_string(),
            title: title.to_string(),
            diagnostics,
            syntax_tree,
            is_valid,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.syntax_tree
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Decompose into diagnostics and tree, for layering another pass on top.
    pub fn into_parts(self) -> (Vec<Diagnostic>, SyntaxTree) {
        (self.diagnostics, self.syntax_tree)
    }
}
