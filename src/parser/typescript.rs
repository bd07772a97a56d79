//! An in-memory TypeScript "compiler host".
//!
//! A [`SourceUnit`] owns the parsed tree for one snippet; a [`Program`] built
//! over it with a set of [`CompilerOptions`] reports diagnostics the way the
//! TypeScript compiler does: numeric codes, a category, and an optional
//! absolute offset into the source.

use std::fmt;

use tree_sitter::{Language, Tree};

use super::checker::Checker;
use super::treesitter::{collect_issues, parse, to_syntax_node, IssueKind};
use crate::analysis::{LineIndex, SyntaxNode};
use crate::error::ParseError;

/// File name given to snippets that have no path of their own.
pub const SNIPPET_FILE_NAME: &str = "snippet.ts";

/// Severity class of a compiler diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

/// A diagnostic as produced by the compiler host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsDiagnostic {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// Byte offset into the source, if the diagnostic has a location.
    pub start: Option<usize>,
    pub message: String,
}

impl TsDiagnostic {
    pub fn error(code: u32, start: usize, message: impl Into<String>) -> Self {
        Self {
            code,
            category: DiagnosticCategory::Error,
            start: Some(start),
            message: message.into(),
        }
    }
}

impl fmt::Display for TsDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TS{}: {}", self.code, self.message)
    }
}

/// Checker flags. `strict` turns on every strict-family flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompilerOptions {
    pub strict: bool,
    pub no_implicit_any: bool,
    pub strict_null_checks: bool,
    pub no_unused_locals: bool,
    pub no_unused_parameters: bool,
    pub no_implicit_returns: bool,
}

impl CompilerOptions {
    /// Every checking flag enabled.
    pub fn strict() -> Self {
        Self {
            strict: true,
            no_implicit_any: true,
            strict_null_checks: true,
            no_unused_locals: true,
            no_unused_parameters: true,
            no_implicit_returns: true,
        }
    }

    pub fn implicit_any_is_error(&self) -> bool {
        self.strict || self.no_implicit_any
    }

    pub fn checks_nulls(&self) -> bool {
        self.strict || self.strict_null_checks
    }
}

/// One parsed source file.
pub struct SourceUnit<'a> {
    file_name: String,
    text: &'a str,
    tree: Tree,
    line_map: LineIndex<'a>,
    language: Language,
}

impl<'a> SourceUnit<'a> {
    /// Parse `text` as TypeScript (TSX when the file name ends in `.tsx`).
    pub fn parse(file_name: &str, text: &'a str) -> Result<Self, ParseError> {
        let language: Language = if file_name.ends_with(".tsx") {
            tree_sitter_typescript::LANGUAGE_TSX.into()
        } else {
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
        };
        let tree = parse(&language, "typescript", text)?;

        Ok(Self {
            file_name: file_name.to_string(),
            text,
            tree,
            line_map: LineIndex::new(text),
            language,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Zero-based (line, character) of a byte offset.
    pub fn line_and_character_of_position(&self, position: usize) -> (usize, usize) {
        let (line, column) = self.line_map.position_of_byte(position);
        (line - 1, column - 1)
    }

    /// The unit as a serializable tree.
    pub fn to_syntax_node(&self) -> SyntaxNode {
        to_syntax_node(self.tree.root_node(), &self.line_map)
    }
}

/// A program over a single source unit.
pub struct Program<'u, 'a> {
    unit: &'u SourceUnit<'a>,
    options: CompilerOptions,
}

impl<'u, 'a> Program<'u, 'a> {
    pub fn new(unit: &'u SourceUnit<'a>, options: CompilerOptions) -> Self {
        Self { unit, options }
    }

    /// Grammar errors in the unit.
    pub fn syntactic_diagnostics(&self) -> Vec<TsDiagnostic> {
        collect_issues(self.unit.tree(), self.unit.text())
            .into_iter()
            .map(|issue| match issue.kind {
                IssueKind::Missing(token) => {
                    TsDiagnostic::error(1005, issue.start_byte, format!("'{}' expected.", token))
                }
                _ if issue.top_level => {
                    TsDiagnostic::error(1128, issue.start_byte, "Declaration or statement expected.")
                }
                _ => TsDiagnostic::error(1109, issue.start_byte, "Expression expected."),
            })
            .collect()
    }

    /// Checker diagnostics, sorted by position.
    pub fn semantic_diagnostics(&self) -> Result<Vec<TsDiagnostic>, ParseError> {
        let checker = Checker::new(self.unit, self.options)?;
        let mut diagnostics = checker.check();
        diagnostics.sort_by_key(|d| d.start.unwrap_or(0));
        Ok(diagnostics)
    }
}
