//! JavaScript parsers.
//!
//! The tolerant parser uses the JavaScript grammar; the strict one uses the
//! TSX grammar, which also accepts JSX, so the two report independently.

use tree_sitter::Language;

use super::treesitter::{collect_issues, first_issue, parse, to_syntax_node, IssueKind, ParseIssue};
use super::{StrictParser, SyntaxIssue, TolerantParse, TolerantParser};
use crate::analysis::LineIndex;
use crate::error::ParseError;

/// Error-recovering parser backed by tree-sitter-javascript.
pub struct TolerantJsParser {
    language: Language,
}

impl TolerantJsParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl Default for TolerantJsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TolerantParser for TolerantJsParser {
    fn name(&self) -> &'static str {
        "tree-sitter-javascript"
    }

    fn parse(&self, source: &str) -> Result<TolerantParse, ParseError> {
        let tree = parse(&self.language, "javascript", source)?;
        let index = LineIndex::new(source);

        let errors = collect_issues(&tree, source)
            .iter()
            .map(|issue| locate(issue, &index))
            .collect();

        Ok(TolerantParse {
            tree: to_syntax_node(tree.root_node(), &index),
            errors,
        })
    }
}

/// Fail-fast parser backed by the TSX grammar.
pub struct StrictJsParser {
    language: Language,
}

impl StrictJsParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl Default for StrictJsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StrictParser for StrictJsParser {
    fn name(&self) -> &'static str {
        "tree-sitter-tsx"
    }

    fn first_error(&self, source: &str) -> Result<Option<SyntaxIssue>, ParseError> {
        let tree = parse(&self.language, "tsx", source)?;
        let Some(issue) = first_issue(&tree, source) else {
            return Ok(None);
        };

        let index = LineIndex::new(source);
        let located = locate(&issue, &index);
        Ok(Some(SyntaxIssue {
            message: format!("{} ({}:{})", located.message, located.line, located.column),
            ..located
        }))
    }
}

fn locate(issue: &ParseIssue, index: &LineIndex) -> SyntaxIssue {
    let (line, column) = index.position_of_byte(issue.start_byte);
    SyntaxIssue {
        line,
        column,
        message: script_message(&issue.kind),
    }
}

/// Message text for a parse issue, in the style of a JavaScript engine.
pub fn script_message(kind: &IssueKind) -> String {
    match kind {
        IssueKind::Unexpected(token) => format!("Unexpected token `{}`", token),
        IssueKind::Missing(token) => format!("Missing `{}`", token),
        IssueKind::UnexpectedEnd => "Unexpected end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerant_clean() {
        let parsed = TolerantJsParser::new().parse("const x = [1, 2].map(n => n * 2);").unwrap();
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.tree.kind, "program");
    }

    #[test]
    fn test_tolerant_reports_errors_and_keeps_tree() {
        let parsed = TolerantJsParser::new().parse("let a = 1;\nlet b = ;\nlet c = 3;").unwrap();
        assert!(!parsed.errors.is_empty());
        assert_eq!(parsed.errors[0].line, 2);
        assert!(parsed.tree.node_count() > 1);
    }

    #[test]
    fn test_strict_clean_and_jsx() {
        let parser = StrictJsParser::new();
        assert_eq!(parser.first_error("function f(a) { return a; }").unwrap(), None);
        assert_eq!(parser.first_error("const el = <div className=\"x\">hi</div>;").unwrap(), None);
    }

    #[test]
    fn test_strict_reports_position_in_message() {
        let issue = StrictJsParser::new()
            .first_error("let a = 1;\nlet b = ;")
            .unwrap()
            .unwrap();
        assert_eq!(issue.line, 2);
        assert!(issue
            .message
            .ends_with(&format!("({}:{})", issue.line, issue.column)));
    }

    #[test]
    fn test_script_messages() {
        assert_eq!(
            script_message(&IssueKind::Unexpected(")".into())),
            "Unexpected token `)`"
        );
        assert_eq!(script_message(&IssueKind::Missing(";".into())), "Missing `;`");
        assert_eq!(script_message(&IssueKind::UnexpectedEnd), "Unexpected end of input");
    }
}
