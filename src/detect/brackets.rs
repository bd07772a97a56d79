//! Stack-based matching of paired delimiters.
//!
//! Each bracket kind is scanned independently over the whole source, since
//! brackets routinely span lines.

use crate::analysis::Diagnostic;

/// A kind of paired delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
    Parenthesis,
    CurlyBrace,
    SquareBracket,
}

impl BracketKind {
    pub fn open(&self) -> char {
        match self {
            BracketKind::Parenthesis => '(',
            BracketKind::CurlyBrace => '{',
            BracketKind::SquareBracket => '[',
        }
    }

    pub fn close(&self) -> char {
        match self {
            BracketKind::Parenthesis => ')',
            BracketKind::CurlyBrace => '}',
            BracketKind::SquareBracket => ']',
        }
    }

    /// Human-readable name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            BracketKind::Parenthesis => "parenthesis",
            BracketKind::CurlyBrace => "curly brace",
            BracketKind::SquareBracket => "square bracket",
        }
    }
}

/// Scan order used by the JavaScript analyzer.
pub const SCRIPT_ORDER: [BracketKind; 3] = [
    BracketKind::Parenthesis,
    BracketKind::CurlyBrace,
    BracketKind::SquareBracket,
];

/// Scan order used by the C family analyzers.
pub const BLOCK_ORDER: [BracketKind; 3] = [
    BracketKind::CurlyBrace,
    BracketKind::Parenthesis,
    BracketKind::SquareBracket,
];

/// An open delimiter waiting for its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BracketFrame {
    ch: char,
    line: usize,
    column: usize,
}

/// Scan for one bracket kind.
///
/// An unmatched close is reported where it occurs and leaves the stack empty;
/// opens still on the stack at the end are reported in push order.
pub fn scan_kind(code: &str, kind: BracketKind) -> Vec<Diagnostic> {
    let (open, close) = (kind.open(), kind.close());
    let mut diagnostics = Vec::new();
    let mut stack: Vec<BracketFrame> = Vec::new();
    let mut line = 1;
    let mut column = 1;

    for ch in code.chars() {
        if ch == open {
            stack.push(BracketFrame { ch, line, column });
        } else if ch == close && stack.pop().is_none() {
            diagnostics.push(Diagnostic::error(
                line,
                column,
                format!("Unmatched closing {}", kind.name()),
            ));
        }

        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    for frame in stack {
        debug_assert_eq!(frame.ch, open);
        diagnostics.push(Diagnostic::error(
            frame.line,
            frame.column,
            format!("Unclosed {}", kind.name()),
        ));
    }

    diagnostics
}

/// Scan each kind in turn and concatenate the findings.
pub fn scan(code: &str, kinds: &[BracketKind]) -> Vec<Diagnostic> {
    kinds.iter().flat_map(|&kind| scan_kind(code, kind)).collect()
}
