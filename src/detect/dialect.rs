//! Restrictions of the C dialect layered over the C++ pipeline.
//!
//! Keywords that exist only in C++ are hard errors here: they are not valid
//! tokens in C at all. The remaining checks are C89/C90 conventions and only
//! warn.

use std::collections::HashSet;

use lazy_static::lazy_static;
use phf::phf_set;
use regex::Regex;

use crate::analysis::{Diagnostic, LineIndex};

use super::mask::{column_of, line_comment_starts, mask_literals, words};

/// Keywords of C++ with no meaning in C.
pub static CPP_ONLY_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "class", "namespace", "template", "bool", "true", "false", "new", "delete",
    "try", "catch", "throw", "private", "public", "protected", "virtual",
    "friend", "operator", "this",
};

/// Words that can open a definition-shaped line without naming a function.
static NOT_FUNCTION_NAMES: phf::Set<&'static str> = phf_set! {
    "if", "for", "while", "switch", "return", "sizeof", "else", "do", "case", "goto",
};

lazy_static! {
    /// `<type> [*]<name> =|;|[` with optional qualifiers, indented inside a block.
    static ref BLOCK_DECLARATION: Regex = Regex::new(
        r"^\s+(?:(?:const|unsigned|signed|long|short|static|volatile|register|struct|enum|union)\s+)*([A-Za-z_]\w*)\s*\**\s*[A-Za-z_]\w*\s*(=|;|\[)"
    ).unwrap();

    /// `<type> [*]<name>(` at the start of a line.
    static ref DEFINITION_HEAD: Regex = Regex::new(
        r"^(?:(?:static|inline|extern|const|unsigned|signed|struct)\s+)*([A-Za-z_]\w*)\s*\**\s*([A-Za-z_]\w*)\s*\("
    ).unwrap();
}

/// Run the dialect checks in order: keywords, declarations-first, prototypes.
pub fn detect_dialect_violations(code: &str, declarations_first: bool, prototypes: bool) -> Vec<Diagnostic> {
    let masked = mask_literals(code);
    let mut diagnostics = cpp_only_keywords(&masked);
    if declarations_first {
        diagnostics.extend(late_declarations(&masked));
    }
    if prototypes {
        diagnostics.extend(missing_prototypes(&masked));
    }
    diagnostics
}

/// Every whole-word use of a C++-only keyword.
pub fn cpp_only_keywords(masked: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (idx, line) in masked.split('\n').enumerate() {
        for word in words(line) {
            if CPP_ONLY_KEYWORDS.contains(word.text) {
                diagnostics.push(Diagnostic::error(
                    idx + 1,
                    word.column,
                    format!("'{}' is a C++ keyword, not standard C", word.text),
                ));
            }
        }
    }
    diagnostics
}

fn is_block_declaration(line: &str) -> bool {
    BLOCK_DECLARATION
        .captures(line)
        .is_some_and(|caps| !NOT_FUNCTION_NAMES.contains(&caps[1]))
}

/// A declaration that follows a non-declaration statement in the same block.
fn late_declarations(masked: &str) -> Vec<Diagnostic> {
    let lines: Vec<&str> = masked.split('\n').collect();
    let mut diagnostics = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if !is_block_declaration(line) {
            continue;
        }
        let previous = lines[..idx].iter().rev().find(|l| !l.trim().is_empty());
        let Some(previous) = previous else {
            continue;
        };

        let prev = previous.trim();
        let prev_is_statement = (prev.ends_with(';') || prev.ends_with('}'))
            && !is_block_declaration(previous)
            && !prev.starts_with('#');
        if prev_is_statement {
            let column = column_of(line, line.len() - line.trim_start().len());
            diagnostics.push(Diagnostic::warning(
                idx + 1,
                column,
                "Variable declaration not at the beginning of a block (not allowed in C89/C90)",
            ));
        }
    }

    diagnostics
}

/// A definition-shaped line for a function with no earlier prototype.
fn missing_prototypes(masked: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    // Names seen so far on prototype-shaped lines (a `(` and a `;`)
    let mut declared: HashSet<&str> = HashSet::new();

    for (idx, line) in masked.split('\n').enumerate() {
        if line.contains(';') {
            if line.contains('(') {
                declared.extend(words(line).iter().map(|w| w.text));
            }
            continue;
        }
        let Some(caps) = DEFINITION_HEAD.captures(line) else {
            continue;
        };
        let name = &caps[2];
        if name == "main" || NOT_FUNCTION_NAMES.contains(name) || NOT_FUNCTION_NAMES.contains(&caps[1]) {
            continue;
        }

        if !declared.contains(name) {
            diagnostics.push(Diagnostic::warning(
                idx + 1,
                1,
                format!("Function '{}' might be missing a prototype declaration", name),
            ));
        }
    }

    diagnostics
}

/// `//` comments, which C89/C90 does not have.
pub fn detect_line_comments(code: &str) -> Vec<Diagnostic> {
    let index = LineIndex::new(code);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for offset in line_comment_starts(code) {
        let (line, column) = index.position_of_byte(offset);
        if diagnostics.last().is_some_and(|d| d.line == line) {
            continue;
        }
        diagnostics.push(Diagnostic::warning(
            line,
            column,
            "C++ style comments (//) are not standard in C89/C90",
        ));
    }

    diagnostics
}
