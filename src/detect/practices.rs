//! Best-practice smells for C and C++ sources.
//!
//! Each check is a local pattern over the masked source and only ever
//! produces warnings.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::Diagnostic;

use super::mask::{column_of, mask_literals};

lazy_static! {
    static ref INCLUDE: Regex = Regex::new(r"^\s*#\s*include\b").unwrap();
    static ref GUARD: Regex = Regex::new(r"(?m)^\s*#\s*(ifndef|pragma\s+once)\b").unwrap();
    static ref USING_STD: Regex = Regex::new(r"\busing\s+namespace\s+std\b").unwrap();
    static ref INT_MAIN: Regex = Regex::new(r"\bint\s+main\s*\(").unwrap();
    static ref RETURN: Regex = Regex::new(r"\breturn\b").unwrap();
    static ref NEW: Regex = Regex::new(r"\bnew\b").unwrap();
    static ref DELETE: Regex = Regex::new(r"\bdelete\b").unwrap();
    static ref NULL_LITERAL: Regex = Regex::new(r"\b(NULL|nullptr)\b").unwrap();
}

/// Run every smell check, in a fixed order.
pub fn detect_smells(code: &str) -> Vec<Diagnostic> {
    let masked = mask_literals(code);
    let mut diagnostics = Vec::new();
    diagnostics.extend(missing_include_guard(code));
    diagnostics.extend(using_namespace_std(&masked));
    diagnostics.extend(main_without_return(&masked));
    diagnostics.extend(new_without_delete(&masked));
    diagnostics.extend(arrow_near_null(&masked));
    diagnostics
}

/// A file that starts with `#include` but carries no include guard.
fn missing_include_guard(code: &str) -> Option<Diagnostic> {
    let (idx, first) = code
        .split('\n')
        .enumerate()
        .find(|(_, line)| !line.trim().is_empty())?;

    if INCLUDE.is_match(first) && !GUARD.is_match(code) {
        return Some(Diagnostic::warning(
            idx + 1,
            1,
            "Header file might be missing include guards (#ifndef, #define, #endif or #pragma once)",
        ));
    }
    None
}

fn using_namespace_std(masked: &str) -> Vec<Diagnostic> {
    if !masked.split('\n').any(|line| INCLUDE.is_match(line)) {
        return Vec::new();
    }

    masked
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            USING_STD.find(line).map(|m| {
                Diagnostic::warning(
                    idx + 1,
                    column_of(line, m.start()),
                    "Using 'using namespace std' in a header file is not recommended",
                )
            })
        })
        .collect()
}

/// `int main(...)` whose body never mentions `return`.
fn main_without_return(masked: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for m in INT_MAIN.find_iter(masked) {
        let Some(body) = block_after(masked, m.end()) else {
            continue;
        };
        if !RETURN.is_match(body) {
            let line_start = masked[..m.start()].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let line = masked[..m.start()].matches('\n').count() + 1;
            diagnostics.push(Diagnostic::warning(
                line,
                column_of(&masked[line_start..], m.start() - line_start),
                "Non-void function 'main' might be missing a return statement",
            ));
        }
    }

    diagnostics
}

/// Text of the first brace-delimited block starting at or after `from`.
///
/// Returns None for a prototype (a `;` before any `{`) or an unterminated block.
fn block_after(text: &str, from: usize) -> Option<&str> {
    let rest = &text[from..];
    let open = rest.find(|c| c == '{' || c == ';')?;
    if rest.as_bytes()[open] == b';' {
        return None;
    }

    let mut depth = 0usize;
    for (i, ch) in rest[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// `new` anywhere while the source has no `delete` at all.
fn new_without_delete(masked: &str) -> Vec<Diagnostic> {
    if DELETE.is_match(masked) {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    for (idx, line) in masked.split('\n').enumerate() {
        for m in NEW.find_iter(line) {
            diagnostics.push(Diagnostic::warning(
                idx + 1,
                column_of(line, m.start()),
                "Potential memory leak: 'new' used without corresponding 'delete'",
            ));
        }
    }
    diagnostics
}

/// `->` on a line that also mentions a null pointer literal.
fn arrow_near_null(masked: &str) -> Vec<Diagnostic> {
    masked
        .split('\n')
        .enumerate()
        .filter(|(_, line)| NULL_LITERAL.is_match(line))
        .filter_map(|(idx, line)| {
            line.find("->").map(|pos| {
                Diagnostic::warning(idx + 1, column_of(line, pos), "Potential null pointer dereference")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(code: &str) -> Vec<String> {
        detect_smells(code).into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn test_include_guard_missing() {
        let diags = detect_smells("\n#include <stdio.h>\nint x;");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("include guards"));
        assert_eq!(diags[0].line, 2);
    }

    #[test]
    fn test_include_guard_present() {
        assert!(messages("#include <a.h>\n#pragma once\n").is_empty());
        assert!(messages("#include <a.h>\n#ifndef A_H\n#define A_H\n#endif").is_empty());
    }

    #[test]
    fn test_using_namespace_std_needs_include() {
        assert!(messages("using namespace std;").is_empty());
        let diags = detect_smells("#pragma once\n#include <iostream>\nusing namespace std;");
        assert_eq!(diags.len(), 1);
        assert_eq!((diags[0].line, diags[0].column), (3, 1));
    }

    #[test]
    fn test_main_without_return() {
        let diags = detect_smells("int main() {\n  puts(\"return\");\n}");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("'main'"));
        assert!(messages("int main() { return 0; }").is_empty());
    }

    #[test]
    fn test_return_elsewhere_does_not_hide_main() {
        let code = "int helper() { return 1; }\nint main() {\n  helper();\n}";
        let diags = detect_smells(code);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 2);
    }

    #[test]
    fn test_new_without_delete() {
        let diags = detect_smells("int* p = new int(5);");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].column, 10);
        assert!(messages("int* p = new int(5);\ndelete p;").is_empty());
    }

    #[test]
    fn test_arrow_near_null() {
        let diags = detect_smells("if (node != nullptr) node->next = NULL;");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Potential null pointer dereference");
        assert!(messages("node->next = other;").is_empty());
    }
}
