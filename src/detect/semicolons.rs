//! Statement-termination heuristics.
//!
//! Both variants look at one line at a time in masked code and flag lines
//! that look like a complete statement but do not end in `;`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{Diagnostic, Severity};

use super::mask::mask_literals;

pub const MISSING_SEMICOLON: &str = "Missing semicolon at the end of statement";

lazy_static! {
    /// Script statements that should be terminated.
    static ref SCRIPT_STATEMENTS: Vec<Regex> = vec![
        Regex::new(r"\b(var|let|const)\s+\w+\s*=\s*[^;{}\n]+$").unwrap(),
        Regex::new(r"\breturn\s+[^;{}\n]+$").unwrap(),
        Regex::new(r"\bconsole\.\w+\([^;{}\n]+$").unwrap(),
        Regex::new(r"\w+\([^;{}\n]*\)$").unwrap(),
    ];

    /// Lines opening with a type or storage keyword.
    static ref DECLARATION_START: Regex = Regex::new(
        r"^(int|char|float|double|void|bool|long|short|unsigned|signed|auto|const|static|extern|volatile|register|struct|class|enum|typename|template|namespace|using|typedef)\b"
    ).unwrap();

    static ref CALL_SUFFIX: Regex = Regex::new(r"\w+\s*\(.*\)$").unwrap();
    static ref INC_DEC: Regex = Regex::new(r"\+\+|--").unwrap();
    static ref RETURN_VALUE: Regex = Regex::new(r"\breturn\s+\S").unwrap();
    static ref CONTROL_HEADER: Regex = Regex::new(r"^(\}\s*)?(if|for|while|switch|else|do)\b").unwrap();

    /// Line endings that continue the statement on the next line.
    static ref CONTINUATION: Regex = Regex::new(r"(,|\\|\(|\[|:|&&|\|\||<<|>>|(^|[^+])\+|[^=!<>]=)$").unwrap();
}

/// Flag script lines (declarations, returns, calls) missing a `;`.
///
/// Reported as warnings: automatic semicolon insertion makes these legal.
pub fn detect_script_semicolons(code: &str) -> Vec<Diagnostic> {
    let masked = mask_literals(code);
    let mut diagnostics = Vec::new();

    for (idx, raw) in masked.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty()
            || line.ends_with(';')
            || line.ends_with('{')
            || line.ends_with('}')
            || line.starts_with("//")
        {
            continue;
        }

        if SCRIPT_STATEMENTS.iter().any(|p| p.is_match(line)) {
            diagnostics.push(Diagnostic::new(
                idx + 1,
                raw.trim_end().chars().count() + 1,
                MISSING_SEMICOLON,
                Severity::Warning,
            ));
        }
    }

    diagnostics
}

/// Flag C/C++ lines that look like statements but lack a `;`.
///
/// Reported as errors: the C family has no automatic semicolon insertion.
pub fn detect_block_semicolons(code: &str) -> Vec<Diagnostic> {
    let masked = mask_literals(code);
    let lines: Vec<&str> = masked.split('\n').collect();
    let mut diagnostics = Vec::new();

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty()
            || line.starts_with('#')
            || line.ends_with('{')
            || line.ends_with('}')
            || line.ends_with(';')
        {
            continue;
        }
        if CONTINUATION.is_match(line) || CONTROL_HEADER.is_match(line) {
            continue;
        }
        if next_code_line(&lines, idx).is_some_and(|next| next.starts_with('{')) {
            continue;
        }

        let looks_like_statement = DECLARATION_START.is_match(line)
            || line.contains('=')
            || CALL_SUFFIX.is_match(line)
            || INC_DEC.is_match(line)
            || RETURN_VALUE.is_match(line);

        if looks_like_statement {
            diagnostics.push(Diagnostic::error(
                idx + 1,
                raw.trim_end().chars().count() + 1,
                MISSING_SEMICOLON,
            ));
        }
    }

    diagnostics
}

/// The next non-blank line after `idx`, trimmed.
fn next_code_line<'a>(lines: &[&'a str], idx: usize) -> Option<&'a str> {
    lines[idx + 1..]
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_missing_semicolons() {
        let code = "const x = 5\nlet y = x + 1;\nconsole.log(x)\nreturn x\nfoo(1, 2)";
        let diags = detect_script_semicolons(code);
        let lines: Vec<_> = diags.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 3, 4, 5]);
        assert!(diags.iter().all(|d| d.severity == Severity::Warning));
        assert_eq!(diags[0].column, 12);
    }

    #[test]
    fn test_script_skips_blocks_and_comments() {
        let code = "function f() {\n  // call(x)\n  if (x) {\n  }\n}";
        assert!(detect_script_semicolons(code).is_empty());
    }

    #[test]
    fn test_script_string_with_semicolon_is_masked() {
        let diags = detect_script_semicolons("const s = \"a;b\"");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_block_missing_semicolon() {
        let code = "int main() {\n  int x = 5\n  x++\n  printf(\"%d\", x)\n  return x\n}";
        let diags = detect_block_semicolons(code);
        let lines: Vec<_> = diags.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5]);
        assert!(diags.iter().all(|d| d.severity == Severity::Error));
        assert_eq!(diags[0].column, 12);
    }

    #[test]
    fn test_block_skips_directives_comments_and_headers() {
        let code = "#include <stdio.h>\n// int x = 1\n/* y = 2 */\nif (a == b)\n  run();\nfor (i = 0; i < n; i++)\n  step();";
        assert!(detect_block_semicolons(code).is_empty(), "{:?}", detect_block_semicolons(code));
    }

    #[test]
    fn test_block_allman_style_definition() {
        let code = "int main(void)\n{\n  return 0;\n}";
        assert!(detect_block_semicolons(code).is_empty());
    }

    #[test]
    fn test_block_continuations() {
        let code = "int total = add(a,\n                b);\nstd::cout << \"x\"\n          << std::endl;";
        assert!(detect_block_semicolons(code).is_empty());
    }

    #[test]
    fn test_block_single_line_program_is_clean() {
        assert!(detect_block_semicolons("int main() { return 0; }").is_empty());
    }
}
