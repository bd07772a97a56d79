//! Blanking of string literals and comments before pattern matching.
//!
//! Masked text keeps the exact char count and line structure of the input, so
//! positions found in masked text are positions in the original.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Comments and quoted literals, leftmost match wins.
    static ref LITERAL_OR_COMMENT: Regex = Regex::new(
        r#"//[^\n]*|/\*(?s:.*?)\*/|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\(?s:.))*`"#
    ).unwrap();

    /// Identifier-shaped tokens (JavaScript allows `$`).
    static ref WORD: Regex = Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").unwrap();
}

/// Replace comment bodies and string contents with spaces.
///
/// Comments are blanked entirely; string literals keep their delimiters so
/// that a masked line still "ends in a value". Newlines are never touched.
pub fn mask_literals(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut last = 0;

    for m in LITERAL_OR_COMMENT.find_iter(code) {
        out.push_str(&code[last..m.start()]);
        let span = m.as_str();
        let is_comment = span.starts_with("//") || span.starts_with("/*");
        let count = span.chars().count();

        for (i, ch) in span.chars().enumerate() {
            if ch == '\n' {
                out.push('\n');
            } else if !is_comment && (i == 0 || i == count - 1) {
                out.push(ch);
            } else {
                out.push(' ');
            }
        }
        last = m.end();
    }

    out.push_str(&code[last..]);
    out
}

/// Byte offsets of every `//` comment that is not inside a literal.
pub fn line_comment_starts(code: &str) -> Vec<usize> {
    LITERAL_OR_COMMENT
        .find_iter(code)
        .filter(|m| m.as_str().starts_with("//"))
        .map(|m| m.start())
        .collect()
}

/// A word token found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    /// Byte offset of the token within its line.
    pub byte_offset: usize,
    /// Column of the first char (1-indexed).
    pub column: usize,
}

/// Split a line into whole-word identifier tokens.
///
/// Tokens glued to a preceding digit (`1e5`, `0xff`) are skipped, since they
/// are part of a numeric literal.
pub fn words(line: &str) -> Vec<Word<'_>> {
    WORD.find_iter(line)
        .filter(|m| {
            line[..m.start()]
                .chars()
                .next_back()
                .map(|c| !c.is_ascii_digit())
                .unwrap_or(true)
        })
        .map(|m| Word {
            text: m.as_str(),
            byte_offset: m.start(),
            column: line[..m.start()].chars().count() + 1,
        })
        .collect()
}

/// Column (1-indexed, chars) of a byte offset within a line.
pub fn column_of(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}
