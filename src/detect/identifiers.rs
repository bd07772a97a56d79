//! "Possibly undefined" identifier heuristic for scripts.
//!
//! Names are collected by pattern matching rather than scope analysis, so
//! destructuring, imports and object keys can produce false positives.

use std::collections::HashSet;

use lazy_static::lazy_static;
use phf::phf_set;
use regex::Regex;

use crate::analysis::Diagnostic;

use super::mask::{mask_literals, words};

/// Keywords, literals and host globals never reported as undefined.
static KNOWN_NAMES: phf::Set<&'static str> = phf_set! {
    "if", "else", "for", "while", "do", "switch", "case", "break", "continue",
    "return", "function", "var", "let", "const", "new", "this", "typeof",
    "instanceof", "void", "delete", "try", "catch", "finally", "throw", "class",
    "extends", "super", "import", "export", "default", "from", "as", "null",
    "undefined", "true", "false", "in", "of", "await", "async", "yield", "static",
    "get", "set", "debugger", "with",
    "console", "document", "window", "global", "globalThis", "process", "require",
    "module", "exports", "arguments",
    "Math", "JSON", "Object", "Array", "String", "Number", "Boolean", "Symbol",
    "BigInt", "Promise", "Date", "RegExp", "Error", "TypeError", "RangeError",
    "SyntaxError", "Map", "Set", "WeakMap", "WeakSet", "Proxy", "Reflect",
    "Intl", "NaN", "Infinity", "parseInt", "parseFloat", "isNaN", "isFinite",
    "setTimeout", "setInterval", "clearTimeout", "clearInterval", "fetch",
    "alert", "localStorage",
};

lazy_static! {
    static ref DECLARATION: Regex = Regex::new(r"\b(?:var|let|const|function|class)\s+([A-Za-z_$][\w$]*)").unwrap();
    static ref FUNCTION_PARAMS: Regex = Regex::new(r"\bfunction\b\s*\*?\s*[\w$]*\s*\(([^)]*)\)").unwrap();
    static ref ARROW_PARAMS: Regex = Regex::new(r"\(([^()]*)\)\s*=>").unwrap();
    static ref ARROW_SINGLE: Regex = Regex::new(r"([A-Za-z_$][\w$]*)\s*=>").unwrap();
    static ref CATCH_BINDING: Regex = Regex::new(r"\bcatch\s*\(\s*([A-Za-z_$][\w$]*)\s*\)").unwrap();
    static ref PARAM_NAME: Regex = Regex::new(r"^\.{0,3}\s*([A-Za-z_$][\w$]*)").unwrap();
}

/// Collect names introduced by declarations and parameter lists.
pub fn declared_names(masked: &str) -> HashSet<String> {
    let mut names = HashSet::new();

    for line in masked.split('\n') {
        for caps in DECLARATION.captures_iter(line) {
            names.insert(caps[1].to_string());
        }
        for caps in CATCH_BINDING.captures_iter(line) {
            names.insert(caps[1].to_string());
        }
        for caps in ARROW_SINGLE.captures_iter(line) {
            names.insert(caps[1].to_string());
        }
        for caps in FUNCTION_PARAMS
            .captures_iter(line)
            .chain(ARROW_PARAMS.captures_iter(line))
        {
            for param in caps[1].split(',') {
                if let Some(name) = PARAM_NAME.captures(param.trim()) {
                    names.insert(name[1].to_string());
                }
            }
        }
    }

    names
}

/// Flag identifier uses that match no declaration and no known name.
///
/// Identifiers directly after `.` or `[` are property accesses and skipped,
/// as are object keys and labels (a word directly followed by `:`).
pub fn detect_undefined_identifiers(code: &str) -> Vec<Diagnostic> {
    let masked = mask_literals(code);
    let declared = declared_names(&masked);
    let mut diagnostics = Vec::new();

    for (idx, line) in masked.split('\n').enumerate() {
        for word in words(line) {
            if declared.contains(word.text) || KNOWN_NAMES.contains(word.text) {
                continue;
            }

            let before = line[..word.byte_offset].chars().next_back();
            if matches!(before, Some('.') | Some('[')) {
                continue;
            }
            let after = &line[word.byte_offset + word.text.len()..];
            if after.starts_with(':') && !after.starts_with("::") {
                continue;
            }

            diagnostics.push(Diagnostic::warning(
                idx + 1,
                word.column,
                format!("'{}' might be undefined", word.text),
            ));
        }
    }

    diagnostics
}
