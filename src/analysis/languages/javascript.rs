//! JavaScript analyzer: two parsers plus the script heuristics.

use crate::analysis::merge::push_unique;
use crate::analysis::{AnalysisResult, Diagnostic, LanguageAnalyzer, SyntaxTree};
use crate::detect::{
    detect_script_semicolons, detect_typos, detect_undefined_identifiers, scan_brackets,
    JAVASCRIPT_TYPOS, SCRIPT_ORDER,
};
use crate::language::Language;
use crate::parser::{StrictJsParser, StrictParser, TolerantJsParser, TolerantParser};
use crate::settings::Settings;

/// JavaScript language analyzer.
pub struct JavaScriptAnalyzer {
    tolerant: TolerantJsParser,
    strict: StrictJsParser,
}

impl JavaScriptAnalyzer {
    pub fn new() -> Self {
        Self {
            tolerant: TolerantJsParser::new(),
            strict: StrictJsParser::new(),
        }
    }
}

impl Default for JavaScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaScriptAnalyzer {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn analyze(&self, code: &str, title: &str, settings: &Settings) -> AnalysisResult {
        tracing::debug!("Analyzing JavaScript snippet {:?} ({} bytes)", title, code.len());
        let mut diagnostics = Vec::new();

        let tree = match self.tolerant.parse(code) {
            Ok(parsed) => {
                diagnostics.extend(
                    parsed
                        .errors
                        .into_iter()
                        .map(|e| Diagnostic::error(e.line, e.column, e.message)),
                );
                SyntaxTree::Node(parsed.tree)
            }
            Err(e) => {
                tracing::warn!("{} failed: {}", self.tolerant.name(), e);
                diagnostics.push(Diagnostic::error(1, 1, e.to_string()));
                SyntaxTree::Empty {}
            }
        };

        let strict = match self.strict.first_error(code) {
            Ok(issue) => issue.map(|i| Diagnostic::error(i.line, i.column, i.message)),
            Err(e) => {
                tracing::warn!("{} failed: {}", self.strict.name(), e);
                Some(Diagnostic::error(1, 1, e.to_string()))
            }
        };
        if let Some(candidate) = strict {
            push_unique(&mut diagnostics, candidate, settings.dedup_prefix_len);
        }
        tracing::debug!("{} parser diagnostics", diagnostics.len());

        diagnostics.extend(scan_brackets(code, &SCRIPT_ORDER));
        if settings.checks.typos {
            diagnostics.extend(detect_typos(code, JAVASCRIPT_TYPOS));
        }
        if settings.checks.missing_semicolons {
            diagnostics.extend(detect_script_semicolons(code));
        }
        if settings.checks.undefined_identifiers {
            diagnostics.extend(detect_undefined_identifiers(code));
        }

        AnalysisResult::new(Language::JavaScript, code, title, diagnostics, tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Severity;

    fn analyze(code: &str) -> AnalysisResult {
        JavaScriptAnalyzer::new().analyze(code, "test", &Settings::default())
    }

    #[test]
    fn test_clean_snippet() {
        let result = analyze("function add(a, b) {\n  return a + b;\n}\nconsole.log(add(1, 2));");
        assert!(result.is_valid(), "{:?}", result.diagnostics());
        assert!(result.diagnostics().is_empty(), "{:?}", result.diagnostics());
        assert_eq!(result.syntax_tree().root().map(|n| n.kind.as_str()), Some("program"));
    }

    #[test]
    fn test_mismatched_bracket() {
        let result = analyze("function f(x) { return x; )");
        assert!(!result.is_valid());
        let messages: Vec<_> = result.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert!(messages.contains(&"Unmatched closing parenthesis"));
        assert!(messages.contains(&"Unclosed curly brace"));
    }

    #[test]
    fn test_strict_message_merged_only_when_new() {
        let result = analyze("let x = ;");
        let diags = result.diagnostics();
        assert!(diags.iter().any(|d| d.severity == Severity::Error));
        for (i, diag) in diags.iter().enumerate() {
            if !diag.message.ends_with(')') || !diag.message.contains(" (") {
                continue;
            }
            let prefix: String = diag.message.chars().take(20).collect();
            assert!(
                diags[..i].iter().all(|d| !d.message.contains(prefix.as_str())),
                "{:?}",
                diags
            );
        }
    }

    #[test]
    fn test_disabled_checks() {
        let mut settings = Settings::default();
        settings.checks.typos = false;
        settings.checks.undefined_identifiers = false;
        let result = JavaScriptAnalyzer::new().analyze("let y = functon;", "t", &settings);
        assert!(result.diagnostics().is_empty(), "{:?}", result.diagnostics());
    }
}
