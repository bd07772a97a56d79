//! C++ analyzer: heuristic passes only, no parser.

use crate::analysis::{AnalysisResult, Diagnostic, LanguageAnalyzer, SyntaxTree};
use crate::detect::{
    detect_block_semicolons, detect_smells, detect_typos, scan_brackets, BLOCK_ORDER, CPP_TYPOS,
};
use crate::language::Language;
use crate::settings::Settings;

/// C++ language analyzer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CppAnalyzer;

impl CppAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Every C++ pass, in pipeline order.
    pub fn diagnostics(&self, code: &str, settings: &Settings) -> Vec<Diagnostic> {
        let mut diagnostics = scan_brackets(code, &BLOCK_ORDER);
        if settings.checks.missing_semicolons {
            diagnostics.extend(detect_block_semicolons(code));
        }
        if settings.checks.typos {
            diagnostics.extend(detect_typos(code, CPP_TYPOS));
        }
        if settings.checks.best_practices {
            diagnostics.extend(detect_smells(code));
        }
        diagnostics
    }
}

impl LanguageAnalyzer for CppAnalyzer {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn analyze(&self, code: &str, title: &str, settings: &Settings) -> AnalysisResult {
        tracing::debug!("Analyzing C++ snippet {:?} ({} bytes)", title, code.len());
        let diagnostics = self.diagnostics(code, settings);
        tracing::debug!("{} heuristic diagnostics", diagnostics.len());
        AnalysisResult::new(Language::Cpp, code, title, diagnostics, SyntaxTree::placeholder())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Severity;

    fn analyze(code: &str) -> AnalysisResult {
        CppAnalyzer::new().analyze(code, "test", &Settings::default())
    }

    #[test]
    fn test_clean_program() {
        let code = "#pragma once\n#include <iostream>\n\nint main() {\n    int x = 5;\n    std::cout << x << std::endl;\n    return 0;\n}\n";
        let result = analyze(code);
        assert!(result.is_valid(), "{:?}", result.diagnostics());
        assert!(result.diagnostics().is_empty(), "{:?}", result.diagnostics());
        assert_eq!(result.syntax_tree(), &SyntaxTree::placeholder());
    }

    #[test]
    fn test_missing_semicolon_is_an_error() {
        let result = analyze("int main() {\n    int x = 5\n    return x;\n}");
        assert!(!result.is_valid());
        let diag = &result.diagnostics()[0];
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.line, 2);
    }

    #[test]
    fn test_pipeline_order() {
        let code = "#include <iostream>\nint main() {\n    int* p = new int(1);\n    retrn 0;\n";
        let result = analyze(code);
        let messages: Vec<_> = result.diagnostics().iter().map(|d| d.message.as_str()).collect();
        let unclosed = messages.iter().position(|m| *m == "Unclosed curly brace").unwrap();
        let typo = messages
            .iter()
            .position(|m| m.starts_with("Possible typo: 'retrn'"))
            .unwrap();
        let leak = messages
            .iter()
            .position(|m| m.starts_with("Potential memory leak"))
            .unwrap();
        assert!(unclosed < typo && typo < leak);
    }

    #[test]
    fn test_best_practices_toggle() {
        let mut settings = Settings::default();
        settings.checks.best_practices = false;
        let result = CppAnalyzer::new().analyze("#include <vector>\nint x;", "t", &settings);
        assert!(result.diagnostics().is_empty());
    }
}
