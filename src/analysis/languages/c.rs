//! C analyzer: the C++ pipeline with the C dialect rules layered on top.

use super::cpp::CppAnalyzer;
use crate::analysis::{AnalysisResult, LanguageAnalyzer};
use crate::detect::{detect_dialect_violations, detect_line_comments};
use crate::language::Language;
use crate::settings::Settings;

/// C language analyzer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CAnalyzer {
    base: CppAnalyzer,
}

impl CAnalyzer {
    pub fn new() -> Self {
        Self {
            base: CppAnalyzer::new(),
        }
    }
}

impl LanguageAnalyzer for CAnalyzer {
    fn language(&self) -> Language {
        Language::C
    }

    fn analyze(&self, code: &str, title: &str, settings: &Settings) -> AnalysisResult {
        let (mut diagnostics, tree) = self.base.analyze(code, title, settings).into_parts();
        let base_count = diagnostics.len();

        diagnostics.extend(detect_dialect_violations(
            code,
            settings.checks.declarations_first,
            settings.checks.prototypes,
        ));
        if settings.checks.line_comments {
            diagnostics.extend(detect_line_comments(code));
        }
        tracing::debug!("{} C dialect diagnostics", diagnostics.len() - base_count);

        AnalysisResult::new(Language::C, code, title, diagnostics, tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Severity, SyntaxTree};

    fn analyze(code: &str) -> AnalysisResult {
        CAnalyzer::new().analyze(code, "test", &Settings::default())
    }

    #[test]
    fn test_minimal_main_is_valid() {
        let result = analyze("int main() { return 0; }");
        assert!(result.is_valid(), "{:?}", result.diagnostics());
        assert_eq!(result.language(), Language::C);
        assert_eq!(result.syntax_tree(), &SyntaxTree::placeholder());
    }

    #[test]
    fn test_class_keyword_invalidates() {
        let result = analyze("class Foo {};");
        assert!(!result.is_valid());
        let diag = &result.diagnostics()[0];
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.message.contains("'class'"));
    }

    #[test]
    fn test_dialect_layer_follows_base_pipeline() {
        let code = "#include <stdio.h>\nbool flag = true;\n";
        let messages: Vec<String> = analyze(code)
            .diagnostics()
            .iter()
            .map(|d| d.message.clone())
            .collect();
        let guard = messages.iter().position(|m| m.contains("include guards")).unwrap();
        let keyword = messages.iter().position(|m| m.contains("'bool'")).unwrap();
        assert!(guard < keyword);
        assert!(messages.iter().any(|m| m.contains("'true'")));
    }

    #[test]
    fn test_line_comment_toggle() {
        let code = "int main(void) { return 0; } // done";
        assert_eq!(analyze(code).warning_count(), 1);

        let mut settings = Settings::default();
        settings.checks.line_comments = false;
        let result = CAnalyzer::new().analyze(code, "t", &settings);
        assert!(result.diagnostics().is_empty());
    }
}
