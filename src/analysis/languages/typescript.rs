//! TypeScript analyzer backed by the in-memory compiler host.

use crate::analysis::{AnalysisResult, Diagnostic, LanguageAnalyzer, Severity, SyntaxTree};
use crate::detect::{detect_typos, TYPESCRIPT_TYPOS};
use crate::language::Language;
use crate::parser::typescript::SNIPPET_FILE_NAME;
use crate::parser::{CompilerOptions, DiagnosticCategory, Program, SourceUnit, TsDiagnostic};
use crate::settings::Settings;

/// TypeScript language analyzer.
pub struct TypeScriptAnalyzer {
    options: CompilerOptions,
}

impl TypeScriptAnalyzer {
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::strict())
    }

    pub fn with_options(options: CompilerOptions) -> Self {
        Self { options }
    }
}

impl Default for TypeScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn convert(unit: &SourceUnit, diag: &TsDiagnostic) -> Diagnostic {
    let (line, column) = diag
        .start
        .map(|start| {
            let (line, character) = unit.line_and_character_of_position(start);
            (line + 1, character + 1)
        })
        .unwrap_or((1, 1));
    let severity = match diag.category {
        DiagnosticCategory::Error => Severity::Error,
        _ => Severity::Warning,
    };
    Diagnostic::new(line, column, diag.message.clone(), severity)
}

impl LanguageAnalyzer for TypeScriptAnalyzer {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn analyze(&self, code: &str, title: &str, settings: &Settings) -> AnalysisResult {
        tracing::debug!("Analyzing TypeScript snippet {:?} ({} bytes)", title, code.len());
        let mut diagnostics = Vec::new();

        let tree = match SourceUnit::parse(SNIPPET_FILE_NAME, code) {
            Ok(unit) => {
                let program = Program::new(&unit, self.options);
                let mut compiler = program.syntactic_diagnostics();
                match program.semantic_diagnostics() {
                    Ok(semantic) => compiler.extend(semantic),
                    Err(e) => {
                        tracing::warn!("TypeScript checker failed: {}", e);
                        diagnostics.push(Diagnostic::error(1, 1, e.to_string()));
                    }
                }
                tracing::debug!("{} compiler diagnostics", compiler.len());
                diagnostics.splice(0..0, compiler.iter().map(|d| convert(&unit, d)));
                SyntaxTree::Node(unit.to_syntax_node())
            }
            Err(e) => {
                tracing::warn!("TypeScript parser failed: {}", e);
                diagnostics.push(Diagnostic::error(1, 1, e.to_string()));
                SyntaxTree::Empty {}
            }
        };

        if settings.checks.typos {
            diagnostics.extend(detect_typos(code, TYPESCRIPT_TYPOS));
        }

        AnalysisResult::new(Language::TypeScript, code, title, diagnostics, tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(code: &str) -> AnalysisResult {
        TypeScriptAnalyzer::new().analyze(code, "test", &Settings::default())
    }

    #[test]
    fn test_clean_snippet() {
        let result = analyze("function greet(name: string): string {\n  return \"Hello \" + name;\n}\ngreet(\"x\");");
        assert!(result.is_valid(), "{:?}", result.diagnostics());
        assert!(result.diagnostics().is_empty());
    }

    #[test]
    fn test_positions_are_one_indexed() {
        let result = analyze("const a = 1;\nlet n: number = \"x\";");
        let diag = &result.diagnostics()[0];
        assert_eq!(diag.message, "Type 'string' is not assignable to type 'number'.");
        assert_eq!((diag.line, diag.column), (2, 5));
        assert_eq!(diag.severity, Severity::Error);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_suggestions_become_warnings() {
        let result = TypeScriptAnalyzer::with_options(CompilerOptions::default()).analyze(
            "function f(a) { return 1; }",
            "t",
            &Settings::default(),
        );
        assert!(result.is_valid());
        assert!(result
            .diagnostics()
            .iter()
            .all(|d| d.severity == Severity::Warning));
        assert!(!result.diagnostics().is_empty());
    }

    #[test]
    fn test_typos_layered_on_top() {
        let result = analyze("let value: strng = \"a\";");
        assert!(result
            .diagnostics()
            .iter()
            .any(|d| d.message == "Possible typo: 'strng' might be 'string'"));
    }
}
