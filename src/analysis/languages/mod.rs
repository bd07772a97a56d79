//! Language-specific analyzer implementations.

mod c;
mod cpp;
mod javascript;
mod typescript;

pub use c::CAnalyzer;
pub use cpp::CppAnalyzer;
pub use javascript::JavaScriptAnalyzer;
pub use typescript::TypeScriptAnalyzer;

use super::LanguageAnalyzer;
use crate::language::Language;
use once_cell::sync::OnceCell;

/// Static storage for C analyzer.
static C_ANALYZER: OnceCell<CAnalyzer> = OnceCell::new();

/// Static storage for C++ analyzer.
static CPP_ANALYZER: OnceCell<CppAnalyzer> = OnceCell::new();

/// Static storage for JavaScript analyzer.
static JAVASCRIPT_ANALYZER: OnceCell<JavaScriptAnalyzer> = OnceCell::new();

/// Static storage for TypeScript analyzer.
static TYPESCRIPT_ANALYZER: OnceCell<TypeScriptAnalyzer> = OnceCell::new();

/// Create every analyzer up front.
///
/// Optional: [`analyzer_for`] initializes lazily. Calling this more than once
/// is harmless.
pub fn register_analyzers() {
    for language in Language::ALL {
        analyzer_for(language);
    }
}

/// The analyzer for a language.
pub fn analyzer_for(language: Language) -> &'static dyn LanguageAnalyzer {
    match language {
        Language::C => C_ANALYZER.get_or_init(CAnalyzer::new),
        Language::Cpp => CPP_ANALYZER.get_or_init(CppAnalyzer::new),
        Language::JavaScript => JAVASCRIPT_ANALYZER.get_or_init(JavaScriptAnalyzer::new),
        Language::TypeScript => TYPESCRIPT_ANALYZER.get_or_init(TypeScriptAnalyzer::new),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_language() {
        register_analyzers();
        for language in Language::ALL {
            assert_eq!(analyzer_for(language).language(), language);
        }
    }
}
