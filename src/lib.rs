//! Commitlens - syntax diagnostics for code snippets.
//!
//! Commitlens takes a source snippet and its language and reports
//! line/column diagnostics plus a syntax tree, without compiling or running
//! anything. JavaScript and TypeScript are checked with real parsers;
//! C and C++ are checked with heuristic scanners.
//!
//! # Architecture
//!
//! - `analysis`: Diagnostic model, language analyzers and the dispatcher
//! - `parser`: Tree-sitter backends for JavaScript and TypeScript
//! - `detect`: Heuristic passes (brackets, typos, semicolons, dialect rules)
//! - `settings`: YAML settings
//! - `report`: Output formatting (pretty, JSON)
//!
//! # Example
//!
//! ```
//! use commitlens::{analyze, Language};
//!
//! let result = analyze("int main() { return 0; }", Language::C, "main.c");
//! assert!(result.is_valid());
//! ```

pub mod analysis;
pub mod cli;
pub mod detect;
pub mod error;
pub mod language;
pub mod parser;
pub mod report;
pub mod settings;

pub use analysis::{
    analyze, analyze_async, analyze_many, analyze_str, analyze_untitled, analyze_with,
    register_analyzers, AnalysisResult, Diagnostic, LanguageAnalyzer, Severity, Snippet,
    SyntaxNode, SyntaxTree,
};
pub use error::{ParseError, UnsupportedLanguageError};
pub use language::Language;
pub use settings::Settings;

/// Initialize all subsystems.
///
/// Optional: analyzers are created on first use. Call this at startup to
/// pay that cost up front.
pub fn init() {
    register_analyzers();
}
