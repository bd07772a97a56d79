//! Snippet analysis.
//!
//! A snippet goes to exactly one analyzer, chosen by its language:
//!
//! ```text
//! ┌──────────┐     ┌────────────┐     ┌──────────────────────────┐
//! │ snippet  │────▶│ dispatcher │────▶│ JavaScript / TypeScript  │──┐
//! └──────────┘     └────────────┘     │ (parsers + heuristics)   │  │
//!                        │            └──────────────────────────┘  │
//!                        │            ┌──────────────────────────┐  ▼
//!                        └───────────▶│ C++ / C                  │─▶ AnalysisResult
//!                                     │ (heuristics only)        │
//!                                     └──────────────────────────┘
//! ```
//!
//! Analyzers never fail: backend problems become `Error` diagnostics.
//! The C analyzer is the C++ analyzer plus a dialect layer.
//!
//! # Adding a New Language
//!
//! 1. Add a variant to [`Language`](crate::language::Language)
//! 2. Create a module in `src/analysis/languages/` implementing `LanguageAnalyzer`
//! 3. Register it in `languages/mod.rs`

mod dispatch;
mod languages;
pub mod merge;
mod position;
mod traits;
mod types;

pub use dispatch::{analyze, analyze_async, analyze_many, analyze_str, analyze_untitled, analyze_with, Snippet};
pub use languages::{
    analyzer_for, register_analyzers, CAnalyzer, CppAnalyzer, JavaScriptAnalyzer, TypeScriptAnalyzer,
};
pub use merge::is_near_duplicate;
pub use position::LineIndex;
pub use traits::LanguageAnalyzer;
pub use types::{AnalysisResult, Diagnostic, Position, Severity, SyntaxNode, SyntaxTree};
