//! Error types surfaced by the engine.
//!
//! Only [`UnsupportedLanguageError`] ever reaches a caller of the analysis
//! entry points. [`ParseError`] describes parser infrastructure failures and is
//! always converted into a diagnostic by the analyzer that hit it.

use thiserror::Error;

/// The requested language is not one the engine can analyze.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported language: {language}")]
pub struct UnsupportedLanguageError {
    pub language: String,
}

impl UnsupportedLanguageError {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

/// Failures of a parser backend (not syntax errors in the analyzed code).
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("incompatible grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("invalid query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    #[error("{grammar} parser produced no tree")]
    NoTree { grammar: &'static str },
}
