//! Parser backends for the languages that have a real grammar.
//!
//! This module provides:
//! - `TolerantParser`: recovers from errors, reports all of them and a tree
//! - `StrictParser`: stops at the first error
//! - The TypeScript compiler host (`typescript`) and its checker (`checker`)

pub mod checker;
pub mod javascript;
pub mod treesitter;
pub mod typescript;

use crate::analysis::SyntaxNode;
use crate::error::ParseError;

pub use javascript::{StrictJsParser, TolerantJsParser};
pub use typescript::{CompilerOptions, DiagnosticCategory, Program, SourceUnit, TsDiagnostic};

/// A syntax error located in the source (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Output of a tolerant parse: the recovered tree and every error found.
#[derive(Debug, Clone)]
pub struct TolerantParse {
    pub tree: SyntaxNode,
    pub errors: Vec<SyntaxIssue>,
}

/// A parser that keeps going after errors.
pub trait TolerantParser: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Parse the source, collecting every error.
    ///
    /// Returns an error only when the parser itself could not run.
    fn parse(&self, source: &str) -> Result<TolerantParse, ParseError>;
}

/// A parser that reports only the first fatal error.
pub trait StrictParser: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// `Ok(None)` for clean source, `Ok(Some(issue))` for the first error.
    fn first_error(&self, source: &str) -> Result<Option<SyntaxIssue>, ParseError>;
}
