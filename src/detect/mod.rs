//! Heuristic passes shared by the language analyzers.
//!
//! Each pass takes source text and returns diagnostics in source order. None
//! of them parse: they scan characters, lines and masked text.

pub mod brackets;
pub mod dialect;
pub mod identifiers;
pub mod mask;
pub mod practices;
pub mod semicolons;
pub mod typos;

pub use brackets::{scan as scan_brackets, BracketKind, BLOCK_ORDER, SCRIPT_ORDER};
pub use dialect::{detect_dialect_violations, detect_line_comments, CPP_ONLY_KEYWORDS};
pub use identifiers::detect_undefined_identifiers;
pub use mask::mask_literals;
pub use practices::detect_smells;
pub use semicolons::{detect_block_semicolons, detect_script_semicolons, MISSING_SEMICOLON};
pub use typos::{detect_typos, TypoRule, CPP_TYPOS, JAVASCRIPT_TYPOS, TYPESCRIPT_TYPOS};
