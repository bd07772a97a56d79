//! Core traits for language analysis.

use super::AnalysisResult;
use crate::language::Language;
use crate::settings::Settings;

/// Language-specific analyzer trait.
///
/// Each supported language implements this trait; the dispatcher only picks
/// the implementation.
///
/// # Failure
///
/// `analyze` never fails. Anything that goes wrong inside an analyzer,
/// including a parser backend that cannot run, ends up as an `Error`
/// diagnostic in the returned result.
pub trait LanguageAnalyzer: Send + Sync {
    /// The language this analyzer handles.
    fn language(&self) -> Language;

    /// Analyze one snippet.
    fn analyze(&self, code: &str, title: &str, settings: &Settings) -> AnalysisResult;
}
