//! Entry points: route a snippet to its language analyzer.

use once_cell::sync::Lazy;
use rayon::prelude::*;

use super::{analyzer_for, AnalysisResult, Diagnostic, SyntaxTree};
use crate::error::UnsupportedLanguageError;
use crate::language::Language;
use crate::settings::{Settings, DEFAULT_TITLE};

static DEFAULT_SETTINGS: Lazy<Settings> = Lazy::new(Settings::default);

/// A snippet queued for batch analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub code: String,
    pub language: Language,
    pub title: String,
}

impl Snippet {
    pub fn new(code: impl Into<String>, language: Language, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language,
            title: title.into(),
        }
    }
}

/// Analyze a snippet with the default settings.
pub fn analyze(code: &str, language: Language, title: &str) -> AnalysisResult {
    analyze_with(code, language, title, &DEFAULT_SETTINGS)
}

/// Analyze a snippet titled "Untitled Snippet".
pub fn analyze_untitled(code: &str, language: Language) -> AnalysisResult {
    analyze(code, language, DEFAULT_TITLE)
}

/// Analyze a snippet with explicit settings.
///
/// An empty title is replaced by `settings.default_title`.
pub fn analyze_with(code: &str, language: Language, title: &str, settings: &Settings) -> AnalysisResult {
    let title = if title.is_empty() {
        settings.default_title.as_str()
    } else {
        title
    };
    analyzer_for(language).analyze(code, title, settings)
}

/// Analyze a snippet whose language is given by name.
///
/// This is the only entry point that can fail, and only for an unknown
/// language name.
pub fn analyze_str(code: &str, language: &str, title: &str) -> Result<AnalysisResult, UnsupportedLanguageError> {
    let language: Language = language.parse()?;
    Ok(analyze(code, language, title))
}

/// Analyze on tokio's blocking pool, without stalling the caller's runtime.
///
/// If the analysis task dies, the result carries a single error diagnostic.
pub async fn analyze_async(code: String, language: Language, title: String) -> AnalysisResult {
    let (task_code, task_title) = (code.clone(), title.clone());
    let handle = tokio::task::spawn_blocking(move || analyze(&task_code, language, &task_title));

    match handle.await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Analysis task failed: {}", e);
            AnalysisResult::new(
                language,
                &code,
                &title,
                vec![Diagnostic::error(1, 1, format!("Analysis failed: {}", e))],
                SyntaxTree::Empty {},
            )
        }
    }
}

/// Analyze many snippets in parallel. Results keep the input order.
pub fn analyze_many(snippets: &[Snippet], settings: &Settings) -> Vec<AnalysisResult> {
    snippets
        .par_iter()
        .map(|s| analyze_with(&s.code, s.language, &s.title, settings))
        .collect()
}
