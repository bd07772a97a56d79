//! Output formatting for analysis results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the analysis results plus a summary, for programmatic consumption

use colored::*;
use serde::Serialize;

use crate::analysis::{AnalysisResult, Diagnostic, Severity};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub version: String,
    pub summary: Summary,
    pub results: &'a [AnalysisResult],
}

/// Counts over a batch of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub snippets: usize,
    pub valid: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn of(results: &[AnalysisResult]) -> Self {
        results.iter().fold(Summary::default(), |acc, r| Summary {
            snippets: acc.snippets + 1,
            valid: acc.valid + usize::from(r.is_valid()),
            errors: acc.errors + r.error_count(),
            warnings: acc.warnings + r.warning_count(),
        })
    }

    pub fn all_valid(&self) -> bool {
        self.valid == self.snippets
    }
}

/// Build the JSON report for a batch.
pub fn json_report(results: &[AnalysisResult]) -> JsonReport<'_> {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        summary: Summary::of(results),
        results,
    }
}

/// Write results in JSON format.
pub fn write_json(results: &[AnalysisResult]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&json_report(results))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in colored human-readable form.
pub fn write_pretty(results: &[AnalysisResult]) {
    // Header
    println!();
    print!("  ");
    print!("{}", "commitlens".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    for result in results {
        write_result(result);
        println!();
    }

    write_summary(&Summary::of(results));
    println!();
}

fn write_result(result: &AnalysisResult) {
    if result.is_valid() {
        print!("  {}", "✓ VALID  ".green());
    } else {
        print!("  {}", "✗ INVALID".red());
    }
    print!("  {}", result.title().blue());
    println!("  {}", format!("({})", result.language()).dimmed());

    for diag in result.diagnostics() {
        write_severity_tag(&diag.severity);
        println!("{}", diagnostic_line(diag));
    }
}

/// `line:col  message`, position padded for alignment.
pub fn diagnostic_line(diag: &Diagnostic) -> String {
    format!("{:<8} {}", format!("{}:{}", diag.line, diag.column), diag.message)
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

fn write_summary(summary: &Summary) {
    let status = if summary.all_valid() {
        "✓ ALL VALID".green().bold()
    } else {
        "✗ INVALID SNIPPETS".red().bold()
    };
    println!("  {}", status);
    println!(
        "  {} snippet(s), {} valid, {} error(s), {} warning(s)",
        summary.snippets, summary.valid, summary.errors, summary.warnings
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, SyntaxTree};
    use crate::language::Language;

    #[test]
    fn test_summary_counts() {
        let results = vec![
            analyze("int main() { return 0; }", Language::C, "ok.c"),
            analyze("class Foo {};", Language::C, "bad.c"),
        ];
        let summary = Summary::of(&results);
        assert_eq!(summary.snippets, 2);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.errors, 1);
        assert!(!summary.all_valid());
    }

    #[test]
    fn test_empty_summary_is_valid() {
        assert!(Summary::of(&[]).all_valid());
    }

    #[test]
    fn test_diagnostic_line() {
        let diag = Diagnostic::error(12, 4, "Unclosed parenthesis");
        assert_eq!(diagnostic_line(&diag), "12:4     Unclosed parenthesis");
    }

    #[test]
    fn test_json_report_shape() {
        let results = vec![AnalysisResult::new(
            Language::Cpp,
            "int x;",
            "x.cpp",
            Vec::new(),
            SyntaxTree::placeholder(),
        )];
        let value = serde_json::to_value(json_report(&results)).unwrap();
        assert_eq!(value["summary"]["snippets"], 1);
        assert_eq!(value["results"][0]["isValid"], true);
        assert_eq!(value["results"][0]["language"], "cpp");
    }
}
