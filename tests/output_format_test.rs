//! Tests for the serialized shape of analysis results and reports.
//!
//! Consumers read these field names directly, so the JSON layout is part of
//! the public contract.

use commitlens::report::{json_report, Summary};
use commitlens::{analyze, Language, SyntaxTree};

#[test]
fn test_result_field_names() {
    let result = analyze("int main() { return 0; }", Language::Cpp, "main.cpp");
    let value = serde_json::to_value(&result).expect("should serialize");

    let obj = value.as_object().expect("should be an object");
    let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["code", "diagnostics", "isValid", "language", "syntaxTree", "title"]);

    assert_eq!(value["language"], "cpp");
    assert_eq!(value["title"], "main.cpp");
    assert_eq!(value["code"], "int main() { return 0; }");
    assert_eq!(value["isValid"], true);
}

#[test]
fn test_diagnostic_shape() {
    let result = analyze("int main() {", Language::Cpp, "open.cpp");
    let value = serde_json::to_value(&result).unwrap();

    let diag = &value["diagnostics"][0];
    assert_eq!(diag["line"], 1);
    assert_eq!(diag["column"], 12);
    assert_eq!(diag["message"], "Unclosed curly brace");
    assert_eq!(diag["severity"], "error");
    assert_eq!(value["isValid"], false);
}

#[test]
fn test_warning_severity_is_lowercase() {
    let result = analyze("int* p = new int;", Language::Cpp, "leak.cpp");
    let value = serde_json::to_value(&result).unwrap();

    let severities: Vec<_> = value["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["severity"].as_str().unwrap().to_string())
        .collect();
    assert!(severities.contains(&"warning".to_string()));
    assert_eq!(value["isValid"], true);
}

#[test]
fn test_placeholder_tree_for_heuristic_languages() {
    for language in [Language::Cpp, Language::C] {
        let result = analyze("int x;", language, "x");
        assert_eq!(result.syntax_tree(), &SyntaxTree::placeholder());

        let value = serde_json::to_value(&result).unwrap();
        assert!(value["syntaxTree"].is_object());
    }
}

#[test]
fn test_parser_tree_for_javascript() {
    let result = analyze("let a = 1;", Language::JavaScript, "a.js");
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["syntaxTree"]["type"], "program");
}

#[test]
fn test_report_summary() {
    let results = vec![
        analyze("int main() { return 0; }", Language::C, "ok.c"),
        analyze("int main() {", Language::C, "open.c"),
        analyze("int* p = new int;", Language::Cpp, "leak.cpp"),
    ];

    let summary = Summary::of(&results);
    assert_eq!(summary.snippets, 3);
    assert_eq!(summary.valid, 2);
    assert!(summary.errors >= 1);
    assert!(summary.warnings >= 1);

    let value = serde_json::to_value(json_report(&results)).unwrap();
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(value["summary"]["snippets"], 3);
    assert_eq!(value["summary"]["valid"], 2);
    assert_eq!(value["results"].as_array().unwrap().len(), 3);
    assert_eq!(value["results"][1]["title"], "open.c");
}
