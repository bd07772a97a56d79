//! Near-miss keyword spelling detection.
//!
//! Matching runs on masked code, so typos inside strings and comments are
//! never reported. Results are advisory: a variant may be a legitimate
//! identifier in someone's code.

use crate::analysis::Diagnostic;

use super::mask::{mask_literals, words};

/// A canonical keyword and its known misspellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypoRule {
    pub canonical: &'static str,
    pub variants: &'static [&'static str],
}

const fn rule(canonical: &'static str, variants: &'static [&'static str]) -> TypoRule {
    TypoRule {
        canonical,
        variants,
    }
}

/// JavaScript keywords and common globals.
pub static JAVASCRIPT_TYPOS: &[TypoRule] = &[
    rule("function", &["functon", "funtion", "funciton", "functoin"]),
    rule("return", &["retrn", "retrun", "reutrn", "rteurn"]),
    rule("const", &["cosnt", "cnst", "conts"]),
    rule("let", &["lte", "elt"]),
    rule("var", &["vra", "vaar"]),
    rule("if", &["fi", "ig"]),
    rule("else", &["esle", "eles"]),
    rule("for", &["fro", "ofr"]),
    rule("while", &["whiel", "whlie", "wihle"]),
    rule("switch", &["swtich", "siwtch", "swithc"]),
    rule("case", &["caes", "csae"]),
    rule("break", &["braek", "brak", "breka"]),
    rule("continue", &["contniue", "contiue", "contineu"]),
    rule("console", &["consoel", "consle", "concole"]),
    rule("log", &["lg", "lgo"]),
];

/// TypeScript declaration keywords and primitive type names.
pub static TYPESCRIPT_TYPOS: &[TypoRule] = &[
    rule("interface", &["inteface", "interace", "interfce"]),
    rule("type", &["tpye", "tyep"]),
    rule("extends", &["extedns", "extneds", "extens"]),
    rule("implements", &["implemnets", "implemets", "implments"]),
    rule("class", &["calss", "clss"]),
    rule("constructor", &["consturctor", "construtor", "constuctor"]),
    rule("private", &["privte", "priavte"]),
    rule("public", &["pubilc", "publc"]),
    rule("protected", &["protceted", "proected", "proteted"]),
    rule("readonly", &["readony", "raedonly", "readonyl"]),
    rule("string", &["stirng", "strig", "strng"]),
    rule("number", &["numbr", "numbre", "nubmer"]),
    rule("boolean", &["boolaen", "booean", "bolean"]),
    rule("undefined", &["undefind", "udnefined", "undefned"]),
    rule("null", &["nul", "nll"]),
];

/// C and C++ keywords, preprocessor words and standard library names.
pub static CPP_TYPOS: &[TypoRule] = &[
    rule("include", &["incldue", "inlcude", "incude"]),
    rule("iostream", &["iosteam", "iostram", "iotsream"]),
    rule("namespace", &["namepsace", "namesapce", "namespacce"]),
    rule("using", &["usign", "ussing", "usng"]),
    rule("std", &["sdt", "stdd"]),
    rule("cout", &["cuot", "cotu"]),
    rule("cin", &["cni", "icn", "ciin"]),
    rule("endl", &["edl", "enld", "endll"]),
    rule("return", &["retrn", "retrun", "reutrn", "rteurn"]),
    rule("class", &["calss", "clss", "clas"]),
    rule("struct", &["strcut", "stuct", "strct"]),
    rule("public", &["pubilc", "publc", "pubic"]),
    rule("private", &["privte", "priavte", "privat"]),
    rule("protected", &["protceted", "proected", "proteted"]),
    rule("virtual", &["virtal", "vitrual", "virtaul"]),
    rule("static", &["statci", "statc", "sttaic"]),
    rule("const", &["cosnt", "cnst", "conts"]),
    rule("void", &["viod", "vodi", "voi"]),
    rule("int", &["itn", "nit", "intt"]),
    rule("char", &["cahr", "chr", "charr"]),
    rule("float", &["flota", "flot", "floatt"]),
    rule("double", &["duoble", "doule", "doubel"]),
    rule("bool", &["boool", "boo", "booll"]),
    rule("true", &["treu", "ture", "tru"]),
    rule("false", &["fasle", "flase", "fals"]),
    rule("if", &["fi", "ig", "iff"]),
    rule("else", &["esle", "eles", "lese"]),
    rule("for", &["fro", "ofr", "forr"]),
    rule("while", &["whiel", "whlie", "wihle"]),
    rule("switch", &["swtich", "siwtch", "swithc"]),
    rule("case", &["caes", "csae", "casse"]),
    rule("break", &["braek", "brak", "breka"]),
    rule("continue", &["contniue", "contiue", "contineu"]),
    rule("template", &["tempalte", "templte", "tempate"]),
    rule("typename", &["tyepname", "typenam", "typenme"]),
];

/// Report every whole-word occurrence of a known misspelling.
///
/// Order is line by line, then rule by rule in table order, then variant
/// order, then left to right.
pub fn detect_typos(code: &str, rules: &[TypoRule]) -> Vec<Diagnostic> {
    let masked = mask_literals(code);
    let mut diagnostics = Vec::new();

    for (line_idx, line) in masked.split('\n').enumerate() {
        let tokens = words(line);
        if tokens.is_empty() {
            continue;
        }

        for rule in rules {
            for variant in rule.variants {
                for token in tokens.iter().filter(|t| t.text == *variant) {
                    diagnostics.push(Diagnostic::warning(
                        line_idx + 1,
                        token.column,
                        format!("Possible typo: '{}' might be '{}'", variant, rule.canonical),
                    ));
                }
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Severity;

    #[test]
    fn test_typo_in_code_is_reported() {
        let diags = detect_typos("functon add(a, b) {\n  return a + b;\n}", JAVASCRIPT_TYPOS);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Possible typo: 'functon' might be 'function'");
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!((diags[0].line, diags[0].column), (1, 1));
    }

    #[test]
    fn test_typo_inside_string_or_comment_is_ignored() {
        let code = "const s = \"functon\";\n// retrn later\n/* whiel */";
        assert!(detect_typos(code, JAVASCRIPT_TYPOS).is_empty());
    }

    #[test]
    fn test_whole_word_only() {
        // "fi" inside "fine" and "lte" inside "filter" are not tokens.
        assert!(detect_typos("const fine = filter(x);", JAVASCRIPT_TYPOS).is_empty());
    }

    #[test]
    fn test_every_occurrence_reported() {
        let diags = detect_typos("itn a; itn b;", CPP_TYPOS);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].column, 1);
        assert_eq!(diags[1].column, 8);
    }

    #[test]
    fn test_clean_keywords() {
        let code = "interface Point { x: number; y: number }\ntype Id = string;";
        assert!(detect_typos(code, TYPESCRIPT_TYPOS).is_empty());
    }

    #[test]
    fn test_rule_order_within_line() {
        let diags = detect_typos("retrn cuot;", CPP_TYPOS);
        // "cout" precedes "return" in the table
        assert_eq!(diags[0].message, "Possible typo: 'cuot' might be 'cout'");
        assert_eq!(diags[1].message, "Possible typo: 'retrn' might be 'return'");
    }

    #[test]
    fn test_tables_never_map_to_themselves() {
        for table in [JAVASCRIPT_TYPOS, TYPESCRIPT_TYPOS, CPP_TYPOS] {
            for rule in table {
                assert!(!rule.variants.contains(&rule.canonical), "{}", rule.canonical);
            }
        }
    }
}
