//! Merging diagnostics from independent parsers.
//!
//! Two parsers rarely agree on wording, but they usually agree on the start
//! of a message. A candidate is dropped when its leading chars already occur
//! in an existing message. This is a prefix test, not a similarity metric.

use super::Diagnostic;

/// Whether `message` repeats one already in `existing`.
pub fn is_near_duplicate(message: &str, existing: &[Diagnostic], prefix_len: usize) -> bool {
    let prefix: String = message.chars().take(prefix_len).collect();
    existing.iter().any(|d| d.message.contains(prefix.as_str()))
}

/// Append `candidate` unless it is a near duplicate. Returns whether it was added.
pub fn push_unique(diagnostics: &mut Vec<Diagnostic>, candidate: Diagnostic, prefix_len: usize) -> bool {
    if is_near_duplicate(&candidate.message, diagnostics, prefix_len) {
        return false;
    }
    diagnostics.push(candidate);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_prefix_is_duplicate() {
        let existing = vec![Diagnostic::error(1, 27, "Unexpected token `)`")];
        assert!(is_near_duplicate("Unexpected token `)` (1:27)", &existing, 20));
    }

    #[test]
    fn test_different_token_is_not_duplicate() {
        let existing = vec![Diagnostic::error(1, 27, "Unexpected token `)`")];
        assert!(!is_near_duplicate("Unexpected token `}` (1:30)", &existing, 20));
    }

    #[test]
    fn test_short_message_and_empty_list() {
        assert!(!is_near_duplicate("Missing `;`", &[], 20));
        let existing = vec![Diagnostic::error(2, 1, "Missing `;` here")];
        assert!(is_near_duplicate("Missing `;`", &existing, 20));
    }

    #[test]
    fn test_push_unique() {
        let mut diags = vec![Diagnostic::error(1, 1, "Unexpected end of input")];
        assert!(!push_unique(
            &mut diags,
            Diagnostic::error(1, 5, "Unexpected end of input (1:5)"),
            20
        ));
        assert!(push_unique(&mut diags, Diagnostic::error(1, 5, "Missing `}` (1:5)"), 20));
        assert_eq!(diags.len(), 2);
    }
}
