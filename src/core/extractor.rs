//! Reason extraction from free-text classifier output.
//!
//! The model's output is untrusted text. This module is the defensive parser
//! between the classifier and the verdict store: it never fails, and any
//! input it cannot recognize degrades to `[0]` (not a honeypot). That default
//! favors false negatives over spurious alarms; every fallback is logged so
//! operators can audit parsing gaps.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::core::prompt::FINAL_RESPONSE_MARKER;
use crate::models::types::NOT_HONEYPOT;

lazy_static! {
    /// Maximal ASCII digit runs in the decision line
    static ref DIGIT_RUN: Regex = Regex::new(r"\d+").expect("valid regex");
}

/// Extract ordered reason codes from a raw classifier transcript.
///
/// Algorithm:
/// 1. Find the line starting with the `Final Response:` marker; the decision
///    line is the next non-empty line. No such line => `[0]`.
/// 2. Decision line contains a negative token (否/no, case-insensitive)
///    => `[0]`.
/// 3. Else a positive token (是/yes) => every maximal digit run, in order of
///    appearance. Duplicates are preserved: repeated rule citations are
///    harmless, and downstream consumers treat the sequence as a set.
/// 4. Anything else => `[0]`.
///
/// Known limitation (preserved source behavior): step 3 captures *every*
/// digit run, so a stray numeral in a verbose answer ("taxed at 25") would be
/// reported as a reason code. The prompt asks for a terse answer precisely to
/// avoid this; tightening the parse would change the external contract.
pub fn extract_reasons(raw_text: &str) -> Vec<u32> {
    let Some(decision) = decision_line(raw_text) else {
        warn!("classifier output has no decision line, defaulting to not-honeypot");
        return vec![NOT_HONEYPOT];
    };

    let lowered = decision.to_lowercase();

    if lowered.contains('否') || lowered.contains("no") {
        return vec![NOT_HONEYPOT];
    }

    if lowered.contains('是') || lowered.contains("yes") {
        let codes: Vec<u32> = DIGIT_RUN
            .find_iter(decision)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        if !codes.is_empty() {
            return codes;
        }
    }

    warn!(
        decision = %decision,
        "unrecognized decision line, defaulting to not-honeypot"
    );
    vec![NOT_HONEYPOT]
}

/// Locate the decision line: the first non-empty line after the marker.
fn decision_line(raw_text: &str) -> Option<&str> {
    let mut lines = raw_text.lines();
    while let Some(line) = lines.next() {
        if line.starts_with(FINAL_RESPONSE_MARKER) {
            return lines.map(str::trim).find(|l| !l.is_empty());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_chinese() {
        let raw = "some reasoning here\nFinal Response:\n否\n";
        assert_eq!(extract_reasons(raw), vec![0]);
    }

    #[test]
    fn test_positive_chinese_with_codes() {
        let raw = "analysis...\nFinal Response:\n是1,3\n";
        assert_eq!(extract_reasons(raw), vec![1, 3]);
    }

    #[test]
    fn test_positive_english_verbose() {
        let raw = "analysis...\nFinal Response:\nYes, reasons 2 and 5\n";
        assert_eq!(extract_reasons(raw), vec![2, 5]);
    }

    #[test]
    fn test_no_decision_line() {
        assert_eq!(extract_reasons("the model rambled without a verdict"), vec![0]);
        assert_eq!(extract_reasons(""), vec![0]);
    }

    #[test]
    fn test_marker_with_nothing_after() {
        assert_eq!(extract_reasons("justification\nFinal Response:\n"), vec![0]);
        assert_eq!(extract_reasons("justification\nFinal Response:"), vec![0]);
    }

    #[test]
    fn test_blank_lines_after_marker_are_skipped() {
        let raw = "justification\nFinal Response:\n\n\n是4\n";
        assert_eq!(extract_reasons(raw), vec![4]);
    }

    #[test]
    fn test_negative_english_case_insensitive() {
        let raw = "Final Response:\nNO\n";
        assert_eq!(extract_reasons(raw), vec![0]);
    }

    #[test]
    fn test_negative_wins_even_with_digits() {
        // "no" short-circuits before digit extraction
        let raw = "Final Response:\nno, rules 1 and 2 do not apply\n";
        assert_eq!(extract_reasons(raw), vec![0]);
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let raw = "Final Response:\n是1,3,1\n";
        assert_eq!(extract_reasons(raw), vec![1, 3, 1]);
    }

    #[test]
    fn test_positive_without_digits_defaults() {
        let raw = "Final Response:\n是\n";
        assert_eq!(extract_reasons(raw), vec![0]);
    }

    #[test]
    fn test_unrecognized_decision_defaults() {
        let raw = "Final Response:\nmaybe?\n";
        assert_eq!(extract_reasons(raw), vec![0]);
    }

    #[test]
    fn test_only_first_marker_counts() {
        let raw = "Final Response:\n是2\nFinal Response:\n否\n";
        assert_eq!(extract_reasons(raw), vec![2]);
    }

    #[test]
    fn test_stray_digit_capture_is_known_brittleness() {
        // Documented limitation: every digit run is taken, even ones that are
        // clearly not rule citations.
        let raw = "Final Response:\n是7, the contract taxes sells at 25\n";
        assert_eq!(extract_reasons(raw), vec![7, 25]);
    }
}
