//! Score extraction — reads the `Match Score: X/10` line back out of an evaluation.

const SCORE_MARKER: &str = "Match Score: ";
const SCORE_SUFFIX: &str = "/10";
pub const MAX_SCORE: u8 = 10;

/// Returns the integer from the first `Match Score: <digits>/10` occurrence.
///
/// Case-sensitive. Occurrences that are not followed by digits and `/10` are skipped. The
/// first well-formed one decides: if it is out of 0..=10 the result is `None`, even when a
/// later occurrence would be valid. Never fails; callers rank `None` as 0.
pub fn extract_score(evaluation_text: &str) -> Option<u8> {
    evaluation_text
        .match_indices(SCORE_MARKER)
        .find_map(|(start, _)| score_digits_at(&evaluation_text[start + SCORE_MARKER.len()..]))?
        .parse::<u8>()
        .ok()
        .filter(|score| *score <= MAX_SCORE)
}

fn score_digits_at(rest: &str) -> Option<&str> {
    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_len == 0 || !rest[digits_len..].starts_with(SCORE_SUFFIX) {
        return None;
    }
    Some(&rest[..digits_len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_score_from_prose() {
        let text = "Strong Rust background.\nGaps: no Kubernetes.\nMatch Score: 7/10\n";
        assert_eq!(extract_score(text), Some(7));
    }

    #[test]
    fn test_no_score_mentioned() {
        assert_eq!(extract_score("no score mentioned"), None);
    }

    #[test]
    fn test_error_evaluation_has_no_score() {
        assert_eq!(
            extract_score("Error in generating evaluation: API error (status 503): overloaded"),
            None
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(extract_score("Match Score: 4/10 ... Match Score: 9/10"), Some(4));
    }

    #[test]
    fn test_skips_malformed_occurrence() {
        assert_eq!(
            extract_score("Match Score: N/A at first. Revised Match Score: 6/10"),
            Some(6)
        );
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(extract_score("match score: 8/10"), None);
        assert_eq!(extract_score("MATCH SCORE: 8/10"), None);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(extract_score("Match Score: 10/10"), Some(10));
        assert_eq!(extract_score("Match Score: 0/10"), Some(0));
        assert_eq!(extract_score("Match Score: 11/10"), None);
        assert_eq!(extract_score("Match Score: 999999/10"), None);
    }

    #[test]
    fn test_out_of_range_first_score_is_not_replaced_by_later_one() {
        assert_eq!(
            extract_score("Initial Match Score: 11/10, corrected Match Score: 7/10"),
            None
        );
        assert_eq!(
            extract_score("Match Score: 300/10 then Match Score: 8/10"),
            None
        );
    }

    #[test]
    fn test_other_denominators_rejected() {
        assert_eq!(extract_score("Match Score: 8/5"), None);
        assert_eq!(extract_score("Match Score: 8 / 10"), None);
    }
}
