//! Decision Maker — picks the best evaluated candidate.
//!
//! Ranking: score descending, then retrieval distance ascending. Candidates equal on both
//! keep input order, so the earliest one wins.

use std::cmp::Ordering;

use crate::models::ScoredCandidate;

pub const NO_CANDIDATES_DECISION: &str = "No candidates available for decision-making.";

/// Returns the winning candidate, or `None` for an empty slate.
pub fn select_best(scored: &[ScoredCandidate]) -> Option<&ScoredCandidate> {
    // min_by returns the first of several equal minima
    scored.iter().min_by(|a, b| rank(a, b))
}

fn rank(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.distance.total_cmp(&b.distance))
}

/// Human-readable decision naming the winner, its score, and its full résumé text.
pub fn decide(scored: &[ScoredCandidate]) -> String {
    match select_best(scored) {
        Some(best) => format!(
            "Best Candidate: {} with a Match Score of {}/10.\nRésumé Summary: {}",
            best.name, best.score, best.text
        ),
        None => NO_CANDIDATES_DECISION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(name: &str, score: u8, distance: f32) -> ScoredCandidate {
        ScoredCandidate {
            name: name.to_string(),
            score,
            distance,
            text: format!("{name} resume text"),
        }
    }

    #[test]
    fn test_higher_score_wins_regardless_of_distance() {
        let slate = vec![scored("A", 8, 0.3), scored("B", 8, 0.1), scored("C", 9, 0.9)];
        assert_eq!(select_best(&slate).unwrap().name, "C");
    }

    #[test]
    fn test_equal_score_smaller_distance_wins() {
        let slate = vec![scored("A", 5, 0.3), scored("B", 5, 0.1)];
        assert_eq!(select_best(&slate).unwrap().name, "B");
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let slate = vec![scored("A", 6, 0.2), scored("B", 6, 0.2), scored("C", 6, 0.2)];
        assert_eq!(select_best(&slate).unwrap().name, "A");
    }

    #[test]
    fn test_unscored_candidate_ranks_below_scored() {
        let slate = vec![scored("Unparsed", 0, 0.01), scored("Graded", 2, 0.8)];
        assert_eq!(select_best(&slate).unwrap().name, "Graded");
    }

    #[test]
    fn test_empty_slate_message() {
        assert_eq!(decide(&[]), NO_CANDIDATES_DECISION);
    }

    #[test]
    fn test_decision_text_names_winner_and_echoes_resume() {
        let decision = decide(&[scored("Grace", 9, 0.2)]);
        assert_eq!(
            decision,
            "Best Candidate: Grace with a Match Score of 9/10.\nRésumé Summary: Grace resume text"
        );
    }
}
