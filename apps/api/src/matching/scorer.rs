//! Match scorer — percentage overlap between required and candidate skills.
//!
//! score = round(100 × |required ∩ candidate| / |required|)
//! With no required skills the score falls back to min(100, |candidate| × 15).

use serde::{Deserialize, Serialize};

/// Points per candidate skill when there is nothing to match against.
const FALLBACK_POINTS_PER_SKILL: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Entry,
    Moderate,
    Strong,
    TopTier,
}

impl MatchTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => MatchTier::TopTier,
            s if s >= 60 => MatchTier::Strong,
            s if s >= 40 => MatchTier::Moderate,
            _ => MatchTier::Entry,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub score: u32,
    pub tier: MatchTier,
    /// Required skills the candidate has, in required order.
    pub matched: Vec<String>,
    /// Required skills the candidate lacks, in required order.
    pub missing: Vec<String>,
    pub advice: String,
}

/// Scores `candidate` against `required`. Both are expected to be normalized
/// (lower case, deduplicated).
pub fn score_match(required: &[String], candidate: &[String]) -> MatchReport {
    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|skill| candidate.contains(skill));

    let score = if required.is_empty() {
        (candidate.len() * FALLBACK_POINTS_PER_SKILL).min(100) as u32
    } else {
        rounded_percent(matched.len(), required.len())
    };

    let tier = MatchTier::from_score(score);
    let advice = build_advice(score, required.is_empty(), &missing);

    MatchReport {
        score,
        tier,
        matched,
        missing,
        advice,
    }
}

/// round(100 * part / whole), halves rounded up. Integer only, so exact
/// halves such as 23/40 are not lost to float error.
fn rounded_percent(part: usize, whole: usize) -> u32 {
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Sorts scored items by score, highest first. Equal scores keep their
/// incoming order.
pub fn rank_by_score<T>(items: &mut [T], score: impl Fn(&T) -> u32) {
    items.sort_by(|a, b| score(b).cmp(&score(a)));
}

fn build_advice(score: u32, no_requirements: bool, missing: &[String]) -> String {
    if no_requirements {
        return format!(
            "No recognised skills in the job description. Profile strength: {score}/100."
        );
    }

    let top_gaps: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    if missing.is_empty() {
        "Excellent match. You cover every required skill.".to_string()
    } else if score >= 60 {
        format!(
            "Good match ({score}/100). Close the gap with: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low match ({score}/100). Focus on learning: {}.",
            top_gaps.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_react_node_vs_react_docker() {
        let report = score_match(&skills(&["react", "docker"]), &skills(&["react", "node"]));
        assert_eq!(report.matched, skills(&["react"]));
        assert_eq!(report.missing, skills(&["docker"]));
        assert_eq!(report.score, 50);
        assert_eq!(report.tier, MatchTier::Moderate);
    }

    #[test]
    fn test_empty_requirements_use_fallback() {
        let candidate = skills(&["react", "node", "docker", "git", "sql"]);
        let report = score_match(&[], &candidate);
        assert_eq!(report.score, 75);
        assert!(report.matched.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_fallback_caps_at_100() {
        let candidate: Vec<String> = (0..10).map(|i| format!("skill{i}")).collect();
        assert_eq!(score_match(&[], &candidate).score, 100);
        assert_eq!(score_match(&[], &[]).score, 0);
    }

    #[test]
    fn test_score_is_rounded_percentage() {
        let required = skills(&["a", "b", "c"]);
        for (m, expected) in [(0, 0), (1, 33), (2, 67), (3, 100)] {
            let candidate: Vec<String> = required.iter().take(m).cloned().collect();
            let report = score_match(&required, &candidate);
            assert_eq!(report.score, expected, "matched {m} of 3");
            assert_eq!(report.matched.len(), m);
            assert_eq!(report.missing.len(), 3 - m);
        }
    }

    #[test]
    fn test_score_rounds_exact_halves_up() {
        let required: Vec<String> = (0..40).map(|i| format!("skill{i}")).collect();
        let candidate: Vec<String> = required.iter().take(23).cloned().collect();
        assert_eq!(score_match(&required, &candidate).score, 58);
    }

    #[test]
    fn test_score_matches_integer_reference() {
        for n in 1..=60usize {
            let required: Vec<String> = (0..n).map(|i| format!("skill{i}")).collect();
            for m in 0..=n {
                let candidate: Vec<String> = required.iter().take(m).cloned().collect();
                // Half-up rounding of 100m/n: the remainder decides.
                let floor = 100 * m / n;
                let expected = if 2 * (100 * m % n) >= n { floor + 1 } else { floor };
                assert_eq!(
                    score_match(&required, &candidate).score as usize,
                    expected,
                    "matched {m} of {n}"
                );
            }
        }
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(MatchTier::from_score(0), MatchTier::Entry);
        assert_eq!(MatchTier::from_score(39), MatchTier::Entry);
        assert_eq!(MatchTier::from_score(40), MatchTier::Moderate);
        assert_eq!(MatchTier::from_score(60), MatchTier::Strong);
        assert_eq!(MatchTier::from_score(79), MatchTier::Strong);
        assert_eq!(MatchTier::from_score(80), MatchTier::TopTier);
        assert_eq!(MatchTier::from_score(100), MatchTier::TopTier);
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(MatchTier::TopTier).unwrap(),
            serde_json::json!("top_tier")
        );
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let mut items = vec![("first", 50), ("second", 80), ("third", 50), ("fourth", 80)];
        rank_by_score(&mut items, |(_, s)| *s);
        let order: Vec<&str> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(order, vec!["second", "fourth", "first", "third"]);
    }

    #[test]
    fn test_advice_lists_at_most_three_gaps() {
        let required = skills(&["a", "b", "c", "d", "e"]);
        let report = score_match(&required, &[]);
        assert!(report.advice.contains("a, b, c"));
        assert!(!report.advice.contains('d'));
    }

    #[test]
    fn test_advice_for_full_match() {
        let report = score_match(&skills(&["rust"]), &skills(&["rust"]));
        assert_eq!(report.score, 100);
        assert!(report.advice.contains("Excellent"));
    }
}
