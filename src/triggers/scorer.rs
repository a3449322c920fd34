//! Token and phrase hit counting

use super::{RuleSet, TriggerRule};
use crate::models::CategoryScore;
use memchr::memmem;
use rustc_hash::FxHashMap;

/// Occurrence count of every distinct token in a sequence.
fn token_counts(tokens: &[String]) -> FxHashMap<&str, usize> {
    let mut counts = FxHashMap::default();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Sum, over the cue words, of how often each appears in `tokens`.
pub fn count_token_hits(tokens: &[String], cues: &[String]) -> usize {
    let counts = token_counts(tokens);
    cues.iter()
        .map(|cue| counts.get(cue.as_str()).copied().unwrap_or(0))
        .sum()
}

/// Sum, over the cue phrases, of the non-overlapping occurrences of
/// `" phrase "` in `" normalized "`.
///
/// The boundary spaces stop partial-word matches. Two back-to-back copies
/// of one phrase share a boundary space, so only the first is counted.
pub fn count_phrase_hits(normalized: &str, phrases: &[String]) -> usize {
    let padded = format!(" {normalized} ");
    phrases
        .iter()
        .map(|phrase| {
            let needle = format!(" {phrase} ");
            memmem::find_iter(padded.as_bytes(), needle.as_bytes()).count()
        })
        .sum()
}

/// Score one category against already prepared text.
pub fn score_category(rule: &TriggerRule, normalized: &str, tokens: &[String]) -> CategoryScore {
    CategoryScore::from_hits(
        rule.category,
        count_token_hits(tokens, &rule.tokens),
        count_phrase_hits(normalized, &rule.phrases),
        tokens.len(),
    )
}

/// Score every category of a rule set, in canonical order.
pub fn score_text(rules: &RuleSet, normalized: &str, tokens: &[String]) -> Vec<CategoryScore> {
    let counts = token_counts(tokens);
    rules
        .iter()
        .map(|rule| {
            let token_hits = rule
                .tokens
                .iter()
                .map(|cue| counts.get(cue.as_str()).copied().unwrap_or(0))
                .sum();
            CategoryScore::from_hits(
                rule.category,
                token_hits,
                count_phrase_hits(normalized, &rule.phrases),
                tokens.len(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{normalize, tokenize};
    use crate::triggers::TriggerCategory;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_verify_your_account() {
        let norm = normalize("verify verify your account now");
        let tokens = tokenize(&norm);
        let rule =
            TriggerRule::new(TriggerCategory::ActionDemand, ["verify"], ["verify your account"])
                .unwrap();

        let s = score_category(&rule, &norm, &tokens);
        assert_eq!(s.token_hits, 2);
        assert_eq!(s.phrase_hits, 1);
        assert_eq!(s.score, 4);
        assert!((s.rate_per_100w - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_token_hits_count_repeats() {
        let tokens = strings(&["now", "act", "now", "now"]);
        assert_eq!(count_token_hits(&tokens, &strings(&["now", "act"])), 4);
        assert_eq!(count_token_hits(&tokens, &strings(&["later"])), 0);
        assert_eq!(count_token_hits(&[], &strings(&["now"])), 0);
    }

    #[test]
    fn test_phrase_needs_word_boundaries() {
        let phrases = strings(&["security risk"]);
        assert_eq!(count_phrase_hits("a security risks note", &phrases), 0);
        assert_eq!(count_phrase_hits("a security risk note", &phrases), 1);
        assert_eq!(count_phrase_hits("security risk", &phrases), 1);
    }

    #[test]
    fn test_adjacent_repeats_share_a_boundary() {
        let phrases = strings(&["act now"]);
        assert_eq!(count_phrase_hits("act now act now", &phrases), 1);
        assert_eq!(count_phrase_hits("act now and act now", &phrases), 2);
    }

    #[test]
    fn test_categories_are_not_exclusive() {
        let rules = RuleSet::builtin();
        let norm = normalize("Security team notice: update your account");
        let tokens = tokenize(&norm);
        let scores = score_text(&rules, &norm, &tokens);

        assert_eq!(scores.len(), 6);
        assert_eq!(scores[TriggerCategory::FearLoss.index()].token_hits, 1);
        assert_eq!(scores[TriggerCategory::Authority.index()].token_hits, 1);
        assert_eq!(scores[TriggerCategory::Urgency.index()].token_hits, 1);
        assert_eq!(scores[TriggerCategory::ActionDemand.index()].phrase_hits, 1);
        assert_eq!(scores[TriggerCategory::AccountFocus.index()].token_hits, 1);
    }

    #[test]
    fn test_score_text_agrees_with_score_category() {
        let rules = RuleSet::builtin();
        let norm = normalize("URGENT: your account is locked. Click on the following link now!");
        let tokens = tokenize(&norm);
        let all = score_text(&rules, &norm, &tokens);
        for rule in rules.iter() {
            assert_eq!(all[rule.category.index()], score_category(rule, &norm, &tokens));
        }
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let rules = RuleSet::builtin();
        for s in score_text(&rules, "", &[]) {
            assert_eq!(s.score, 0);
            assert_eq!(s.rate_per_100w, 0.0);
        }
    }
}
