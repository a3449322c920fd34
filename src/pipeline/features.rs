//! RawRecord -> FeatureRecord

use crate::models::{FeatureRecord, RawRecord};
use crate::text::{normalize, tokenize};
use crate::triggers::{score_text, RuleSet};
use crate::urls::{extract_urls, has_obfuscation};

/// Derive every lexical feature of one record.
///
/// Pure: the same record and rule set always give the same output.
pub fn extract_features(record: &RawRecord, rules: &RuleSet) -> FeatureRecord {
    let combined = record.combined_text();
    let normalized = normalize(&combined);
    let tokens = tokenize(&normalized);
    let urls = extract_urls(&combined);

    FeatureRecord {
        id: record.id.clone(),
        label: record.label.clone(),
        word_count: tokens.len(),
        char_count: record.body.chars().count(),
        subject_len: record.subject.chars().count(),
        url_count: urls.len(),
        has_url: !urls.is_empty(),
        has_obfuscation: has_obfuscation(&combined),
        triggers: score_text(rules, &normalized, &tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triggers::{TriggerCategory, TriggerRule};

    fn record(subject: &str, body: &str) -> RawRecord {
        RawRecord {
            id: "email_1".into(),
            subject: subject.into(),
            body: body.into(),
            source_file: "email_1.txt".into(),
            label: "ai_phish".into(),
        }
    }

    #[test]
    fn test_counters() {
        let r = record(
            "Urgent Account Notice",
            "Header: Urgent Account Notice\nVisit hxxp://evil[.]example now.",
        );
        let f = extract_features(&r, &RuleSet::builtin());

        assert_eq!(f.id, "email_1");
        assert_eq!(f.label, "ai_phish");
        assert_eq!(f.subject_len, 21);
        assert_eq!(f.char_count, r.body.chars().count());
        assert_eq!(f.url_count, 1);
        assert!(f.has_url);
        assert!(f.has_obfuscation);
        // subject (3) + header line (4) + "visit hxxp evil example now" (5)
        assert_eq!(f.word_count, 12);
        assert_eq!(f.triggers.len(), 6);
    }

    #[test]
    fn test_subject_counts_toward_scores() {
        let r = record("Final notice", "Header: Final notice");
        let f = extract_features(&r, &RuleSet::builtin());
        // "final" and "notice" each appear twice: once from the subject, once in the body
        assert_eq!(f.category(TriggerCategory::Urgency).token_hits, 4);
    }

    #[test]
    fn test_substitute_rule_set() {
        let rules = RuleSet::from_rules([TriggerRule::new(
            TriggerCategory::ActionDemand,
            ["verify"],
            ["verify your account"],
        )
        .unwrap()]);
        let f = extract_features(&record("", "verify verify your account now"), &rules);

        let action = f.category(TriggerCategory::ActionDemand);
        assert_eq!(action.token_hits, 2);
        assert_eq!(action.phrase_hits, 1);
        assert_eq!(action.score, 4);
        assert_eq!(f.category(TriggerCategory::Urgency).score, 0);
    }

    #[test]
    fn test_empty_record() {
        let f = extract_features(&record("", ""), &RuleSet::builtin());
        assert_eq!(f.word_count, 0);
        assert_eq!(f.char_count, 0);
        assert!(!f.has_url);
        assert!(!f.has_obfuscation);
        for s in &f.triggers {
            assert_eq!(s.score, 0);
            assert_eq!(s.rate_per_100w, 0.0);
        }
    }

    #[test]
    fn test_score_invariants_hold() {
        let r = record(
            "You have been selected",
            "Claim your reward today! Click on the following link to verify your account \
             details before your account is suspended. Support team.",
        );
        let f = extract_features(&r, &RuleSet::builtin());
        for s in &f.triggers {
            assert_eq!(s.score, s.token_hits + 2 * s.phrase_hits);
            let expected = 100.0 * s.score as f64 / f.word_count.max(1) as f64;
            assert!((s.rate_per_100w - expected).abs() < 1e-9);
            assert!(s.rate_per_100w >= 0.0);
            assert_eq!(s.rate_per_100w == 0.0, s.score == 0);
        }
    }
}
