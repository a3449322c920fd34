//! Trigger categories, rule tables and scoring
//!
//! A [`RuleSet`] maps each of the six [`TriggerCategory`] buckets to a set of
//! single-word cues and multi-word cue phrases. Rule sets are immutable once
//! built and are passed explicitly to the scorer, so tests and config can
//! substitute their own tables.

mod builtin;
mod scorer;

pub use scorer::{count_phrase_hits, count_token_hits, score_category, score_text};

use crate::text::{is_token_char, normalize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of phishing-language buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    Urgency,
    FearLoss,
    Authority,
    ActionDemand,
    AccountFocus,
    RewardGain,
}

impl TriggerCategory {
    /// Canonical order, used for output columns and record layout.
    pub const ALL: [TriggerCategory; 6] = [
        TriggerCategory::Urgency,
        TriggerCategory::FearLoss,
        TriggerCategory::Authority,
        TriggerCategory::ActionDemand,
        TriggerCategory::AccountFocus,
        TriggerCategory::RewardGain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TriggerCategory::Urgency => "urgency",
            TriggerCategory::FearLoss => "fear_loss",
            TriggerCategory::Authority => "authority",
            TriggerCategory::ActionDemand => "action_demand",
            TriggerCategory::AccountFocus => "account_focus",
            TriggerCategory::RewardGain => "reward_gain",
        }
    }

    /// Position in [`TriggerCategory::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while building a rule set
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("empty cue in {category} rule")]
    EmptyCue { category: TriggerCategory },

    #[error("token '{token}' in {category} rule is not a single word and can never match")]
    TokenNotSingleWord {
        category: TriggerCategory,
        token: String,
    },
}

/// Cue words and phrases for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRule {
    pub category: TriggerCategory,
    pub tokens: Vec<String>,
    pub phrases: Vec<String>,
}

impl TriggerRule {
    /// Build a rule, normalizing every cue so it lines up with normalized text.
    pub fn new<T, P>(category: TriggerCategory, tokens: T, phrases: P) -> Result<Self, RuleError>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|t| {
                let token = normalize(t.as_ref());
                if token.is_empty() {
                    Err(RuleError::EmptyCue { category })
                } else if !token.chars().all(is_token_char) {
                    Err(RuleError::TokenNotSingleWord { category, token })
                } else {
                    Ok(token)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let phrases = phrases
            .into_iter()
            .map(|p| {
                let phrase = normalize(p.as_ref());
                if phrase.is_empty() {
                    Err(RuleError::EmptyCue { category })
                } else {
                    Ok(phrase)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            category,
            tokens,
            phrases,
        })
    }

    /// A rule with no cues; scores zero on every text.
    pub fn empty(category: TriggerCategory) -> Self {
        Self {
            category,
            tokens: Vec::new(),
            phrases: Vec::new(),
        }
    }
}

/// One rule per category, immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    rules: Vec<TriggerRule>,
}

impl RuleSet {
    /// The built-in phishing cue table.
    pub fn builtin() -> Self {
        builtin::rule_set()
    }

    /// Build from an arbitrary list of rules. Categories without a rule get
    /// an empty one; a later rule for the same category replaces an earlier one.
    pub fn from_rules(rules: impl IntoIterator<Item = TriggerRule>) -> Self {
        let mut slots: Vec<TriggerRule> = TriggerCategory::ALL
            .iter()
            .map(|&c| TriggerRule::empty(c))
            .collect();
        for rule in rules {
            let idx = rule.category.index();
            slots[idx] = rule;
        }
        Self { rules: slots }
    }

    /// Copy of this set with some categories swapped out.
    pub fn with_overrides(&self, overrides: impl IntoIterator<Item = TriggerRule>) -> Self {
        Self::from_rules(self.rules.iter().cloned().chain(overrides))
    }

    pub fn rule(&self, category: TriggerCategory) -> &TriggerRule {
        &self.rules[category.index()]
    }

    /// Rules in canonical category order
    pub fn iter(&self) -> impl Iterator<Item = &TriggerRule> {
        self.rules.iter()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for c in TriggerCategory::ALL {
            assert_eq!(TriggerCategory::from_name(c.name()), Some(c));
        }
        assert_eq!(TriggerCategory::from_name("greed"), None);
    }

    #[test]
    fn test_index_matches_canonical_order() {
        for (i, c) in TriggerCategory::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&TriggerCategory::FearLoss).unwrap();
        assert_eq!(json, "\"fear_loss\"");
    }

    #[test]
    fn test_rule_normalizes_cues() {
        let rule = TriggerRule::new(
            TriggerCategory::Urgency,
            ["URGENT"],
            ["  Act   NOW "],
        )
        .unwrap();
        assert_eq!(rule.tokens, vec!["urgent"]);
        assert_eq!(rule.phrases, vec!["act now"]);
    }

    #[test]
    fn test_rule_rejects_bad_tokens() {
        let err = TriggerRule::new(TriggerCategory::Authority, ["help desk"], Vec::<&str>::new())
            .unwrap_err();
        assert!(matches!(err, RuleError::TokenNotSingleWord { .. }));

        let err = TriggerRule::new(TriggerCategory::Authority, ["  "], Vec::<&str>::new())
            .unwrap_err();
        assert_eq!(
            err,
            RuleError::EmptyCue {
                category: TriggerCategory::Authority
            }
        );

        let err = TriggerRule::new(TriggerCategory::Authority, Vec::<&str>::new(), [""])
            .unwrap_err();
        assert!(matches!(err, RuleError::EmptyCue { .. }));
    }

    #[test]
    fn test_from_rules_fills_missing_categories() {
        let rule =
            TriggerRule::new(TriggerCategory::RewardGain, ["prize"], Vec::<&str>::new()).unwrap();
        let set = RuleSet::from_rules([rule]);
        assert_eq!(set.iter().count(), 6);
        assert_eq!(set.rule(TriggerCategory::RewardGain).tokens, vec!["prize"]);
        assert!(set.rule(TriggerCategory::Urgency).tokens.is_empty());
    }

    #[test]
    fn test_overrides_replace_single_category() {
        let base = RuleSet::builtin();
        let custom =
            TriggerRule::new(TriggerCategory::Urgency, ["hurry"], ["act fast"]).unwrap();
        let merged = base.with_overrides([custom]);

        assert_eq!(merged.rule(TriggerCategory::Urgency).tokens, vec!["hurry"]);
        assert_eq!(
            merged.rule(TriggerCategory::Authority),
            base.rule(TriggerCategory::Authority)
        );
    }
}
