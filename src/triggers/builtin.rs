//! Built-in cue table
//!
//! All cues here are already lowercase and single-spaced, so they are used
//! as-is without going through [`TriggerRule::new`].

use super::{RuleSet, TriggerCategory, TriggerRule};

struct CueTable {
    category: TriggerCategory,
    tokens: &'static [&'static str],
    phrases: &'static [&'static str],
}

const TABLE: &[CueTable] = &[
    CueTable {
        category: TriggerCategory::Urgency,
        tokens: &[
            "urgent", "immediate", "immediately", "now", "today", "asap", "prompt", "promptly",
            "soon", "deadline", "final", "notice", "action", "critical", "crucial",
        ],
        phrases: &[
            "immediate action",
            "action needed",
            "action requested",
            "prompt attention",
            "as soon as possible",
            "do not delay",
        ],
    },
    CueTable {
        category: TriggerCategory::FearLoss,
        tokens: &[
            "suspended", "locked", "compromised", "unauthorized", "breach", "risk", "risks",
            "penalty", "security", "disruptions", "interruptions", "issues", "threat", "threats",
        ],
        phrases: &[
            "prevent unauthorized access",
            "avoid any potential",
            "prevent any potential",
            "without interruptions",
            "security risk",
            "security risks",
        ],
    },
    CueTable {
        category: TriggerCategory::Authority,
        tokens: &[
            "team", "support", "helpdesk", "administrator", "official", "compliance", "policy",
            "management",
        ],
        phrases: &[
            "support team",
            "account management",
            "account holder",
            "customer support",
        ],
    },
    CueTable {
        category: TriggerCategory::ActionDemand,
        tokens: &[
            "verify", "confirm", "update", "click", "access", "login", "sign", "signin", "reset",
            "validate", "complete", "proceed", "required", "ensure", "maintain",
        ],
        phrases: &[
            "click on the following link",
            "access the following link",
            "update your account",
            "verify your account",
            "complete the required",
        ],
    },
    CueTable {
        category: TriggerCategory::AccountFocus,
        tokens: &[
            "account", "password", "credentials", "identity", "information", "details",
            "services", "functionality", "integrity", "accuracy",
        ],
        phrases: &[
            "account information",
            "account details",
            "account update",
            "account verification",
        ],
    },
    CueTable {
        category: TriggerCategory::RewardGain,
        tokens: &[
            "winner", "prize", "reward", "gift", "bonus", "free", "selected", "claim",
        ],
        phrases: &[
            "you have been selected",
            "claim your reward",
            "limited time offer",
        ],
    },
];

pub(super) fn rule_set() -> RuleSet {
    RuleSet::from_rules(TABLE.iter().map(|entry| TriggerRule {
        category: entry.category,
        tokens: entry.tokens.iter().map(|t| t.to_string()).collect(),
        phrases: entry.phrases.iter().map(|p| p.to_string()).collect(),
    }))
}
