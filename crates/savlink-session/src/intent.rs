// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative yes/no intent classification for voice confirmation.
//!
//! An ordered list of `(pattern, intent)` rules replaces inline string
//! matching, so the rules can be unit-tested and localized independently.
//! The first matching rule wins.

use regex::Regex;
use tracing::debug;

/// What a transcribed utterance means for a pending ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Affirmative: confirm the pending ticket.
    Confirm,
    /// Negative: cancel it and restart the exchange.
    Cancel,
}

/// Ordered rule-based classifier.
pub struct IntentClassifier {
    rules: Vec<(Regex, Intent)>,
}

impl IntentClassifier {
    /// The French default rules.
    ///
    /// Negative rules are listed first: "pas correct" must resolve as
    /// `Cancel` even though it contains the affirmative word "correct".
    pub fn new() -> Self {
        let rules = vec![
            (
                Regex::new(r"(?i)\b(non|pas correct|faux|annuler|recommencer)\b")
                    .unwrap(),
                Intent::Cancel,
            ),
            (
                Regex::new(
                    r"(?i)\b(oui|ok|validé|correct|parfait|exactement|c'est bon|tout est bon)\b",
                )
                .unwrap(),
                Intent::Confirm,
            ),
        ];
        Self { rules }
    }

    /// A classifier with custom rules, e.g. for another language.
    pub fn with_rules(rules: Vec<(Regex, Intent)>) -> Self {
        Self { rules }
    }

    /// Returns the intent of the first matching rule, if any.
    pub fn classify(&self, utterance: &str) -> Option<Intent> {
        for (pattern, intent) in &self.rules {
            if pattern.is_match(utterance) {
                debug!(%utterance, ?intent, "intent matched");
                return Some(*intent);
            }
        }
        None
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_words_confirm() {
        let c = IntentClassifier::new();
        for text in [
            "oui",
            "Oui c'est bon",
            "OK",
            "validé",
            "tout est parfait",
            "exactement",
            "oui tout est bon merci",
        ] {
            assert_eq!(c.classify(text), Some(Intent::Confirm), "for {text:?}");
        }
    }

    #[test]
    fn negative_words_cancel() {
        let c = IntentClassifier::new();
        for text in ["non", "c'est faux", "annuler", "on recommence ? recommencer"] {
            assert_eq!(c.classify(text), Some(Intent::Cancel), "for {text:?}");
        }
    }

    #[test]
    fn pas_correct_cancels_despite_containing_correct() {
        let c = IntentClassifier::new();
        assert_eq!(c.classify("pas correct"), Some(Intent::Cancel));
        assert_eq!(c.classify("non ce n'est pas correct"), Some(Intent::Cancel));
    }

    #[test]
    fn unrelated_utterances_match_nothing() {
        let c = IntentClassifier::new();
        assert_eq!(c.classify("mon canapé a un pied cassé"), None);
        assert_eq!(c.classify(""), None);
    }

    #[test]
    fn matching_is_word_bounded() {
        let c = IntentClassifier::new();
        // "ouija" must not match "oui".
        assert_eq!(c.classify("ouija"), None);
    }

    #[test]
    fn custom_rules_replace_the_defaults() {
        let c = IntentClassifier::with_rules(vec![(
            Regex::new(r"(?i)\byes\b").unwrap(),
            Intent::Confirm,
        )]);
        assert_eq!(c.classify("yes please"), Some(Intent::Confirm));
        assert_eq!(c.classify("oui"), None);
    }
}
