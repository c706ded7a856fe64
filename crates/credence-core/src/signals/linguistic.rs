// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Linguistic Signal
// ─────────────────────────────────────────────────────────────────────
//! Manipulative language: clickbait, urgency, scheme impersonation and
//! shouting. 1.0 is clean text; deductions are additive.

use credence_types::{Flag, SignalScore};

use super::ClaimText;
use crate::patterns::PatternLibrary;

const CLICKBAIT_STEP: f64 = 0.12;
const CLICKBAIT_CAP: f64 = 0.35;
const URGENCY_STEP: f64 = 0.10;
const URGENCY_CAP: f64 = 0.25;
const SCHEME_STEP: f64 = 0.12;
const SCHEME_CAP: f64 = 0.30;
const CAPS_PENALTY: f64 = 0.15;
const CAPS_RATIO_LIMIT: f64 = 0.3;

/// A word counts as shouting if it has more than two characters, at least
/// one uppercase letter and no lowercase letters.
fn is_shouting(word: &str) -> bool {
    word.chars().count() > 2
        && word.chars().any(char::is_uppercase)
        && !word.chars().any(char::is_lowercase)
}

/// Fraction of whitespace-separated words that are shouting.
pub fn caps_ratio(text: &str) -> f64 {
    let mut words = 0usize;
    let mut shouting = 0usize;
    for word in text.split_whitespace() {
        words += 1;
        if is_shouting(word) {
            shouting += 1;
        }
    }
    shouting as f64 / words.max(1) as f64
}

pub fn score(claim: &ClaimText<'_>, patterns: &PatternLibrary) -> SignalScore {
    let mut value = 1.0;
    let mut flags = Vec::new();
    let text = claim.lower();

    let clickbait = patterns.clickbait_hits(text);
    if clickbait > 0 {
        value -= (clickbait as f64 * CLICKBAIT_STEP).min(CLICKBAIT_CAP);
        flags.push(Flag::ClickbaitLanguage { signals: clickbait });
    }

    let urgency = patterns.urgency_hits(text);
    if urgency > 0 {
        value -= (urgency as f64 * URGENCY_STEP).min(URGENCY_CAP);
        flags.push(Flag::UrgencyManipulation);
    }

    let scheme = patterns.scheme_hits(text);
    if scheme > 0 {
        value -= (scheme as f64 * SCHEME_STEP).min(SCHEME_CAP);
        flags.push(Flag::SchemeImpersonationSuspected);
    }

    if caps_ratio(claim.as_str()) > CAPS_RATIO_LIMIT {
        value -= CAPS_PENALTY;
        flags.push(Flag::ExcessiveCaps);
    }

    SignalScore::new(f64::max(0.0, value), flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> SignalScore {
        score(&ClaimText::new(text), &PatternLibrary::standard().unwrap())
    }

    #[test]
    fn test_clean_text() {
        let s = run("The monsoon session of parliament begins on Monday");
        assert_eq!(s.value, 1.0);
        assert!(s.flags.is_empty());
    }

    #[test]
    fn test_clickbait_capped() {
        let s = run("Shocking viral secret exclusive: guaranteed results");
        // 5 hits * 0.12 = 0.60, capped at 0.35
        assert!((s.value - 0.65).abs() < 1e-9);
        assert_eq!(s.flags, vec![Flag::ClickbaitLanguage { signals: 5 }]);
    }

    #[test]
    fn test_urgency_flag() {
        let s = run("Act now and forward to all your groups");
        assert!((s.value - 0.80).abs() < 1e-9);
        assert_eq!(s.flags, vec![Flag::UrgencyManipulation]);
    }

    #[test]
    fn test_scheme_impersonation() {
        let s = run("PM Kisan money credited, Aadhar mandatory to get it");
        assert!((s.value - 0.76).abs() < 1e-9);
        assert_eq!(s.flags, vec![Flag::SchemeImpersonationSuspected]);
    }

    #[test]
    fn test_excessive_caps() {
        let s = run("THIS IS NOT A drill people");
        // THIS, NOT shout (IS and A are too short): 2/6 > 0.3
        assert!((s.value - 0.85).abs() < 1e-9);
        assert_eq!(s.flags, vec![Flag::ExcessiveCaps]);
    }

    #[test]
    fn test_caps_ratio_ignores_symbols() {
        assert_eq!(caps_ratio("₹60,000 !!! 123"), 0.0);
        assert_eq!(caps_ratio(""), 0.0);
        assert!((caps_ratio("ALERT ALERT") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_floor_at_zero() {
        let s = run(
            "BREAKING SHOCKING VIRAL SECRET: ACT NOW, LAST CHANCE, SHARE IMMEDIATELY! \
             PM MODI GOVERNMENT IS GIVING ₹50000, AADHAR REQUIRED FOR CASH",
        );
        assert!(s.value >= 0.0);
        // 1.0 - 0.35 - 0.25 - 0.30 - 0.15 = -0.05 → floored
        assert_eq!(s.value, 0.0);
        assert_eq!(s.flags.len(), 4);
    }
}
