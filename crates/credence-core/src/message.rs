// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Message Triage
// ─────────────────────────────────────────────────────────────────────
//! Keyword triage for whole chat or IVR messages, used before (or without)
//! full evidence-backed scoring.
//!
//! A message is split into sentence-level claims and given a 0–100 risk
//! score that starts neutral at 50. Each category below adds its weight
//! once, however many of its keywords appear:
//!
//! | Category                         | Weight |
//! |----------------------------------|--------|
//! | urgency words                    | +15    |
//! | money words or currency symbols  | +20    |
//! | government words                 | +10    |
//! | viral-forward phrases            | +25    |
//! | over half the characters upper   | +10    |
//! | more than two `!!`/`?!` runs     | +10    |

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use credence_types::{CredenceError, CredenceResult, MessageAnalysis};

const BASE_RISK: u32 = 50;
const MAX_RISK: u32 = 100;

const MAX_CLAIMS: usize = 3;
/// Sentences this short (in characters) are greetings or fragments.
const MIN_CLAIM_CHARS: usize = 10;

const URGENCY_RISK: u32 = 15;
const FINANCIAL_RISK: u32 = 20;
const GOVERNMENT_RISK: u32 = 10;
const VIRAL_RISK: u32 = 25;
const CAPS_RISK: u32 = 10;
const PUNCTUATION_RISK: u32 = 10;

const CAPS_CHAR_RATIO: f64 = 0.5;
const PUNCTUATION_RUNS: usize = 2;

const SENTENCE_END: &str = r"[.!?]+";
const URGENCY: &str = r"\b(immediately|urgent|breaking|alert|warning)";
const FINANCIAL: &str = r"₹|\$|\b(money|cash|prize|lottery|reward)|\bwon\b|\brs(\b|\d)";
const GOVERNMENT: &str = r"\b(government|minister|official|scheme|policy)";
const VIRAL: &str =
    r"forward this|share immediately|before it.s deleted|they don.t want you to know";
const PUNCTUATION_RUN: &str = r"[!?]{2,}";

// Narrower vocabularies for the explanation text.
const MENTIONS_GOVERNMENT: &str = r"\b(government|minister)";
const MENTIONS_MONEY: &str = r"₹|\b(money|prize)|\brs(\b|\d)";
const MENTIONS_SHARING: &str = r"\b(forward|share)";

fn compile(name: &str, pattern: &str) -> CredenceResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| CredenceError::Pattern(format!("message {name} pattern '{pattern}': {e}")))
}

/// Fraction of characters that are uppercase letters.
fn upper_char_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut upper = 0usize;
    for c in text.chars() {
        total += 1;
        if c.is_uppercase() {
            upper += 1;
        }
    }
    upper as f64 / total.max(1) as f64
}

/// Compiled triage vocabulary.
#[derive(Debug, Clone)]
pub struct MessageHeuristics {
    sentence_end: Regex,
    urgency: Regex,
    financial: Regex,
    government: Regex,
    viral: Regex,
    punctuation_run: Regex,
    mentions_government: Regex,
    mentions_money: Regex,
    mentions_sharing: Regex,
}

impl MessageHeuristics {
    pub fn standard() -> CredenceResult<Self> {
        Ok(Self {
            sentence_end: compile("sentence", SENTENCE_END)?,
            urgency: compile("urgency", URGENCY)?,
            financial: compile("financial", FINANCIAL)?,
            government: compile("government", GOVERNMENT)?,
            viral: compile("viral", VIRAL)?,
            punctuation_run: compile("punctuation", PUNCTUATION_RUN)?,
            mentions_government: compile("government mention", MENTIONS_GOVERNMENT)?,
            mentions_money: compile("money mention", MENTIONS_MONEY)?,
            mentions_sharing: compile("sharing mention", MENTIONS_SHARING)?,
        })
    }

    /// Sentence-level claims longer than ten characters, first three only.
    pub fn extract_claims(&self, text: &str) -> Vec<String> {
        self.sentence_end
            .split(text)
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_CLAIM_CHARS)
            .take(MAX_CLAIMS)
            .map(str::to_string)
            .collect()
    }

    /// Keyword risk in [50, 100]. `text` keeps its original casing.
    pub fn risk_score(&self, text: &str) -> u8 {
        let lower = text.to_lowercase();
        let mut risk = BASE_RISK;

        if self.urgency.is_match(&lower) {
            risk += URGENCY_RISK;
        }
        if self.financial.is_match(&lower) {
            risk += FINANCIAL_RISK;
        }
        if self.government.is_match(&lower) {
            risk += GOVERNMENT_RISK;
        }
        if self.viral.is_match(&lower) {
            risk += VIRAL_RISK;
        }
        if upper_char_ratio(text) > CAPS_CHAR_RATIO {
            risk += CAPS_RISK;
        }
        if self.punctuation_run.find_iter(text).count() > PUNCTUATION_RUNS {
            risk += PUNCTUATION_RISK;
        }

        risk.min(MAX_RISK) as u8
    }

    /// Tiered headline plus one sentence per notable finding.
    pub fn explain(&self, text: &str, risk_score: u8) -> String {
        let lower = text.to_lowercase();
        let mut parts = vec![match risk_score {
            80..=u8::MAX => "High-risk content detected.",
            60..=79 => "Moderate risk detected.",
            40..=59 => "Some suspicious elements found.",
            _ => "Content appears relatively neutral.",
        }];

        if self.mentions_government.is_match(&lower) {
            parts.push("Contains government-related claims requiring verification.");
        }
        if self.mentions_money.is_match(&lower) {
            parts.push("Contains financial claims. Verify through official sources.");
        }
        if self.mentions_sharing.is_match(&lower) {
            parts.push("Shows viral sharing patterns common in misinformation.");
        }
        if parts.len() == 1 {
            parts.push(
                "Recommend verification through official sources and fact-checking websites.",
            );
        }

        parts.join(" ")
    }

    pub fn analyze(&self, message: &str) -> CredenceResult<MessageAnalysis> {
        self.analyze_at(message, Utc::now())
    }

    pub fn analyze_at(
        &self,
        message: &str,
        now: DateTime<Utc>,
    ) -> CredenceResult<MessageAnalysis> {
        let text = message.trim();
        if text.is_empty() {
            return Err(CredenceError::Validation(
                "message text cannot be empty".to_string(),
            ));
        }

        let claims = self.extract_claims(text);
        let risk_score = self.risk_score(text);
        let explanation = self.explain(text, risk_score);
        log::debug!("message triaged: risk={risk_score} claims={}", claims.len());

        Ok(MessageAnalysis {
            claims,
            risk_score,
            explanation,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heuristics() -> MessageHeuristics {
        MessageHeuristics::standard().unwrap()
    }

    #[test]
    fn test_claims_split_and_filtered() {
        let h = heuristics();
        let claims = h.extract_claims(
            "Hi! Government giving ₹5000 to all students! Forward immediately!!! \
             Ok. Banks closed on Friday. Offer ends on Monday night.",
        );
        assert_eq!(
            claims,
            vec![
                "Government giving ₹5000 to all students",
                "Forward immediately",
                "Banks closed on Friday",
            ]
        );
    }

    #[test]
    fn test_short_message_has_no_claims() {
        assert!(heuristics().extract_claims("ok. sure!").is_empty());
    }

    #[test]
    fn test_handout_message_risk() {
        let h = heuristics();
        // urgency 15 + money 20 + government 10
        let text = "Government giving ₹5000 to all students! Forward immediately!";
        assert_eq!(h.risk_score(text), 95);
        assert_eq!(
            h.explain(&text.to_lowercase(), 95),
            "High-risk content detected. \
             Contains government-related claims requiring verification. \
             Contains financial claims. Verify through official sources. \
             Shows viral sharing patterns common in misinformation."
        );
    }

    #[test]
    fn test_neutral_message() {
        let h = heuristics();
        let text = "The monsoon session of parliament begins on Monday";
        assert_eq!(h.risk_score(text), 50);
        assert_eq!(
            h.explain(text, 50),
            "Some suspicious elements found. \
             Recommend verification through official sources and fact-checking websites."
        );
    }

    #[test]
    fn test_shouting_and_punctuation() {
        // cash 20, caps 27/42 chars, three `!!!` runs
        let h = heuristics();
        assert_eq!(h.risk_score("FREE CASH FOR ALL!!! CLAIM NOW!!! HURRY!!!"), 90);
        // two runs are not enough
        assert_eq!(h.risk_score("really?! truly?!"), 50);
    }

    #[test]
    fn test_viral_phrase() {
        let h = heuristics();
        assert_eq!(h.risk_score("they don't want you to know about this cure"), 75);
        assert_eq!(h.risk_score("they don’t want you to know"), 75);
    }

    #[test]
    fn test_rupee_abbreviation_needs_word_boundary() {
        let h = heuristics();
        assert_eq!(h.risk_score("yours and others opinions"), 50);
        assert_eq!(h.risk_score("win rs500 today"), 70);
        assert_eq!(h.risk_score("Rs. 500 credited"), 70);
    }

    #[test]
    fn test_risk_capped() {
        let h = heuristics();
        let text = "URGENT GOVERNMENT CASH PRIZE!!! FORWARD THIS!!! NOW!!!";
        assert_eq!(h.risk_score(text), 100);
    }

    #[test]
    fn test_analyze_rejects_blank() {
        let err = heuristics().analyze(" \n ").unwrap_err();
        assert!(matches!(err, CredenceError::Validation(_)));
    }

    #[test]
    fn test_analyze_assembles_record() {
        use chrono::TimeZone;
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let m = heuristics()
            .analyze_at("  Alert: water supply cut in Ward 9 tomorrow.  ", now)
            .unwrap();
        assert_eq!(m.claims, vec!["Alert: water supply cut in Ward 9 tomorrow"]);
        assert_eq!(m.risk_score, 65);
        assert!(m.explanation.starts_with("Moderate risk detected."));
        assert!(m.timestamp.starts_with("2026-03-01T12:00:00"));
    }
}
