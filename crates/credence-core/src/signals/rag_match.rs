// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Retrieval-Match Signal
// ─────────────────────────────────────────────────────────────────────
//! Agreement between the claim and the knowledge-base context returned
//! by the retrieval collaborator.
//!
//! Word overlap stands in for vector similarity: the collaborator has
//! already done the nearest-neighbour search, this only measures how much
//! of the claim the retrieved text covers.

use std::collections::HashSet;

use credence_types::{Flag, SignalScore, NO_MATCH_SENTINEL};

use super::ClaimText;

pub const NO_MATCH: f64 = 0.4;
const BASE: f64 = 0.4;
const OVERLAP_GAIN: f64 = 0.8;
const CEILING: f64 = 0.95;
const FRAUD_PENALTY: f64 = 0.40;
const STRONG_MATCH_OVERLAP: f64 = 0.4;

pub const FRAUD_KEYWORDS: &[&str] = &["fraud", "fake", "scam", "false", "hoax"];

/// |claim words ∩ context words| / |claim words|, on lower-cased
/// whitespace tokens. 0.0 for an empty claim.
pub fn word_overlap(claim_lower: &str, context_lower: &str) -> f64 {
    let claim_words: HashSet<&str> = claim_lower.split_whitespace().collect();
    let context_words: HashSet<&str> = context_lower.split_whitespace().collect();
    let shared = claim_words.intersection(&context_words).count();
    shared as f64 / claim_words.len().max(1) as f64
}

pub fn score(claim: &ClaimText<'_>, rag_context: Option<&str>) -> SignalScore {
    let context = match rag_context {
        Some(ctx) if !ctx.trim().is_empty() && ctx.trim() != NO_MATCH_SENTINEL => ctx,
        _ => return SignalScore::new(NO_MATCH, vec![Flag::NoDatabaseMatch]),
    };

    let mut flags = Vec::new();
    let context_lower = context.to_lowercase();
    let overlap = word_overlap(claim.lower(), &context_lower);
    let mut value = CEILING.min(BASE + overlap * OVERLAP_GAIN);

    if FRAUD_KEYWORDS.iter().any(|k| context_lower.contains(k)) {
        value = f64::max(0.0, value - FRAUD_PENALTY);
        flags.push(Flag::DatabaseFraudIndicator);
    }

    if overlap > STRONG_MATCH_OVERLAP {
        flags.push(Flag::StrongDatabaseMatch {
            percent: (overlap * 100.0).round() as u32,
        });
    }

    SignalScore::new(value, flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(claim: &str, ctx: Option<&str>) -> SignalScore {
        score(&ClaimText::new(claim), ctx)
    }

    #[test]
    fn test_absent_context() {
        let s = run("anything", None);
        assert_eq!(s.value, NO_MATCH);
        assert_eq!(s.flags, vec![Flag::NoDatabaseMatch]);
    }

    #[test]
    fn test_sentinel_context() {
        let s = run("anything", Some(NO_MATCH_SENTINEL));
        assert_eq!(s.flags, vec![Flag::NoDatabaseMatch]);
        let s = run("anything", Some(""));
        assert_eq!(s.flags, vec![Flag::NoDatabaseMatch]);
    }

    #[test]
    fn test_word_overlap() {
        assert!((word_overlap("a b c d", "b d e") - 0.5).abs() < 1e-12);
        assert_eq!(word_overlap("", "a b"), 0.0);
        assert_eq!(word_overlap("a a a", "a"), 1.0);
    }

    #[test]
    fn test_partial_overlap_no_flag() {
        // 1 of 4 words → 0.4 + 0.25 * 0.8 = 0.6
        let s = run("ujjwala scheme gives cylinders", Some("Ujjwala Yojana provides LPG"));
        assert!((s.value - 0.6).abs() < 1e-9);
        assert!(s.flags.is_empty());
    }

    #[test]
    fn test_strong_match_capped() {
        let s = run(
            "pm kisan pays farmers 6000 yearly",
            Some("PM Kisan pays farmers 6000 yearly in three installments"),
        );
        assert_eq!(s.value, 0.95);
        assert_eq!(s.flags, vec![Flag::StrongDatabaseMatch { percent: 100 }]);
    }

    #[test]
    fn test_fraud_indicator() {
        let s = run(
            "free laptop scheme for students",
            Some("Fake: no free laptop scheme for students exists"),
        );
        // overlap 1.0 → 0.95, minus 0.40
        assert!((s.value - 0.55).abs() < 1e-9);
        assert_eq!(
            s.flags,
            vec![
                Flag::DatabaseFraudIndicator,
                Flag::StrongDatabaseMatch { percent: 100 }
            ]
        );
    }

    #[test]
    fn test_fraud_floor() {
        let s = run("unrelated words here", Some("hoax"));
        assert!((s.value - 0.0).abs() < 1e-9);
        assert_eq!(s.flags, vec![Flag::DatabaseFraudIndicator]);
    }
}
