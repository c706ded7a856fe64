// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Composite Scorer, Calibrator and Classifier
// ─────────────────────────────────────────────────────────────────────
//! Turns six component scores into a composite, a calibrated confidence
//! and a verdict.
//!
//! The composite is `Σ w_i * s_i` over the configured weights. Neutral
//! defaults for missing evidence are summed as-is: absence of evidence is
//! itself a (neutral) signal, so there is no renormalisation.

use credence_types::score::clamp_score;
use credence_types::{
    CalibrationParams, Flag, RiskLevel, ScoringWeights, Verdict, VerdictThresholds,
};

/// Weighted composite of the six component scores, in extractor order.
pub fn composite(weights: &ScoringWeights, scores: &[f64; 6]) -> f64 {
    let raw: f64 = weights
        .as_array()
        .iter()
        .zip(scores.iter())
        .map(|(w, s)| w * s)
        .sum();
    clamp_score(raw, 0.0, 1.0)
}

/// Platt-scaled confidence plus a bounded bonus per corroborating source.
///
/// `1 / (1 + exp(a * score + b)) + min(max_boost, boost * sources)`,
/// clamped to [0, 1].
pub fn calibrate_confidence(params: &CalibrationParams, final_score: f64, sources: usize) -> f64 {
    let raw = 1.0 / (1.0 + (params.platt_a * final_score + params.platt_b).exp());
    let boost = (params.source_boost * sources as f64).min(params.max_source_boost);
    clamp_score(raw + boost, 0.0, 1.0)
}

/// Map a composite and its flags to a verdict and risk tier.
///
/// Overrides are checked before the ladder: unverified breaking news is
/// held as BREAKING rather than judged, and a claim with neither a known
/// source nor a database match is UNVERIFIED rather than FALSE.
pub fn classify(
    thresholds: &VerdictThresholds,
    final_score: f64,
    flags: &[Flag],
) -> (Verdict, RiskLevel) {
    let has = |flag: &Flag| flags.contains(flag);

    if has(&Flag::BreakingNewsUnverified) && final_score < thresholds.credible {
        return (Verdict::Breaking, RiskLevel::Medium);
    }
    if has(&Flag::NoDatabaseMatch)
        && has(&Flag::NoVerifiedSource)
        && final_score < thresholds.uncertain
    {
        return (Verdict::Unverified, RiskLevel::Medium);
    }

    if final_score >= thresholds.credible {
        (Verdict::True, RiskLevel::Low)
    } else if final_score >= thresholds.uncertain {
        (Verdict::Uncertain, RiskLevel::Medium)
    } else if final_score >= thresholds.doubtful {
        (Verdict::Uncertain, RiskLevel::High)
    } else {
        (Verdict::False, RiskLevel::Critical)
    }
}
