// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Numerical Signal
// ─────────────────────────────────────────────────────────────────────
//! Implausible handouts, universal-benefit promises and extreme
//! percentages. 1.0 means no anomaly.

use credence_types::{Flag, SignalScore};

use super::ClaimText;
use crate::patterns::PatternLibrary;

/// Direct transfers above this are implausible.
pub const IMPLAUSIBLE_AMOUNT: u64 = 50_000;
/// Transfers above this (and up to `IMPLAUSIBLE_AMOUNT`) are suspicious.
pub const LARGE_AMOUNT: u64 = 10_000;
pub const EXTREME_PERCENT: u64 = 90;

const IMPLAUSIBLE_PENALTY: f64 = 0.35;
const LARGE_PENALTY: f64 = 0.15;
const UNIVERSAL_PENALTY: f64 = 0.20;
const PERCENT_PENALTY: f64 = 0.10;

pub fn score(claim: &ClaimText<'_>, patterns: &PatternLibrary) -> SignalScore {
    let mut value = 1.0;
    let mut flags = Vec::new();
    let text = claim.lower();

    for amount in patterns.currency_amounts(text) {
        if amount > IMPLAUSIBLE_AMOUNT {
            value -= IMPLAUSIBLE_PENALTY;
            flags.push(Flag::ImplausibleAmount { amount });
        } else if amount > LARGE_AMOUNT {
            value -= LARGE_PENALTY;
            flags.push(Flag::LargeTransferClaim { amount });
        }
    }

    if patterns.has_universal_benefit(text) {
        value -= UNIVERSAL_PENALTY;
        flags.push(Flag::UniversalBenefitClaim);
    }

    for pct in patterns.percentages(text) {
        if pct > EXTREME_PERCENT {
            value -= PERCENT_PENALTY;
            flags.push(Flag::ExtremePercentage { value: pct });
        }
    }

    SignalScore::new(f64::max(0.0, value), flags)
}
