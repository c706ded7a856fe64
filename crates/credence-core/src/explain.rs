// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Explainer
// ─────────────────────────────────────────────────────────────────────
//! Human-readable rationale. Presentation only: nothing here feeds back
//! into scores, confidence or verdict.

use credence_types::{Flag, Signal, Verdict};

const MAX_FLAGS: usize = 3;

pub fn headline(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::True => "Claim appears credible",
        Verdict::False => "Claim likely false or misleading",
        Verdict::Uncertain => "Insufficient evidence to verify",
        Verdict::Unverified => "Claim could not be verified against known sources",
        Verdict::Breaking => "Breaking news, verification pending",
    }
}

/// Highest-scoring component; the earliest signal wins a tie.
pub fn strongest_factor(components: &[f64; 6]) -> (Signal, f64) {
    Signal::ALL
        .iter()
        .copied()
        .zip(components.iter().copied())
        .fold((Signal::Source, f64::NEG_INFINITY), |best, (signal, value)| {
            if value > best.1 {
                (signal, value)
            } else {
                best
            }
        })
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

/// `headline | Credibility Score: NN% | Confidence: NN% | Strongest factor:
/// Label (NN%) | Signals: a, b, c`
pub fn explain(
    verdict: Verdict,
    final_score: f64,
    confidence: f64,
    components: &[f64; 6],
    flags: &[Flag],
) -> String {
    let mut parts = vec![
        headline(verdict).to_string(),
        format!(
            "Credibility Score: {} | Confidence: {}",
            percent(final_score),
            percent(confidence)
        ),
    ];

    let (signal, value) = strongest_factor(components);
    parts.push(format!(
        "Strongest factor: {} ({})",
        signal.label(),
        percent(value)
    ));

    if !flags.is_empty() {
        let readable: Vec<String> = flags.iter().take(MAX_FLAGS).map(Flag::describe).collect();
        parts.push(format!("Signals: {}", readable.join(", ")));
    }

    parts.join(" | ")
}
