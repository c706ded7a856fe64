// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Message Triage Result
// ─────────────────────────────────────────────────────────────────────
//! Quick triage of a forwarded chat or IVR message: the atomic claims it
//! contains and a keyword risk score.

use serde::{Deserialize, Serialize};

/// Risk scores are whole percentages.
pub const MAX_RISK: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAnalysis {
    /// Up to three sentence-level claims, in message order.
    pub claims: Vec<String>,
    /// 0 (benign) to 100 (almost certainly misleading).
    #[serde(rename = "riskScore")]
    pub risk_score: u8,
    pub explanation: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl MessageAnalysis {
    /// Risk as a fraction in [0, 1].
    pub fn risk_fraction(&self) -> f64 {
        f64::from(self.risk_score.min(MAX_RISK)) / f64::from(MAX_RISK)
    }
}
