// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Score and Result Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CredenceResult;
use crate::flag::Flag;

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Output of a single signal extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalScore {
    /// Score in [0, 1]; higher is more credible.
    pub value: f64,
    /// Flags in the order the extractor raised them.
    pub flags: Vec<Flag>,
}

impl SignalScore {
    pub fn new(value: f64, flags: Vec<Flag>) -> Self {
        Self {
            value: clamp_score(value, 0.0, 1.0),
            flags,
        }
    }

    pub fn has(&self, flag: &Flag) -> bool {
        self.flags.contains(flag)
    }
}

/// Final categorical classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    True,
    False,
    Uncertain,
    Unverified,
    Breaking,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::Uncertain => "UNCERTAIN",
            Verdict::Unverified => "UNVERIFIED",
            Verdict::Breaking => "BREAKING",
        }
    }

    /// Case-insensitive parse of a verdict label. Accepts a few synonyms
    /// used by external fact-check services.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "true" | "credible" | "verified" => Some(Verdict::True),
            "false" | "fake" | "misleading" => Some(Verdict::False),
            "uncertain" => Some(Verdict::Uncertain),
            "unverified" => Some(Verdict::Unverified),
            "breaking" => Some(Verdict::Breaking),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity paired with a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a source domain was recognised.
///
/// Wire form is `1`, `2`, `"gov"` or `"web_mention"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTier {
    Tier1,
    Tier2,
    Government,
    WebMention,
}

impl Serialize for SourceTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SourceTier::Tier1 => serializer.serialize_u8(1),
            SourceTier::Tier2 => serializer.serialize_u8(2),
            SourceTier::Government => serializer.serialize_str("gov"),
            SourceTier::WebMention => serializer.serialize_str("web_mention"),
        }
    }
}

struct SourceTierVisitor;

impl<'de> Visitor<'de> for SourceTierVisitor {
    type Value = SourceTier;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(r#"1, 2, "gov" or "web_mention""#)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SourceTier, E> {
        match v {
            1 => Ok(SourceTier::Tier1),
            2 => Ok(SourceTier::Tier2),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SourceTier, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SourceTier, E> {
        match v {
            "1" => Ok(SourceTier::Tier1),
            "2" => Ok(SourceTier::Tier2),
            "gov" => Ok(SourceTier::Government),
            "web_mention" => Ok(SourceTier::WebMention),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for SourceTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SourceTierVisitor)
    }
}

/// A recognised source behind the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub domain: String,
    pub tier: SourceTier,
}

impl SourceDescriptor {
    pub fn new(domain: impl Into<String>, tier: SourceTier) -> Self {
        Self {
            domain: domain.into(),
            tier,
        }
    }
}

/// Flat, JSON-serializable outcome of one credibility evaluation.
///
/// This is the wire contract for every downstream presenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityResult {
    pub claim: String,
    /// `0x` + first 40 hex chars of SHA-256 over the trimmed claim.
    pub claim_hash: String,

    pub source_score: f64,
    pub linguistic_score: f64,
    pub numerical_score: f64,
    pub rag_match_score: f64,
    pub temporal_score: f64,
    pub community_score: f64,

    /// Weighted composite of the six component scores.
    pub final_score: f64,
    /// Calibrated confidence in the composite.
    pub confidence: f64,

    pub verdict: Verdict,
    pub risk_level: RiskLevel,

    /// Deduplicated flags, first-occurrence order.
    pub flags: Vec<Flag>,
    pub sources_found: Vec<SourceDescriptor>,
    pub explanation: String,

    /// RFC 3339 UTC start time of the evaluation.
    pub timestamp: String,
    pub processing_ms: u64,
}

impl CredibilityResult {
    /// Component scores in extractor order.
    pub fn component_scores(&self) -> [f64; 6] {
        [
            self.source_score,
            self.linguistic_score,
            self.numerical_score,
            self.rag_match_score,
            self.temporal_score,
            self.community_score,
        ]
    }

    pub fn has_flag(&self, flag: &Flag) -> bool {
        self.flags.contains(flag)
    }

    pub fn to_json(&self) -> CredenceResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CredenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_score(f64::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_pos_inf() {
        assert_eq!(clamp_score(f64::INFINITY, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_clamp_neg_inf() {
        assert_eq!(clamp_score(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_normal() {
        assert_eq!(clamp_score(0.75, 0.0, 1.0), 0.75);
    }

    #[test]
    fn test_signal_score_clamps() {
        let s = SignalScore::new(-0.3, vec![]);
        assert_eq!(s.value, 0.0);
        let s = SignalScore::new(1.2, vec![]);
        assert_eq!(s.value, 1.0);
    }

    #[test]
    fn test_verdict_wire_form() {
        assert_eq!(serde_json::to_string(&Verdict::Unverified).unwrap(), r#""UNVERIFIED""#);
        assert_eq!(serde_json::to_string(&RiskLevel::Critical).unwrap(), r#""critical""#);
    }

    #[test]
    fn test_verdict_from_label() {
        assert_eq!(Verdict::from_label(" Uncertain "), Some(Verdict::Uncertain));
        assert_eq!(Verdict::from_label("misleading"), Some(Verdict::False));
        assert_eq!(Verdict::from_label("maybe"), None);
    }

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Critical);
    }

    #[test]
    fn test_source_tier_wire_form() {
        let d = SourceDescriptor::new("thehindu.com", SourceTier::Tier1);
        assert_eq!(
            serde_json::to_string(&d).unwrap(),
            r#"{"domain":"thehindu.com","tier":1}"#
        );
        let web: SourceDescriptor =
            serde_json::from_str(r#"{"domain":"reuters.com","tier":"web_mention"}"#).unwrap();
        assert_eq!(web.tier, SourceTier::WebMention);
        let gov: SourceDescriptor =
            serde_json::from_str(r#"{"domain":"x.gov.in","tier":"gov"}"#).unwrap();
        assert_eq!(gov.tier, SourceTier::Government);
        assert!(serde_json::from_str::<SourceTier>("3").is_err());
    }

    #[test]
    fn test_malformed_result_json_is_serialization_error() {
        let err = CredibilityResult::from_json(r#"{"claim": "x"}"#).unwrap_err();
        assert!(matches!(err, crate::CredenceError::Serialization(_)));
        assert!(!err.is_input_error());
    }
}
