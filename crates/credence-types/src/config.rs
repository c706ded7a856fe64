// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Engine Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{CredenceError, CredenceResult};

/// Weights of the six component signals in the composite score.
///
/// Must sum to 1.0. Neutral component values are included as-is; there is
/// no renormalisation when evidence is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub source: f64,
    pub linguistic: f64,
    pub numerical: f64,
    pub rag_match: f64,
    pub temporal: f64,
    pub community: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            source: 0.25,
            linguistic: 0.20,
            numerical: 0.15,
            rag_match: 0.20,
            temporal: 0.10,
            community: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Weights in extractor order: source, linguistic, numerical,
    /// rag_match, temporal, community.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.source,
            self.linguistic,
            self.numerical,
            self.rag_match,
            self.temporal,
            self.community,
        ]
    }
}

/// Platt-style confidence calibration constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParams {
    /// Slope term `a` in `1 / (1 + exp(a * score + b))`. Default: -1.8.
    pub platt_a: f64,
    /// Offset term `b`. Default: 0.5.
    pub platt_b: f64,
    /// Confidence added per discovered source. Default: 0.05.
    pub source_boost: f64,
    /// Cap on the total source boost. Default: 0.15.
    pub max_source_boost: f64,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            platt_a: -1.8,
            platt_b: 0.5,
            source_boost: 0.05,
            max_source_boost: 0.15,
        }
    }
}

/// Verdict ladder cut points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictThresholds {
    /// Composite at or above this is TRUE. Also the ceiling under which
    /// breaking news is held as BREAKING. Default: 0.72.
    pub credible: f64,
    /// Lower bound of UNCERTAIN/medium. Also the ceiling under which a
    /// claim with no source and no database match is UNVERIFIED. Default: 0.55.
    pub uncertain: f64,
    /// Lower bound of UNCERTAIN/high; below it is FALSE. Default: 0.40.
    pub doubtful: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            credible: 0.72,
            uncertain: 0.55,
            doubtful: 0.40,
        }
    }
}

/// Community vote handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommunityParams {
    /// Minimum total votes before tallies influence the score. Default: 5.
    pub min_votes: u64,
    /// Weight of the validator fraction relative to users. Default: 3.0.
    pub validator_weight: f64,
}

impl Default for CommunityParams {
    fn default() -> Self {
        Self {
            min_votes: 5,
            validator_weight: 3.0,
        }
    }
}

/// Runtime configuration for the credibility engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub calibration: CalibrationParams,
    pub thresholds: VerdictThresholds,
    pub community: CommunityParams,
}

fn check_unit(name: &str, value: f64) -> CredenceResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CredenceError::Config(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

impl EngineConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> CredenceResult<()> {
        let w = &self.weights;
        for (name, value) in [
            ("weights.source", w.source),
            ("weights.linguistic", w.linguistic),
            ("weights.numerical", w.numerical),
            ("weights.rag_match", w.rag_match),
            ("weights.temporal", w.temporal),
            ("weights.community", w.community),
        ] {
            check_unit(name, value)?;
        }
        if (w.sum() - 1.0).abs() > 1e-9 {
            return Err(CredenceError::Config(format!(
                "weights must sum to 1.0, got {}",
                w.sum()
            )));
        }

        let c = &self.calibration;
        if !c.platt_a.is_finite() || !c.platt_b.is_finite() {
            return Err(CredenceError::Config(format!(
                "calibration constants must be finite, got a={} b={}",
                c.platt_a, c.platt_b
            )));
        }
        check_unit("calibration.source_boost", c.source_boost)?;
        check_unit("calibration.max_source_boost", c.max_source_boost)?;

        let t = &self.thresholds;
        check_unit("thresholds.credible", t.credible)?;
        check_unit("thresholds.uncertain", t.uncertain)?;
        check_unit("thresholds.doubtful", t.doubtful)?;
        if !(t.doubtful <= t.uncertain && t.uncertain <= t.credible) {
            return Err(CredenceError::Config(format!(
                "thresholds must satisfy doubtful <= uncertain <= credible, got {} / {} / {}",
                t.doubtful, t.uncertain, t.credible
            )));
        }

        if self.community.min_votes == 0 {
            return Err(CredenceError::Config(
                "community.min_votes must be >= 1".to_string(),
            ));
        }
        if !(self.community.validator_weight.is_finite() && self.community.validator_weight >= 0.0)
        {
            return Err(CredenceError::Config(format!(
                "community.validator_weight must be finite and >= 0, got {}",
                self.community.validator_weight
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing sections fall back to defaults.
    pub fn from_json(json: &str) -> CredenceResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CredenceError::Config(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoringWeights::default().sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = EngineConfig::default();
        config.weights.source = 0.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let mut config = EngineConfig::default();
        config.thresholds.doubtful = 0.8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_min_votes_rejected() {
        let mut config = EngineConfig::default();
        config.community.min_votes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_calibration_rejected() {
        let mut config = EngineConfig::default();
        config.calibration.platt_a = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            EngineConfig::from_json(r#"{"community": {"min_votes": 10, "validator_weight": 2.0}}"#)
                .unwrap();
        assert_eq!(config.community.min_votes, 10);
        assert_eq!(config.weights, ScoringWeights::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_from_json_invalid() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, CredenceError::Config(_)));
    }
}
