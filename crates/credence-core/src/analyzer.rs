// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Analyzer Chain
// ─────────────────────────────────────────────────────────────────────
//! Interchangeable claim analyzers and the fallback chain that tries them
//! in order.
//!
//! When an external AI service is configured (delegated through a closure,
//! so the FFI layer can call back into Python) it is asked first, and the
//! local engine answers whenever the service fails. Keyword triage and a
//! safe default sit behind the engine. The chain never hides an input
//! error: a blank claim is rejected before any analyzer runs.

use std::sync::Arc;

use credence_types::{
    CredenceError, CredenceResult, CredibilityResult, EvidenceContext, RiskLevel, Verdict,
};

use crate::engine::CredibilityEngine;
use crate::message::MessageHeuristics;

/// Outcome of one analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Name of the analyzer that produced this assessment.
    pub analyzer: String,
    pub verdict: Verdict,
    pub risk_level: RiskLevel,
    /// Credibility in [0, 1].
    pub score: f64,
    pub summary: String,
    /// Full engine output, when the engine produced the assessment.
    pub result: Option<CredibilityResult>,
}

/// A strategy that can judge a claim.
pub trait ClaimAnalyzer: Send + Sync {
    fn name(&self) -> &str;
    fn analyze(&self, claim: &str, evidence: &EvidenceContext) -> CredenceResult<Assessment>;
}

// ── Engine ──────────────────────────────────────────────────────────

/// Runs the local credibility engine.
pub struct EngineAnalyzer {
    engine: Arc<CredibilityEngine>,
}

impl EngineAnalyzer {
    pub fn new(engine: Arc<CredibilityEngine>) -> Self {
        Self { engine }
    }
}

impl ClaimAnalyzer for EngineAnalyzer {
    fn name(&self) -> &str {
        "engine"
    }

    fn analyze(&self, claim: &str, evidence: &EvidenceContext) -> CredenceResult<Assessment> {
        let result = self.engine.score(claim, evidence)?;
        Ok(Assessment {
            analyzer: self.name().to_string(),
            verdict: result.verdict,
            risk_level: result.risk_level,
            score: result.final_score,
            summary: result.explanation.clone(),
            result: Some(result),
        })
    }
}

// ── External service ────────────────────────────────────────────────

/// Response shape of an external AI fact-checking service.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalVerdict {
    pub label: String,
    /// 0.0 = harmless, 1.0 = certainly misleading.
    pub risk_score: f64,
    pub summary: String,
}

impl Default for ExternalVerdict {
    /// What the service is assumed to have said for any field it omits.
    fn default() -> Self {
        Self {
            label: "Uncertain".to_string(),
            risk_score: 0.5,
            summary: "Analysis completed".to_string(),
        }
    }
}

impl ExternalVerdict {
    /// Fill the fields a reply left out with the defaults.
    pub fn from_parts(
        label: Option<String>,
        risk_score: Option<f64>,
        summary: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            label: label.unwrap_or(defaults.label),
            risk_score: risk_score.unwrap_or(defaults.risk_score),
            summary: summary.unwrap_or(defaults.summary),
        }
    }
}

/// Risk tier for an external risk score.
pub fn risk_from_score(risk_score: f64) -> RiskLevel {
    if risk_score >= 0.75 {
        RiskLevel::Critical
    } else if risk_score >= 0.5 {
        RiskLevel::High
    } else if risk_score >= 0.25 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

type ExternalFn =
    Box<dyn Fn(&str, &EvidenceContext) -> Result<ExternalVerdict, String> + Send + Sync>;

/// Delegates to a caller-supplied service call.
pub struct ExternalAnalyzer {
    name: String,
    call: ExternalFn,
}

impl ExternalAnalyzer {
    pub fn new<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&str, &EvidenceContext) -> Result<ExternalVerdict, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            call: Box::new(call),
        }
    }

    fn failure(&self, reason: impl Into<String>) -> CredenceError {
        CredenceError::Analyzer {
            analyzer: self.name.clone(),
            reason: reason.into(),
        }
    }
}

impl ClaimAnalyzer for ExternalAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&self, claim: &str, evidence: &EvidenceContext) -> CredenceResult<Assessment> {
        let reply = (self.call)(claim, evidence).map_err(|reason| self.failure(reason))?;
        // A garbled risk is a failed reply, not a confident one.
        if !reply.risk_score.is_finite() {
            return Err(self.failure(format!("non-finite risk score {}", reply.risk_score)));
        }
        let risk = reply.risk_score.clamp(0.0, 1.0);
        Ok(Assessment {
            analyzer: self.name.clone(),
            verdict: Verdict::from_label(&reply.label).unwrap_or(Verdict::Uncertain),
            risk_level: risk_from_score(risk),
            score: 1.0 - risk,
            summary: reply.summary,
            result: None,
        })
    }
}

// ── Keyword triage ──────────────────────────────────────────────────

/// Message-level keyword triage. Needs no evidence and no service.
pub struct HeuristicAnalyzer {
    heuristics: Arc<MessageHeuristics>,
}

impl HeuristicAnalyzer {
    pub fn new(heuristics: Arc<MessageHeuristics>) -> Self {
        Self { heuristics }
    }
}

impl ClaimAnalyzer for HeuristicAnalyzer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn analyze(&self, claim: &str, _evidence: &EvidenceContext) -> CredenceResult<Assessment> {
        let triage = self.heuristics.analyze(claim)?;
        let (verdict, risk_level) = match triage.risk_score {
            80..=u8::MAX => (Verdict::False, RiskLevel::Critical),
            60..=79 => (Verdict::Uncertain, RiskLevel::High),
            40..=59 => (Verdict::Uncertain, RiskLevel::Medium),
            _ => (Verdict::Uncertain, RiskLevel::Low),
        };
        Ok(Assessment {
            analyzer: self.name().to_string(),
            verdict,
            risk_level,
            score: 1.0 - triage.risk_fraction(),
            summary: triage.explanation,
            result: None,
        })
    }
}

// ── Safe default ────────────────────────────────────────────────────

/// Last resort: never fails, never claims to know.
pub struct SafeDefaultAnalyzer;

impl ClaimAnalyzer for SafeDefaultAnalyzer {
    fn name(&self) -> &str {
        "safe_default"
    }

    fn analyze(&self, _claim: &str, _evidence: &EvidenceContext) -> CredenceResult<Assessment> {
        Ok(Assessment {
            analyzer: self.name().to_string(),
            verdict: Verdict::Uncertain,
            risk_level: RiskLevel::Medium,
            score: 0.5,
            summary: "Analysis unavailable".to_string(),
            result: None,
        })
    }
}

// ── Chain ───────────────────────────────────────────────────────────

/// Ordered analyzers; the first success wins.
#[derive(Default)]
pub struct AnalyzerChain {
    analyzers: Vec<Box<dyn ClaimAnalyzer>>,
}

impl AnalyzerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// External service (if any), then the engine, then keyword triage,
    /// then the safe default.
    pub fn standard(
        external: Option<ExternalAnalyzer>,
        engine: Arc<CredibilityEngine>,
        heuristics: Arc<MessageHeuristics>,
    ) -> Self {
        let mut chain = Self::new();
        if let Some(external) = external {
            chain = chain.then(external);
        }
        chain
            .then(EngineAnalyzer::new(engine))
            .then(HeuristicAnalyzer::new(heuristics))
            .then(SafeDefaultAnalyzer)
    }

    pub fn then(mut self, analyzer: impl ClaimAnalyzer + 'static) -> Self {
        self.analyzers.push(Box::new(analyzer));
        self
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.analyzers.iter().map(|a| a.name()).collect()
    }

    pub fn analyze(&self, claim: &str, evidence: &EvidenceContext) -> CredenceResult<Assessment> {
        if claim.trim().is_empty() {
            return Err(CredenceError::Validation(
                "claim text cannot be empty".to_string(),
            ));
        }

        let mut last_err = None;
        for analyzer in &self.analyzers {
            match analyzer.analyze(claim, evidence) {
                Ok(assessment) => return Ok(assessment),
                Err(e) if e.is_input_error() => return Err(e),
                Err(e) => {
                    log::warn!("analyzer '{}' failed, falling back: {e}", analyzer.name());
                    last_err = Some(e);
                }
            }
        }
        let err = last_err.unwrap_or_else(|| CredenceError::Analyzer {
            analyzer: "chain".to_string(),
            reason: "no analyzers configured".to_string(),
        });
        log::error!("every analyzer failed: {err}");
        Err(err)
    }
}
