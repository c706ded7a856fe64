// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied: PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Rust credibility engine.
//!
//! Exposes `RustCredibilityEngine` and its supporting types to the Python
//! bot and IVR layers via PyO3.
//!
//! # FFI Safety
//!
//! - GIL acquired via `Python::with_gil` before every Python callback.
//! - A failing AI callback is an analyzer failure; the chain falls back.
//! - Empty claims and invalid config raise `ValueError`.
//!
//! Install: `pip install -e crates/credence-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from credence_kernel import RustCredibilityEngine, VoteTally
//!
//! engine = RustCredibilityEngine()
//! result = engine.score("Govt giving ₹60,000 to every citizen!",
//!                       votes=VoteTally(user_true=2, user_false=9))
//! print(result.verdict, result.final_score, result.flags)
//! ```

use std::sync::Arc;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use credence_core::{
    AnalyzerChain, Assessment, CredibilityEngine, ExternalAnalyzer, ExternalVerdict,
    MessageHeuristics,
};
use credence_types::{
    CalibrationParams, CommunityParams, CredenceError, CredibilityResult, EngineConfig,
    EvidenceContext, MessageAnalysis, ScoringWeights, SourceTier, VerdictThresholds, VoteCount,
    VoteTally,
};

fn to_py_err(err: CredenceError) -> PyErr {
    match err {
        CredenceError::Validation(_) | CredenceError::Config(_) => {
            PyValueError::new_err(err.to_string())
        }
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

// ─── PyEngineConfig ─────────────────────────────────────────────────

/// Python-visible engine configuration.
#[pyclass(name = "EngineConfig")]
#[derive(Clone)]
struct PyEngineConfig {
    inner: EngineConfig,
}

#[pymethods]
impl PyEngineConfig {
    #[new]
    #[pyo3(signature = (
        w_source = 0.25,
        w_linguistic = 0.20,
        w_numerical = 0.15,
        w_rag_match = 0.20,
        w_temporal = 0.10,
        w_community = 0.10,
        platt_a = -1.8,
        platt_b = 0.5,
        credible_threshold = 0.72,
        uncertain_threshold = 0.55,
        doubtful_threshold = 0.40,
        min_votes = 5,
        validator_weight = 3.0,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        w_source: f64,
        w_linguistic: f64,
        w_numerical: f64,
        w_rag_match: f64,
        w_temporal: f64,
        w_community: f64,
        platt_a: f64,
        platt_b: f64,
        credible_threshold: f64,
        uncertain_threshold: f64,
        doubtful_threshold: f64,
        min_votes: u64,
        validator_weight: f64,
    ) -> PyResult<Self> {
        let config = EngineConfig {
            weights: ScoringWeights {
                source: w_source,
                linguistic: w_linguistic,
                numerical: w_numerical,
                rag_match: w_rag_match,
                temporal: w_temporal,
                community: w_community,
            },
            calibration: CalibrationParams {
                platt_a,
                platt_b,
                ..CalibrationParams::default()
            },
            thresholds: VerdictThresholds {
                credible: credible_threshold,
                uncertain: uncertain_threshold,
                doubtful: doubtful_threshold,
            },
            community: CommunityParams {
                min_votes,
                validator_weight,
            },
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string. Missing sections take their defaults.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = EngineConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        let w = &self.inner.weights;
        format!(
            "EngineConfig(weights=[{}, {}, {}, {}, {}, {}], credible={})",
            w.source,
            w.linguistic,
            w.numerical,
            w.rag_match,
            w.temporal,
            w.community,
            self.inner.thresholds.credible
        )
    }
}

// ─── PyVoteTally ────────────────────────────────────────────────────

/// Python-visible community vote tally.
#[pyclass(name = "VoteTally")]
#[derive(Clone)]
struct PyVoteTally {
    inner: VoteTally,
}

#[pymethods]
impl PyVoteTally {
    #[new]
    #[pyo3(signature = (user_true = 0, user_false = 0, validator_true = 0, validator_false = 0))]
    fn new(user_true: u64, user_false: u64, validator_true: u64, validator_false: u64) -> Self {
        Self {
            inner: VoteTally::new(
                VoteCount::new(user_true, user_false),
                VoteCount::new(validator_true, validator_false),
            ),
        }
    }

    /// Parse the on-ledger wire form
    /// `{"user_votes": {"true": n, "false": n}, "validator_votes": {...}}`.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let inner: VoteTally =
            serde_json::from_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    #[getter]
    fn user_true(&self) -> u64 {
        self.inner.user.true_votes
    }

    #[getter]
    fn user_false(&self) -> u64 {
        self.inner.user.false_votes
    }

    #[getter]
    fn validator_true(&self) -> u64 {
        self.inner.validator.true_votes
    }

    #[getter]
    fn validator_false(&self) -> u64 {
        self.inner.validator.false_votes
    }

    fn total(&self) -> u64 {
        self.inner.total()
    }

    fn __repr__(&self) -> String {
        format!(
            "VoteTally(user={}/{}, validator={}/{})",
            self.inner.user.true_votes,
            self.inner.user.false_votes,
            self.inner.validator.true_votes,
            self.inner.validator.false_votes
        )
    }
}

// ─── PyCredibilityResult ────────────────────────────────────────────

/// Python-visible scoring result.
#[pyclass(name = "CredibilityResult")]
#[derive(Clone)]
struct PyCredibilityResult {
    inner: CredibilityResult,
}

fn sources_to_dicts<'py>(
    py: Python<'py>,
    result: &CredibilityResult,
) -> PyResult<Vec<Bound<'py, PyDict>>> {
    result
        .sources_found
        .iter()
        .map(|s| {
            let dict = PyDict::new(py);
            dict.set_item("domain", &s.domain)?;
            match s.tier {
                SourceTier::Tier1 => dict.set_item("tier", 1)?,
                SourceTier::Tier2 => dict.set_item("tier", 2)?,
                SourceTier::Government => dict.set_item("tier", "gov")?,
                SourceTier::WebMention => dict.set_item("tier", "web_mention")?,
            }
            Ok(dict)
        })
        .collect()
}

#[pymethods]
impl PyCredibilityResult {
    #[getter]
    fn claim(&self) -> &str {
        &self.inner.claim
    }

    #[getter]
    fn claim_hash(&self) -> &str {
        &self.inner.claim_hash
    }

    #[getter]
    fn source_score(&self) -> f64 {
        self.inner.source_score
    }

    #[getter]
    fn linguistic_score(&self) -> f64 {
        self.inner.linguistic_score
    }

    #[getter]
    fn numerical_score(&self) -> f64 {
        self.inner.numerical_score
    }

    #[getter]
    fn rag_match_score(&self) -> f64 {
        self.inner.rag_match_score
    }

    #[getter]
    fn temporal_score(&self) -> f64 {
        self.inner.temporal_score
    }

    #[getter]
    fn community_score(&self) -> f64 {
        self.inner.community_score
    }

    #[getter]
    fn final_score(&self) -> f64 {
        self.inner.final_score
    }

    #[getter]
    fn confidence(&self) -> f64 {
        self.inner.confidence
    }

    #[getter]
    fn verdict(&self) -> &str {
        self.inner.verdict.as_str()
    }

    #[getter]
    fn risk_level(&self) -> &str {
        self.inner.risk_level.as_str()
    }

    #[getter]
    fn flags(&self) -> Vec<String> {
        self.inner.flags.iter().map(|f| f.to_string()).collect()
    }

    #[getter]
    fn sources_found<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        sources_to_dicts(py, &self.inner)
    }

    #[getter]
    fn explanation(&self) -> &str {
        &self.inner.explanation
    }

    #[getter]
    fn timestamp(&self) -> &str {
        &self.inner.timestamp
    }

    #[getter]
    fn processing_ms(&self) -> u64 {
        self.inner.processing_ms
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let r = &self.inner;
        let dict = PyDict::new(py);
        dict.set_item("claim", &r.claim)?;
        dict.set_item("claim_hash", &r.claim_hash)?;
        dict.set_item("source_score", r.source_score)?;
        dict.set_item("linguistic_score", r.linguistic_score)?;
        dict.set_item("numerical_score", r.numerical_score)?;
        dict.set_item("rag_match_score", r.rag_match_score)?;
        dict.set_item("temporal_score", r.temporal_score)?;
        dict.set_item("community_score", r.community_score)?;
        dict.set_item("final_score", r.final_score)?;
        dict.set_item("confidence", r.confidence)?;
        dict.set_item("verdict", r.verdict.as_str())?;
        dict.set_item("risk_level", r.risk_level.as_str())?;
        dict.set_item("flags", self.flags())?;
        dict.set_item("sources_found", sources_to_dicts(py, r)?)?;
        dict.set_item("explanation", &r.explanation)?;
        dict.set_item("timestamp", &r.timestamp)?;
        dict.set_item("processing_ms", r.processing_ms)?;
        Ok(dict)
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner
            .to_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "CredibilityResult(verdict={}, risk={}, score={:.4}, confidence={:.4}, flags={})",
            self.inner.verdict,
            self.inner.risk_level,
            self.inner.final_score,
            self.inner.confidence,
            self.inner.flags.len()
        )
    }
}

fn assessment_to_dict<'py>(py: Python<'py>, a: Assessment) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("analyzer", &a.analyzer)?;
    dict.set_item("verdict", a.verdict.as_str())?;
    dict.set_item("risk_level", a.risk_level.as_str())?;
    dict.set_item("score", a.score)?;
    dict.set_item("summary", &a.summary)?;
    match a.result {
        Some(inner) => dict.set_item("result", PyCredibilityResult { inner })?,
        None => dict.set_item("result", py.None())?,
    }
    Ok(dict)
}

fn message_to_dict<'py>(py: Python<'py>, m: MessageAnalysis) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("claims", m.claims)?;
    dict.set_item("riskScore", m.risk_score)?;
    dict.set_item("explanation", m.explanation)?;
    dict.set_item("timestamp", m.timestamp)?;
    Ok(dict)
}

/// A reply field, or `None` when the key is missing or holds `None`.
fn reply_field<'py, T: FromPyObject<'py>>(
    reply: &Bound<'py, PyAny>,
    key: &str,
) -> PyResult<Option<T>> {
    match reply.get_item(key) {
        Ok(value) if !value.is_none() => value.extract().map(Some),
        _ => Ok(None),
    }
}

/// Read `{"ai_label", "risk_score", "summary"}` from an AI-service reply.
/// Missing keys take the service defaults; a wrongly typed value is an error.
fn external_verdict(reply: &Bound<'_, PyAny>) -> PyResult<ExternalVerdict> {
    Ok(ExternalVerdict::from_parts(
        reply_field(reply, "ai_label")?,
        reply_field(reply, "risk_score")?,
        reply_field(reply, "summary")?,
    ))
}

// ─── RustCredibilityEngine ──────────────────────────────────────────

/// Multi-signal claim credibility engine exposed to Python.
///
/// One instance may be shared by every request handler; scoring holds no
/// mutable state.
#[pyclass(name = "RustCredibilityEngine")]
struct PyCredibilityEngine {
    inner: Arc<CredibilityEngine>,
    heuristics: Arc<MessageHeuristics>,
}

#[pymethods]
impl PyCredibilityEngine {
    /// Create an engine with the standard domain and pattern tables.
    ///
    /// Args:
    ///     config: Optional EngineConfig (uses defaults if None).
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyEngineConfig>) -> PyResult<Self> {
        let engine = match config {
            Some(c) => {
                let defaults = CredibilityEngine::with_defaults().map_err(to_py_err)?;
                CredibilityEngine::new(
                    c.inner,
                    Arc::new(defaults.registry().clone()),
                    Arc::new(defaults.patterns().clone()),
                )
            }
            None => CredibilityEngine::with_defaults(),
        }
        .map_err(to_py_err)?;
        let heuristics = MessageHeuristics::standard().map_err(to_py_err)?;
        Ok(Self {
            inner: Arc::new(engine),
            heuristics: Arc::new(heuristics),
        })
    }

    /// Score a claim against whatever evidence the caller has.
    ///
    /// Raises:
    ///     ValueError: if the claim is empty or whitespace.
    #[pyo3(signature = (
        claim,
        source_url = None,
        rag_context = None,
        web_context = None,
        votes = None,
    ))]
    fn score(
        &self,
        claim: &str,
        source_url: Option<String>,
        rag_context: Option<String>,
        web_context: Option<String>,
        votes: Option<PyVoteTally>,
    ) -> PyResult<PyCredibilityResult> {
        let evidence = EvidenceContext {
            source_url,
            rag_context,
            web_context,
            votes: votes.map(|v| v.inner),
        };
        let inner = self.inner.score(claim, &evidence).map_err(to_py_err)?;
        Ok(PyCredibilityResult { inner })
    }

    /// Judge a claim through the fallback chain: the optional AI callback,
    /// then the engine, then keyword triage, then a safe UNCERTAIN default.
    ///
    /// Args:
    ///     ai_callback: Optional Callable[[str], dict] returning
    ///                  {"ai_label": str, "risk_score": float, "summary": str}.
    ///                  Missing keys default to "Uncertain", 0.5 and
    ///                  "Analysis completed".
    ///
    /// Returns: dict(analyzer, verdict, risk_level, score, summary, result)
    #[pyo3(signature = (
        claim,
        source_url = None,
        rag_context = None,
        web_context = None,
        votes = None,
        ai_callback = None,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn analyze<'py>(
        &self,
        py: Python<'py>,
        claim: &str,
        source_url: Option<String>,
        rag_context: Option<String>,
        web_context: Option<String>,
        votes: Option<PyVoteTally>,
        ai_callback: Option<PyObject>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let evidence = EvidenceContext {
            source_url,
            rag_context,
            web_context,
            votes: votes.map(|v| v.inner),
        };

        let external = ai_callback.map(|cb| {
            ExternalAnalyzer::new(
                "ai_service",
                move |claim: &str, _evidence: &EvidenceContext| {
                    Python::with_gil(|py| {
                        let reply = cb.call1(py, (claim,)).map_err(|e| e.to_string())?;
                        external_verdict(reply.bind(py)).map_err(|e| e.to_string())
                    })
                },
            )
        });
        let chain = AnalyzerChain::standard(
            external,
            Arc::clone(&self.inner),
            Arc::clone(&self.heuristics),
        );

        let assessment = chain.analyze(claim, &evidence).map_err(to_py_err)?;
        assessment_to_dict(py, assessment)
    }

    /// Keyword triage of a whole chat or IVR message.
    ///
    /// Returns: dict(claims, riskScore, explanation, timestamp)
    ///
    /// Raises:
    ///     ValueError: if the message is empty or whitespace.
    fn analyze_message<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyDict>> {
        let analysis = self.heuristics.analyze(text).map_err(to_py_err)?;
        message_to_dict(py, analysis)
    }

    /// Content fingerprint used as the ledger key for a claim.
    #[staticmethod]
    fn fingerprint(claim: &str) -> String {
        credence_core::claim_fingerprint(claim)
    }

    #[getter]
    fn config(&self) -> PyEngineConfig {
        PyEngineConfig {
            inner: self.inner.config().clone(),
        }
    }
}

/// Python module definition.
#[pymodule]
fn credence_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEngineConfig>()?;
    m.add_class::<PyVoteTally>()?;
    m.add_class::<PyCredibilityResult>()?;
    m.add_class::<PyCredibilityEngine>()?;
    Ok(())
}
