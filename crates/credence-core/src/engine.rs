// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Credibility Engine
// ─────────────────────────────────────────────────────────────────────
//! Facade that runs the six extractors and assembles a
//! [`CredibilityResult`].
//!
//! # Invariants
//!
//! 1. **Pure per call**: no state survives an invocation. The registry and
//!    pattern tables are immutable and shared through `Arc`, so one engine
//!    can score from many threads at once without locking.
//!
//! 2. **Deterministic**: identical claim and evidence give identical
//!    scores, flags and verdict. Only `timestamp` and `processing_ms` vary,
//!    and the recycled-news cutoff follows the year of `timestamp`.
//!
//! 3. **No masking**: an empty claim is rejected before scoring. Extractors
//!    are total; a panic inside one is a bug and propagates untouched.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use credence_types::{
    CredenceError, CredenceResult, CredibilityResult, EngineConfig, EvidenceContext, Flag,
};

use crate::explain;
use crate::patterns::PatternLibrary;
use crate::registry::DomainRegistry;
use crate::scorer;
use crate::signals::{community, linguistic, numerical, rag_match, source, temporal, ClaimText};

/// Hex characters kept from the SHA-256 digest.
const FINGERPRINT_HEX_LEN: usize = 40;

/// Content fingerprint of a claim: `0x` + first 40 hex chars of SHA-256
/// over the trimmed text.
pub fn claim_fingerprint(claim: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(claim.trim().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("0x{}", &digest[..FINGERPRINT_HEX_LEN])
}

/// Union of flags preserving first-occurrence order.
fn dedup_flags(groups: impl IntoIterator<Item = Vec<Flag>>) -> Vec<Flag> {
    let mut out: Vec<Flag> = Vec::new();
    for flag in groups.into_iter().flatten() {
        if !out.contains(&flag) {
            out.push(flag);
        }
    }
    out
}

/// Claim-credibility scoring engine.
#[derive(Debug, Clone)]
pub struct CredibilityEngine {
    config: EngineConfig,
    registry: Arc<DomainRegistry>,
    patterns: Arc<PatternLibrary>,
}

impl CredibilityEngine {
    /// Build an engine from validated config and injected tables.
    pub fn new(
        config: EngineConfig,
        registry: Arc<DomainRegistry>,
        patterns: Arc<PatternLibrary>,
    ) -> CredenceResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            patterns,
        })
    }

    /// Engine with default config and the standard tables.
    pub fn with_defaults() -> CredenceResult<Self> {
        Self::new(
            EngineConfig::default(),
            Arc::new(DomainRegistry::standard()?),
            Arc::new(PatternLibrary::standard()?),
        )
    }

    /// Score a claim at the current instant.
    pub fn score(
        &self,
        claim: &str,
        evidence: &EvidenceContext,
    ) -> CredenceResult<CredibilityResult> {
        self.score_at(claim, evidence, Utc::now())
    }

    /// Score a claim as of `now`. `now` becomes the result timestamp and
    /// sets the current year for recycled-news detection.
    pub fn score_at(
        &self,
        claim: &str,
        evidence: &EvidenceContext,
        now: DateTime<Utc>,
    ) -> CredenceResult<CredibilityResult> {
        let started = Instant::now();
        let text = ClaimText::new(claim);
        if text.is_empty() {
            return Err(CredenceError::Validation(
                "claim text cannot be empty".to_string(),
            ));
        }

        let src = source::score(
            evidence.source_url.as_deref(),
            evidence.web_context.as_deref(),
            &self.registry,
        );
        let ling = linguistic::score(&text, &self.patterns);
        let num = numerical::score(&text, &self.patterns);
        let rag = rag_match::score(&text, evidence.rag_context.as_deref());
        let temp = temporal::score(&text, &self.patterns, now.year());
        let comm = community::score(evidence.votes.as_ref(), &self.config.community);

        let components = [
            src.signal.value,
            ling.value,
            num.value,
            rag.value,
            temp.value,
            comm.value,
        ];
        let flags = dedup_flags([
            src.signal.flags,
            ling.flags,
            num.flags,
            rag.flags,
            temp.flags,
            comm.flags,
        ]);

        let final_score = scorer::composite(&self.config.weights, &components);
        let confidence =
            scorer::calibrate_confidence(&self.config.calibration, final_score, src.sources.len());
        let (verdict, risk_level) = scorer::classify(&self.config.thresholds, final_score, &flags);
        let explanation = explain::explain(verdict, final_score, confidence, &components, &flags);

        log::debug!(
            "claim scored: verdict={verdict} risk={risk_level} score={final_score:.3} \
             confidence={confidence:.3} flags={}",
            flags.len()
        );

        Ok(CredibilityResult {
            claim: text.as_str().to_string(),
            claim_hash: claim_fingerprint(text.as_str()),
            source_score: components[0],
            linguistic_score: components[1],
            numerical_score: components[2],
            rag_match_score: components[3],
            temporal_score: components[4],
            community_score: components[5],
            final_score,
            confidence,
            verdict,
            risk_level,
            flags,
            sources_found: src.sources,
            explanation,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            processing_ms: started.elapsed().as_millis() as u64,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }
}
