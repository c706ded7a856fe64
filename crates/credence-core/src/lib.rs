// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Core Scoring Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Multi-signal credibility scoring for short factual claims.
//!
//! A claim and its optional evidence (source URL, retrieval context, web
//! search context, community votes) pass through six independent signal
//! extractors. Their scores are fused into a weighted composite, a
//! calibrated confidence and a categorical verdict with risk tier.
//!
//! # Invariants
//!
//! 1. **Bounded**: every component score, the composite and the confidence
//!    lie in [0, 1]. Non-finite intermediates are clamped, never emitted.
//!
//! 2. **Graceful degradation**: missing evidence yields a neutral score
//!    and an explanatory flag, not an error. The only rejected input is an
//!    empty claim.
//!
//! 3. **Stateless**: scoring holds no locks and mutates nothing shared.

pub mod analyzer;
pub mod engine;
pub mod explain;
pub mod message;
pub mod patterns;
pub mod registry;
pub mod scorer;
pub mod signals;

pub use analyzer::{
    AnalyzerChain, Assessment, ClaimAnalyzer, EngineAnalyzer, ExternalAnalyzer, ExternalVerdict,
    HeuristicAnalyzer, SafeDefaultAnalyzer,
};
pub use engine::{claim_fingerprint, CredibilityEngine};
pub use message::MessageHeuristics;
pub use patterns::PatternLibrary;
pub use registry::{extract_domain, DomainRegistry};
