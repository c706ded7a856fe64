// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, flag vocabulary and error hierarchy
//! for the Credence claim-credibility kernel.

pub mod config;
pub mod error;
pub mod evidence;
pub mod flag;
pub mod message;
pub mod score;

pub use config::{
    CalibrationParams, CommunityParams, EngineConfig, ScoringWeights, VerdictThresholds,
};
pub use error::{CredenceError, CredenceResult};
pub use evidence::{EvidenceContext, VoteCount, VoteTally, NO_MATCH_SENTINEL};
pub use flag::{Flag, FlagKind, Signal};
pub use message::MessageAnalysis;
pub use score::{
    clamp_score, CredibilityResult, RiskLevel, SignalScore, SourceDescriptor, SourceTier, Verdict,
};
