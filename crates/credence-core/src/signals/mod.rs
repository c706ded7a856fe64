// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Signal Extractors
// ─────────────────────────────────────────────────────────────────────
//! The six independent credibility signals.
//!
//! Every extractor is a pure function of the claim and its own slice of
//! evidence, returning a [`SignalScore`](credence_types::SignalScore) in
//! [0, 1] (higher is more credible). Missing evidence degrades to a
//! documented neutral value plus a flag; nothing here returns an error.

pub mod community;
pub mod linguistic;
pub mod numerical;
pub mod rag_match;
pub mod source;
pub mod temporal;

/// Claim text prepared once for all extractors.
#[derive(Debug, Clone)]
pub struct ClaimText<'a> {
    trimmed: &'a str,
    lower: String,
}

impl<'a> ClaimText<'a> {
    pub fn new(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        Self {
            trimmed,
            lower: trimmed.to_lowercase(),
        }
    }

    /// Trimmed text, casing preserved.
    pub fn as_str(&self) -> &'a str {
        self.trimmed
    }

    /// Lower-cased text used for pattern matching.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed.is_empty()
    }
}
