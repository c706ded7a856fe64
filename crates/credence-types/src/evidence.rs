// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Evidence Context
// ─────────────────────────────────────────────────────────────────────
//! Pre-resolved evidence handed to the engine by its collaborators.
//!
//! The engine never fetches anything: the URL, retrieval context, web
//! search text and vote tallies all arrive here as plain values.

use serde::{Deserialize, Serialize};

/// Retrieval collaborator's answer when nothing in the knowledge base matched.
pub const NO_MATCH_SENTINEL: &str = "No matching government schemes found.";

/// True/false vote counts from one voter class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    #[serde(rename = "true", default)]
    pub true_votes: u64,
    #[serde(rename = "false", default)]
    pub false_votes: u64,
}

impl VoteCount {
    pub fn new(true_votes: u64, false_votes: u64) -> Self {
        Self {
            true_votes,
            false_votes,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_votes.saturating_add(self.false_votes)
    }

    /// Share of `true` votes; 0.0 when nobody voted.
    pub fn true_fraction(&self) -> f64 {
        self.true_votes as f64 / self.total().max(1) as f64
    }
}

/// Community tallies from the vote ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    #[serde(rename = "user_votes", default)]
    pub user: VoteCount,
    #[serde(rename = "validator_votes", default)]
    pub validator: VoteCount,
}

impl VoteTally {
    pub fn new(user: VoteCount, validator: VoteCount) -> Self {
        Self { user, validator }
    }

    pub fn total(&self) -> u64 {
        self.user.total().saturating_add(self.validator.total())
    }
}

/// Optional evidence accompanying a claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceContext {
    pub source_url: Option<String>,
    /// Knowledge-base text from the retrieval collaborator.
    pub rag_context: Option<String>,
    /// Web search snippets.
    pub web_context: Option<String>,
    pub votes: Option<VoteTally>,
}

impl EvidenceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn with_rag_context(mut self, context: impl Into<String>) -> Self {
        self.rag_context = Some(context.into());
        self
    }

    pub fn with_web_context(mut self, context: impl Into<String>) -> Self {
        self.web_context = Some(context.into());
        self
    }

    pub fn with_votes(mut self, votes: VoteTally) -> Self {
        self.votes = Some(votes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_tally_wire_form() {
        let tally: VoteTally = serde_json::from_str(
            r#"{"user_votes": {"true": 4, "false": 1}, "validator_votes": {"true": 2}}"#,
        )
        .unwrap();
        assert_eq!(tally.user, VoteCount::new(4, 1));
        assert_eq!(tally.validator, VoteCount::new(2, 0));
        assert_eq!(tally.total(), 7);
    }

    #[test]
    fn test_true_fraction_no_votes() {
        assert_eq!(VoteCount::default().true_fraction(), 0.0);
        assert!((VoteCount::new(3, 1).true_fraction() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_total_saturates() {
        let count = VoteCount::new(u64::MAX, 5);
        assert_eq!(count.total(), u64::MAX);
    }

    #[test]
    fn test_builder() {
        let ctx = EvidenceContext::new()
            .with_source_url("https://thehindu.com/news")
            .with_votes(VoteTally::default());
        assert_eq!(ctx.source_url.as_deref(), Some("https://thehindu.com/news"));
        assert!(ctx.rag_context.is_none());
        assert!(ctx.votes.is_some());
    }
}
