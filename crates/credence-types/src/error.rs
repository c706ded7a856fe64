// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Credence Kernel failures.
///
/// Missing optional evidence is never an error: extractors degrade to a
/// neutral score plus an explanatory flag instead.
#[derive(Error, Debug)]
pub enum CredenceError {
    /// Invalid input (empty claim, malformed request).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A detector or registry pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// An analyzer in the fallback chain failed.
    #[error("analyzer '{analyzer}' failed: {reason}")]
    Analyzer { analyzer: String, reason: String },

    /// JSON encode/decode failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CredenceError {
    /// Whether retrying with another analyzer could change the outcome.
    pub fn is_input_error(&self) -> bool {
        matches!(self, CredenceError::Validation(_))
    }
}

pub type CredenceResult<T> = Result<T, CredenceError>;
