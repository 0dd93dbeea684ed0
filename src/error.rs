//! Error types
//!
//! Crate-wide error enum. Recoverable conditions (escalation failures, plan
//! rejection) are handled where they occur and never reach callers as errors.

use thiserror::Error;

/// NutriNudge error types
#[derive(Debug, Error)]
pub enum NudgeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upstream service returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("AI service credits depleted")]
    CreditsDepleted,

    #[error("No content in AI response")]
    EmptyResponse,

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid constraints: {0}")]
    InvalidConstraints(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// Result type for NutriNudge operations
pub type NudgeResult<T> = Result<T, NudgeError>;
