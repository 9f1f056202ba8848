//! Errors surfaced by the summarize commands.

use thiserror::Error;

/// Conditions that stop a summarize command before the buffer is changed.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("No active document or text buffer found.")]
    NoTargetBuffer,
    #[error("No {what} variables found.")]
    NoDeclarationsFound { what: String },
    #[error("building assignment pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

impl SummarizeError {
    /// Whether this is an informational notice rather than a failure.
    pub fn is_notice(&self) -> bool {
        matches!(self, SummarizeError::NoDeclarationsFound { .. })
    }
}
