use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeetError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] eyre::Report),
}

impl MeetError {
    /// Infrastructure-class failures may be retried by the caller with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MeetError::Timeout(_) | MeetError::Infrastructure(_))
    }
}

pub type MeetResult<T> = Result<T, MeetError>;

/// Raised by a repository when storage itself rejects an overlapping write,
/// e.g. through an exclusion constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("overlapping meet for organizer {organizer_id}")]
pub struct OverlapViolation {
    pub organizer_id: String,
}

pub const CONFLICT_MESSAGE: &str = "appointment conflict for this organizer and period";
