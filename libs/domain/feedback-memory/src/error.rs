// [libs/domain/feedback-memory/src/error.rs]
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("[FEEDBACK_NOT_FOUND]: {0}")]
    NotFound(String),
    #[error("[FEEDBACK_INVALID_ARGUMENT]: {0}")]
    InvalidArgument(String),
    #[error("[FEEDBACK_UNAVAILABLE]: {0}")]
    Unavailable(String),
}

pub type FeedbackResult<T> = Result<T, FeedbackError>;
