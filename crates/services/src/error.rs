//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `QuestionService` implementations.
///
/// Every variant is a transport- or contract-level failure; the controller
/// treats them uniformly and surfaces the message verbatim. Guard rejections
/// (empty answer, double submit, busy controller) never become errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    /// The service answered with a non-success status; `body` carries the
    /// response text as received.
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response decoded, but violated the contract (score out of range,
    /// malformed question payload, unknown level).
    #[error("invalid response payload: {0}")]
    Payload(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
