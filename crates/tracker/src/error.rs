//! Bug tracker client errors.

use money_shared::AppError;
use thiserror::Error;

/// Errors that survive [`crate::BugSource::fetch_new_items`].
///
/// Transient failures (connection refused, timeouts, 5xx) never show up here.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Client configuration is unusable.
    #[error("Invalid tracker configuration: {0}")]
    InvalidConfig(String),

    /// Request could not be built or sent.
    #[error("Tracker request failed: {0}")]
    Request(String),

    /// Tracker rejected the request.
    #[error("Tracker returned status {0}")]
    Status(u16),

    /// Response body was not a bug list.
    #[error("Failed to decode tracker response: {0}")]
    Decode(String),
}

impl TrackerError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_TRACKER_CONFIG",
            Self::Request(_) => "TRACKER_REQUEST_FAILED",
            Self::Status(_) => "TRACKER_STATUS",
            Self::Decode(_) => "TRACKER_DECODE_FAILED",
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidConfig(_) => Self::Config(err.to_string()),
            TrackerError::Request(_) | TrackerError::Status(_) | TrackerError::Decode(_) => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}
