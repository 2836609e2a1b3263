use thiserror::Error;

use biaslab_client::ApiError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Required submission fields missing; nothing reached the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// One in-flight submission per subject; resubmission is blocked
    /// until the current one settles.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error(transparent)]
    Backend(#[from] ApiError),
}
