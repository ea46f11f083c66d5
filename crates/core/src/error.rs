use serde::Serialize;

/// Failure kinds surfaced by the generator core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Error {
    /// The prompt or filename was rejected before any external call.
    #[error("Invalid submission: {reason}")]
    InvalidSubmission { reason: String },

    /// The external generation capability failed (transport, auth, quota, ...).
    #[error("Failed to generate file content. Please check your prompt and try again.")]
    GenerationFailed { cause: String },

    /// The capability answered, but without usable text.
    #[error("No content generated.")]
    EmptyResponse,

    #[error("A generation is already in progress")]
    Busy,

    #[error("No document has been generated yet")]
    NoDocument,
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidSubmission {
            reason: reason.into(),
        }
    }

    /// Whether this error ends a submission that reached the capability.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Error::GenerationFailed { .. } | Error::EmptyResponse)
    }
}

/// Failure reported by a [`GenerationCapability`](crate::gateway::GenerationCapability).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CapabilityError(pub String);

impl CapabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
