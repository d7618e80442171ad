//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur while assembling a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Re-registering a transition name is rejected rather than silently
    /// overwriting the earlier edge.
    #[error("transition already registered: {name}")]
    DuplicateTransition { name: String },

    #[error("transition not found: {name}")]
    TransitionNotFound { name: String },

    #[error("context must be set before build()")]
    MissingContext,

    #[error("no start state: set one explicitly or register a transition first")]
    MissingStartState,

    #[error("unknown state token in schema: {token}")]
    UnknownStateToken { token: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
