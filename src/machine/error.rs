//! Engine error types.

use crate::core::DynError;
use thiserror::Error;

/// Errors surfaced by a running machine.
///
/// All of these reach the immediate caller of [`crate::machine::Machine`]
/// methods; the engine never retries and never logs a failure away. The
/// one deliberate swallow point is
/// [`auto_transition`](crate::machine::Machine::auto_transition), which
/// probes candidates and discards their failures.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("transition not found: {name}")]
    UnknownTransition { name: String },

    #[error("transition '{name}' starts at '{expected}' but machine is in '{actual}'")]
    StateMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("condition returned false for transition '{name}'")]
    ConditionFailed { name: String },

    #[error("condition raised: {0}")]
    Domain(#[source] DynError),

    #[error("hook raised: {0}")]
    Hook(#[source] DynError),

    #[error("context JSON adapter is not set")]
    AdapterNotSet,

    #[error("unknown state token: {token}")]
    UnknownStateToken { token: String },

    #[error("context (de)serialization failed: {0}")]
    ContextCodec(#[source] DynError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
