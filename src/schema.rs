//! JSON wire formats for machine structure and run-state snapshots.
//!
//! Two independent formats:
//!
//! - [`MachineSchema`] describes *structure* — states, start state, and
//!   named edges. Conditions, events, and other hooks are not
//!   serializable and are excluded; after importing a schema they are
//!   reattached by name through the builder.
//! - [`MachineSnapshot`] captures *run-state* — the current state token
//!   plus the context rendered through a caller-supplied
//!   [`ContextJsonAdapter`]. Restoring a snapshot touches nothing but the
//!   `(state, context)` pair.

use crate::core::DynError;
use serde::{Deserialize, Serialize};

/// Bridge between an opaque context and its serialized string form.
///
/// The engine ships no default implementation; the context type is opaque
/// to it, so the client owns both directions of the mapping.
pub trait ContextJsonAdapter<C> {
    fn to_json(&self, context: &C) -> Result<String, DynError>;
    fn from_json(&self, json: &str) -> Result<C, DynError>;
}

/// Structure export: `{states, startState, transitions}`.
///
/// `states` is sorted case-insensitively by token; `transitions` keeps
/// registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSchema {
    pub states: Vec<String>,
    #[serde(rename = "startState")]
    pub start_state: String,
    pub transitions: Vec<TransitionSchema>,
}

/// One edge in a [`MachineSchema`]: name plus start/end state tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSchema {
    pub name: String,
    pub start: String,
    pub end: String,
}

/// Run-state snapshot: `{state, context}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub state: String,
    pub context: String,
}
