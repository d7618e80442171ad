//! Transition types: named edges with optional gate and side effect.

use crate::core::State;
use std::fmt;

/// Boxed error type carried across the engine boundary.
///
/// Conditions and hooks are supplied by the client; whatever error type
/// they produce crosses the engine unchanged behind this alias.
pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Gate predicate for a transition.
///
/// `Ok(true)` lets the transition proceed, `Ok(false)` fails it with the
/// engine's own condition error, `Err` fails it with the client's domain
/// error, surfaced unchanged.
pub type Condition<C> = Box<dyn Fn(&mut C) -> Result<bool, DynError> + Send + Sync>;

/// Side-effecting hook receiving the context.
///
/// Used for the per-transition event and for name- and state-scoped
/// callback subscriptions.
pub type Callback<C> = Box<dyn Fn(&mut C) -> Result<(), DynError> + Send + Sync>;

/// A named directed edge between two states.
///
/// The optional `condition` gates the move; the optional `event` fires
/// first among the post-transition hooks. Neither is serialized: an edge
/// rebuilt from a JSON schema carries only name/start/end, and behavior is
/// reattached by name through the builder.
pub struct Transition<S: State, C> {
    pub name: String,
    pub start: S,
    pub end: S,
    pub condition: Option<Condition<C>>,
    pub event: Option<Callback<C>>,
}

impl<S: State, C> Transition<S, C> {
    /// Create a bare edge with no condition and no event.
    pub fn new(name: impl Into<String>, start: S, end: S) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            condition: None,
            event: None,
        }
    }
}

impl<S: State, C> fmt::Debug for Transition<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("condition", &self.condition.is_some())
            .field("event", &self.event.is_some())
            .finish()
    }
}
