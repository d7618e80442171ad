//! The machine engine: transition pipeline, auto-transition search,
//! event gating, and schema/snapshot I/O.

pub mod error;
pub mod hooks;

pub use error::MachineError;
pub use hooks::{HookRegistry, Middleware, NamedCallback, NamedMiddleware, Next, StateCallback};

use crate::core::{State, Transition};
use crate::machine::hooks::Pipeline;
use crate::schema::{ContextJsonAdapter, MachineSchema, MachineSnapshot, TransitionSchema};
use std::collections::{HashMap, HashSet};

/// A running state machine.
///
/// Holds the current state, the owned context, and the compiled
/// transition/hook tables produced by
/// [`MachineBuilder`](crate::builder::MachineBuilder). The tables are
/// immutable after construction; only the `(state, context)` pair mutates,
/// and only through [`transition`](Machine::transition) and
/// [`from_json`](Machine::from_json).
///
/// A machine is single-threaded and synchronous: every condition,
/// middleware, event, and callback runs to completion on the caller's
/// thread before `transition` returns. Callers that share a machine across
/// threads must serialize access to it as a whole.
pub struct Machine<S: State, C> {
    pub(crate) transitions: Vec<Transition<S, C>>,
    pub(crate) by_name: HashMap<String, usize>,
    pub(crate) by_start: HashMap<S, Vec<usize>>,
    pub(crate) states: HashSet<S>,
    pub(crate) start_state: S,
    pub(crate) state: S,
    pub(crate) context: C,
    pub(crate) hooks: HookRegistry<S, C>,
    pub(crate) adapter: Option<Box<dyn ContextJsonAdapter<C> + Send + Sync>>,
    pub(crate) events_enabled: bool,
}

impl<S: State, C> std::fmt::Debug for Machine<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("state", &self.state)
            .field("start_state", &self.start_state)
            .field("states", &self.states)
            .field("transitions", &self.transitions.len())
            .field("events_enabled", &self.events_enabled)
            .finish_non_exhaustive()
    }
}

impl<S: State, C> Machine<S, C> {
    /// Current state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Borrow the context.
    ///
    /// The machine owns the context; hooks receive it mutably, everyone
    /// else reads it here or takes it back with
    /// [`into_context`](Machine::into_context).
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Consume the machine and hand the context back.
    pub fn into_context(self) -> C {
        self.context
    }

    /// Execute the named transition.
    ///
    /// Sequencing:
    /// 1. unknown name fails with [`MachineError::UnknownTransition`];
    /// 2. a current state other than the edge's start fails with
    ///    [`MachineError::StateMismatch`];
    /// 3. with events enabled, the global middleware onion wraps the
    ///    name-scoped onion wraps the condition — a `false` condition
    ///    fails with [`MachineError::ConditionFailed`], a raised one with
    ///    [`MachineError::Domain`], and the state is untouched;
    /// 4. the state moves to the edge's end (also when events are
    ///    disabled);
    /// 5. with events enabled, hooks fire in order: the edge's own event,
    ///    global transition callbacks, name-scoped transition callbacks,
    ///    global state callbacks (with the new state), state-scoped
    ///    callbacks. A hook failure surfaces as [`MachineError::Hook`]
    ///    and aborts the remaining hooks; the state stays updated.
    pub fn transition(&mut self, name: &str) -> Result<(), MachineError> {
        let index = *self
            .by_name
            .get(name)
            .ok_or_else(|| MachineError::UnknownTransition {
                name: name.to_string(),
            })?;
        let transition = &self.transitions[index];

        if self.state != transition.start {
            return Err(MachineError::StateMismatch {
                name: name.to_string(),
                expected: transition.start.name().to_string(),
                actual: self.state.name().to_string(),
            });
        }

        if self.events_enabled {
            let pipeline = Pipeline {
                name,
                global: &self.hooks.global_middlewares,
                scoped: self.hooks.scoped_middlewares(name),
                condition: transition.condition.as_ref(),
            };
            pipeline.run(&mut self.context)?;
        }

        self.state = transition.end.clone();
        tracing::debug!(transition = name, state = self.state.name(), "applied");

        if !self.events_enabled {
            return Ok(());
        }

        if let Some(event) = &transition.event {
            event(&mut self.context).map_err(MachineError::Hook)?;
        }
        for callback in &self.hooks.global_transition_callbacks {
            callback(name, &mut self.context).map_err(MachineError::Hook)?;
        }
        if let Some(callbacks) = self.hooks.transition_callbacks.get(name) {
            for callback in callbacks {
                callback(&mut self.context).map_err(MachineError::Hook)?;
            }
        }
        for callback in &self.hooks.global_state_callbacks {
            callback(&self.state, &mut self.context).map_err(MachineError::Hook)?;
        }
        if let Some(callbacks) = self.hooks.state_callbacks.get(&self.state) {
            for callback in callbacks {
                callback(&mut self.context).map_err(MachineError::Hook)?;
            }
        }

        Ok(())
    }

    /// Best-effort advance: try every transition leaving the current
    /// state, in registration order, and stop at the first that succeeds.
    ///
    /// Candidate failures of any kind are discarded. Returns the name of
    /// the edge taken, or `None` — with the state unchanged — when no
    /// candidate succeeds.
    pub fn auto_transition(&mut self) -> Option<String> {
        let candidates: Vec<String> = self
            .by_start
            .get(&self.state)?
            .iter()
            .map(|&index| self.transitions[index].name.clone())
            .collect();

        for name in candidates {
            match self.transition(&name) {
                Ok(()) => return Some(name),
                Err(err) => {
                    tracing::trace!(transition = %name, error = %err, "candidate rejected");
                }
            }
        }
        None
    }

    /// Stop running conditions, middleware, events, and callbacks;
    /// transitions become pure state movement.
    pub fn disable_events(&mut self) {
        self.events_enabled = false;
    }

    /// Restore the full pipeline.
    pub fn enable_events(&mut self) {
        self.events_enabled = true;
    }

    /// Export the machine's structure as a JSON schema.
    ///
    /// States are sorted case-insensitively by token; transitions keep
    /// registration order. Conditions and events are not serializable and
    /// are omitted — reattach them by name after
    /// [`from_json_schema`](crate::builder::MachineBuilder::from_json_schema).
    pub fn to_json_schema(&self) -> Result<String, MachineError> {
        let mut states: Vec<String> = self.states.iter().map(|s| s.name().to_string()).collect();
        states.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });

        let schema = MachineSchema {
            states,
            start_state: self.start_state.name().to_string(),
            transitions: self
                .transitions
                .iter()
                .map(|t| TransitionSchema {
                    name: t.name.clone(),
                    start: t.start.name().to_string(),
                    end: t.end.name().to_string(),
                })
                .collect(),
        };
        Ok(serde_json::to_string(&schema)?)
    }

    /// Snapshot the `(state, context)` pair through the configured
    /// [`ContextJsonAdapter`].
    pub fn to_json(&self) -> Result<String, MachineError> {
        let adapter = self.adapter.as_ref().ok_or(MachineError::AdapterNotSet)?;
        let context = adapter
            .to_json(&self.context)
            .map_err(MachineError::ContextCodec)?;
        let snapshot = MachineSnapshot {
            state: self.state.name().to_string(),
            context,
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Restore a `(state, context)` snapshot produced by
    /// [`to_json`](Machine::to_json). Hook configuration is untouched.
    pub fn from_json<F>(&mut self, dump: &str, decode_state: F) -> Result<(), MachineError>
    where
        F: Fn(&str) -> Option<S>,
    {
        let adapter = self.adapter.as_ref().ok_or(MachineError::AdapterNotSet)?;
        let snapshot: MachineSnapshot = serde_json::from_str(dump)?;
        let state = decode_state(&snapshot.state).ok_or_else(|| MachineError::UnknownStateToken {
            token: snapshot.state.clone(),
        })?;
        self.context = adapter
            .from_json(&snapshot.context)
            .map_err(MachineError::ContextCodec)?;
        self.state = state;
        Ok(())
    }
}
