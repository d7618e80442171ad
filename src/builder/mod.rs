//! Builder API for ergonomic state machine construction.
//!
//! The builder accumulates transitions, states, hooks, a start state, a
//! context, and an optional serialization adapter, then compiles them
//! into an immutable [`Machine`]. Fallible steps (name registration,
//! name-keyed attachment) return `Result<Self, BuildError>` so chains
//! stay fluent with `?`.

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::core::{DynError, State, Transition};
use crate::machine::hooks::{HookRegistry, Next};
use crate::machine::{Machine, MachineError};
use crate::schema::{ContextJsonAdapter, MachineSchema};
use std::collections::{HashMap, HashSet};

/// Fluent builder for [`Machine`].
///
/// # Example
///
/// ```rust
/// use gearshift::builder::MachineBuilder;
/// use gearshift::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// let mut machine = MachineBuilder::new()
///     .add_transition("go", Light::Red, Light::Green)?
///     .add_transition("stop", Light::Green, Light::Red)?
///     .set_context(())
///     .build()?;
///
/// machine.transition("go")?;
/// assert_eq!(machine.state(), &Light::Green);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MachineBuilder<S: State, C> {
    transitions: Vec<Transition<S, C>>,
    by_name: HashMap<String, usize>,
    states: HashSet<S>,
    start_state: Option<S>,
    context: Option<C>,
    hooks: HookRegistry<S, C>,
    adapter: Option<Box<dyn ContextJsonAdapter<C> + Send + Sync>>,
}

impl<S: State, C> std::fmt::Debug for MachineBuilder<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MachineBuilder")
            .field("states", &self.states)
            .field("start_state", &self.start_state)
            .field("transitions", &self.transitions.len())
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: State, C> MachineBuilder<S, C> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            by_name: HashMap::new(),
            states: HashSet::new(),
            start_state: None,
            context: None,
            hooks: HookRegistry::default(),
            adapter: None,
        }
    }

    /// Register a named edge. Both endpoint states are added to the state
    /// set automatically. Registration order is significant: it drives
    /// auto-transition candidate order and schema export order.
    pub fn add_transition(
        mut self,
        name: impl Into<String>,
        start: S,
        end: S,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(BuildError::DuplicateTransition { name });
        }
        self.states.insert(start.clone());
        self.states.insert(end.clone());
        self.by_name.insert(name.clone(), self.transitions.len());
        self.transitions.push(Transition::new(name, start, end));
        Ok(self)
    }

    /// Add a state that no transition touches. Idempotent.
    pub fn add_state(mut self, state: S) -> Self {
        self.states.insert(state);
        self
    }

    /// Attach a gate predicate to a registered transition.
    pub fn set_transition_condition<F>(
        mut self,
        name: &str,
        condition: F,
    ) -> Result<Self, BuildError>
    where
        F: Fn(&mut C) -> Result<bool, DynError> + Send + Sync + 'static,
    {
        let index = self.lookup(name)?;
        self.transitions[index].condition = Some(Box::new(condition));
        Ok(self)
    }

    /// Attach a side-effecting event to a registered transition.
    pub fn set_transition_event<F>(mut self, name: &str, event: F) -> Result<Self, BuildError>
    where
        F: Fn(&mut C) -> Result<(), DynError> + Send + Sync + 'static,
    {
        let index = self.lookup(name)?;
        self.transitions[index].event = Some(Box::new(event));
        Ok(self)
    }

    /// Append a middleware to the named transition's chain.
    pub fn transition_middleware<F>(mut self, name: impl Into<String>, middleware: F) -> Self
    where
        F: for<'a> Fn(&mut C, Next<'a, C>) -> Result<(), MachineError> + Send + Sync + 'static,
    {
        self.hooks
            .transition_middlewares
            .entry(name.into())
            .or_default()
            .push(Box::new(middleware));
        self
    }

    /// Append a middleware wrapping every transition.
    pub fn transition_all_middleware<F>(mut self, middleware: F) -> Self
    where
        F: for<'a> Fn(&str, &mut C, Next<'a, C>) -> Result<(), MachineError>
            + Send
            + Sync
            + 'static,
    {
        self.hooks.global_middlewares.push(Box::new(middleware));
        self
    }

    /// Append a callback fired after the named transition completes.
    pub fn subscribe_on_transition<F>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), DynError> + Send + Sync + 'static,
    {
        self.hooks
            .transition_callbacks
            .entry(name.into())
            .or_default()
            .push(Box::new(callback));
        self
    }

    /// Append a callback fired after every transition completes.
    pub fn subscribe_on_all_transition<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &mut C) -> Result<(), DynError> + Send + Sync + 'static,
    {
        self.hooks
            .global_transition_callbacks
            .push(Box::new(callback));
        self
    }

    /// Append a callback fired whenever the given state is entered.
    pub fn subscribe_on_state<F>(mut self, state: S, callback: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), DynError> + Send + Sync + 'static,
    {
        self.hooks
            .state_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(callback));
        self
    }

    /// Append a callback fired on every state entry.
    pub fn subscribe_on_all_state<F>(mut self, callback: F) -> Self
    where
        F: Fn(&S, &mut C) -> Result<(), DynError> + Send + Sync + 'static,
    {
        self.hooks.global_state_callbacks.push(Box::new(callback));
        self
    }

    /// Set the start state explicitly. Without this, the first-registered
    /// transition's start is used.
    pub fn set_start_state(mut self, state: S) -> Self {
        self.start_state = Some(state);
        self
    }

    /// Hand the context to the machine. Required before [`build`].
    ///
    /// Ownership moves in here and comes back out only through
    /// [`Machine::into_context`]; the machine's hooks are the sole
    /// mutation path in between.
    ///
    /// [`build`]: MachineBuilder::build
    pub fn set_context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Configure the adapter used by [`Machine::to_json`] /
    /// [`Machine::from_json`].
    pub fn set_context_json_adapter<A>(mut self, adapter: A) -> Self
    where
        A: ContextJsonAdapter<C> + Send + Sync + 'static,
    {
        self.adapter = Some(Box::new(adapter));
        self
    }

    /// Populate states, transitions, and start state from an exported
    /// schema. Conditions and events do not survive serialization;
    /// reattach them by name with
    /// [`set_transition_condition`](MachineBuilder::set_transition_condition)
    /// and [`set_transition_event`](MachineBuilder::set_transition_event).
    ///
    /// `decode_state` maps a token back to a concrete state; `None` fails
    /// the import with [`BuildError::UnknownStateToken`].
    pub fn from_json_schema<F>(mut self, schema: &str, decode_state: F) -> Result<Self, BuildError>
    where
        F: Fn(&str) -> Option<S>,
    {
        let parsed: MachineSchema = serde_json::from_str(schema)?;
        let decode = |token: &str| {
            decode_state(token).ok_or_else(|| BuildError::UnknownStateToken {
                token: token.to_string(),
            })
        };

        for token in &parsed.states {
            self = self.add_state(decode(token)?);
        }
        for t in &parsed.transitions {
            self = self.add_transition(t.name.clone(), decode(&t.start)?, decode(&t.end)?)?;
        }
        self = self.set_start_state(decode(&parsed.start_state)?);
        Ok(self)
    }

    /// Compile the accumulated configuration into a [`Machine`].
    ///
    /// The start state resolves to the explicit one, else the start of the
    /// first-registered transition; a builder with neither fails with
    /// [`BuildError::MissingStartState`], and one without a context with
    /// [`BuildError::MissingContext`].
    pub fn build(self) -> Result<Machine<S, C>, BuildError> {
        let start_state = match self.start_state {
            Some(state) => state,
            None => self
                .transitions
                .first()
                .map(|t| t.start.clone())
                .ok_or(BuildError::MissingStartState)?,
        };
        let context = self.context.ok_or(BuildError::MissingContext)?;

        let mut by_start: HashMap<S, Vec<usize>> = HashMap::new();
        for (index, transition) in self.transitions.iter().enumerate() {
            by_start
                .entry(transition.start.clone())
                .or_default()
                .push(index);
        }

        Ok(Machine {
            transitions: self.transitions,
            by_name: self.by_name,
            by_start,
            states: self.states,
            state: start_state.clone(),
            start_state,
            context,
            hooks: self.hooks,
            adapter: self.adapter,
            events_enabled: true,
        })
    }

    /// Build and hand the machine to a wrapper factory.
    ///
    /// This is the specialization seam: a client wraps the generic engine
    /// in its own type and exposes named convenience methods that call
    /// [`Machine::transition`] internally.
    pub fn build_with<F, M>(self, factory: F) -> Result<M, BuildError>
    where
        F: FnOnce(Machine<S, C>) -> M,
    {
        Ok(factory(self.build()?))
    }

    fn lookup(&self, name: &str) -> Result<usize, BuildError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| BuildError::TransitionNotFound {
                name: name.to_string(),
            })
    }
}

impl<S: State, C> Default for MachineBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}
