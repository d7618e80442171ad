//! Hook registry and the two-level middleware pipeline.
//!
//! Six independent hook collections hang off a machine: middleware and
//! callbacks, each in a name-scoped, state-scoped (callbacks only), and
//! global flavor. Registration order is invocation order, and duplicate
//! registrations are allowed — every entry fires.

use crate::core::{Callback, Condition, State};
use crate::machine::error::MachineError;
use std::collections::HashMap;

/// Continuation handle passed to middleware.
///
/// Calling [`Next::run`] proceeds to the next middleware in the chain (or,
/// at the end of the chain, to the transition's condition). `run` consumes
/// the handle, so a middleware can continue the pipeline at most once;
/// dropping the handle without calling it short-circuits the rest of the
/// pipeline silently — the transition still succeeds, and the condition is
/// never evaluated.
pub struct Next<'a, C> {
    inner: &'a mut dyn FnMut(&mut C) -> Result<(), MachineError>,
}

impl<'a, C> Next<'a, C> {
    pub(crate) fn new(inner: &'a mut dyn FnMut(&mut C) -> Result<(), MachineError>) -> Self {
        Self { inner }
    }

    /// Continue with the remainder of the pipeline.
    pub fn run(self, context: &mut C) -> Result<(), MachineError> {
        (self.inner)(context)
    }
}

/// Middleware scoped to a single transition name.
pub type Middleware<C> =
    Box<dyn for<'a> Fn(&mut C, Next<'a, C>) -> Result<(), MachineError> + Send + Sync>;

/// Middleware wrapping every transition; also receives the transition name.
pub type NamedMiddleware<C> =
    Box<dyn for<'a> Fn(&str, &mut C, Next<'a, C>) -> Result<(), MachineError> + Send + Sync>;

/// Callback fired after every transition; also receives the transition name.
pub type NamedCallback<C> = Box<
    dyn Fn(&str, &mut C) -> Result<(), crate::core::DynError> + Send + Sync,
>;

/// Callback fired on every state entry; also receives the new state.
pub type StateCallback<S, C> = Box<
    dyn Fn(&S, &mut C) -> Result<(), crate::core::DynError> + Send + Sync,
>;

/// Ordered hook tables, compiled once by the builder and immutable after.
pub struct HookRegistry<S: State, C> {
    pub(crate) transition_middlewares: HashMap<String, Vec<Middleware<C>>>,
    pub(crate) global_middlewares: Vec<NamedMiddleware<C>>,
    pub(crate) transition_callbacks: HashMap<String, Vec<Callback<C>>>,
    pub(crate) global_transition_callbacks: Vec<NamedCallback<C>>,
    pub(crate) state_callbacks: HashMap<S, Vec<Callback<C>>>,
    pub(crate) global_state_callbacks: Vec<StateCallback<S, C>>,
}

impl<S: State, C> Default for HookRegistry<S, C> {
    fn default() -> Self {
        Self {
            transition_middlewares: HashMap::new(),
            global_middlewares: Vec::new(),
            transition_callbacks: HashMap::new(),
            global_transition_callbacks: Vec::new(),
            state_callbacks: HashMap::new(),
            global_state_callbacks: Vec::new(),
        }
    }
}

impl<S: State, C> HookRegistry<S, C> {
    pub(crate) fn scoped_middlewares(&self, name: &str) -> &[Middleware<C>] {
        self.transition_middlewares
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One pipeline run: the global middleware onion wraps the name-scoped
/// onion, which wraps the condition check.
pub(crate) struct Pipeline<'a, C> {
    pub(crate) name: &'a str,
    pub(crate) global: &'a [NamedMiddleware<C>],
    pub(crate) scoped: &'a [Middleware<C>],
    pub(crate) condition: Option<&'a Condition<C>>,
}

impl<C> Pipeline<'_, C> {
    pub(crate) fn run(&self, context: &mut C) -> Result<(), MachineError> {
        self.outer(0, context)
    }

    fn outer(&self, index: usize, context: &mut C) -> Result<(), MachineError> {
        match self.global.get(index) {
            Some(middleware) => {
                let mut cont = |c: &mut C| self.outer(index + 1, c);
                middleware(self.name, context, Next::new(&mut cont))
            }
            None => self.inner(0, context),
        }
    }

    fn inner(&self, index: usize, context: &mut C) -> Result<(), MachineError> {
        match self.scoped.get(index) {
            Some(middleware) => {
                let mut cont = |c: &mut C| self.inner(index + 1, c);
                middleware(context, Next::new(&mut cont))
            }
            None => self.check(context),
        }
    }

    fn check(&self, context: &mut C) -> Result<(), MachineError> {
        match self.condition {
            None => Ok(()),
            Some(condition) => match condition(context) {
                Ok(true) => Ok(()),
                Ok(false) => Err(MachineError::ConditionFailed {
                    name: self.name.to_string(),
                }),
                Err(err) => Err(MachineError::Domain(err)),
            },
        }
    }
}
