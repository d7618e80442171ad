//! Core types: states and transitions.
//!
//! Everything here is inert data. The [`crate::machine`] module supplies
//! execution semantics; the [`crate::builder`] module supplies construction.

pub mod state;
pub mod transition;

pub use state::State;
pub use transition::{Callback, Condition, DynError, Transition};
