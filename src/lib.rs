//! Gearshift: a hook-driven finite state machine engine.
//!
//! A machine drives an opaque context value through a fixed set of named
//! transitions. Each move can be gated by a condition, wrapped by a
//! two-level middleware onion, and followed by ordered callback
//! subscriptions; the machine's structure round-trips through a JSON
//! schema and its run-state through snapshots.
//!
//! # Core Concepts
//!
//! - **State**: identity-only token, via the [`core::State`] trait or the
//!   [`state_enum!`] macro
//! - **Context**: opaque value owned by the machine, mutated only by the
//!   hooks the client supplies
//! - **Transition**: named edge with optional condition gate and event
//! - **Middleware / callbacks**: ordered hook layers around every move
//!
//! # Example
//!
//! ```rust
//! use gearshift::builder::MachineBuilder;
//! use gearshift::state_enum;
//!
//! state_enum! {
//!     enum Door {
//!         Open,
//!         Close,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Latch {
//!     turns: u32,
//! }
//!
//! let mut machine = MachineBuilder::new()
//!     .add_transition("shut", Door::Open, Door::Close)?
//!     .set_transition_event("shut", |latch: &mut Latch| {
//!         latch.turns += 1;
//!         Ok(())
//!     })?
//!     .set_context(Latch::default())
//!     .build()?;
//!
//! machine.transition("shut")?;
//! assert_eq!(machine.state(), &Door::Close);
//! assert_eq!(machine.context().turns, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod route;
pub mod schema;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use core::{State, Transition};
pub use machine::{Machine, MachineError, Next};
pub use schema::{ContextJsonAdapter, MachineSchema, MachineSnapshot, TransitionSchema};
