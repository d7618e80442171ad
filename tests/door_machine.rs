//! Engine conformance suite driven through a door machine.
//!
//! The door swings between Open, Ajar, and Close with a degree-of-opening
//! context; the full cycle exercises conditions, events, middleware,
//! callbacks, auto-transition, schema round-trips, and snapshots.

use gearshift::builder::{BuildError, MachineBuilder};
use gearshift::machine::Machine;
use gearshift::schema::ContextJsonAdapter;
use gearshift::state_enum;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

state_enum! {
    enum DoorState {
        Open,
        Ajar,
        Close,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DoorContext {
    degree_of_opening: i32,
}

impl Default for DoorContext {
    fn default() -> Self {
        Self {
            degree_of_opening: 100,
        }
    }
}

fn decode_door(token: &str) -> Option<DoorState> {
    match token {
        "Open" => Some(DoorState::Open),
        "Ajar" => Some(DoorState::Ajar),
        "Close" => Some(DoorState::Close),
        _ => None,
    }
}

/// Edges only; behavior is attached separately, mirroring a machine
/// rebuilt from a serialized schema.
fn structure() -> MachineBuilder<DoorState, DoorContext> {
    MachineBuilder::new()
        .add_transition("pre_open", DoorState::Close, DoorState::Ajar)
        .unwrap()
        .add_transition("pre_close", DoorState::Open, DoorState::Ajar)
        .unwrap()
        .add_transition("open", DoorState::Ajar, DoorState::Open)
        .unwrap()
        .add_transition("close", DoorState::Ajar, DoorState::Close)
        .unwrap()
        .add_transition("ajar_plus", DoorState::Ajar, DoorState::Ajar)
        .unwrap()
        .add_transition("ajar_minus", DoorState::Ajar, DoorState::Ajar)
        .unwrap()
}

fn with_behavior(
    builder: MachineBuilder<DoorState, DoorContext>,
) -> Result<MachineBuilder<DoorState, DoorContext>, BuildError> {
    builder
        .set_transition_event("pre_open", |ctx: &mut DoorContext| {
            ctx.degree_of_opening = 1;
            Ok(())
        })?
        .set_transition_event("pre_close", |ctx: &mut DoorContext| {
            ctx.degree_of_opening = 99;
            Ok(())
        })?
        .set_transition_condition("open", |ctx: &mut DoorContext| {
            Ok(ctx.degree_of_opening >= 99)
        })?
        .set_transition_event("open", |ctx: &mut DoorContext| {
            ctx.degree_of_opening = 100;
            Ok(())
        })?
        .set_transition_condition("close", |ctx: &mut DoorContext| {
            Ok(ctx.degree_of_opening <= 1)
        })?
        .set_transition_event("close", |ctx: &mut DoorContext| {
            ctx.degree_of_opening = 0;
            Ok(())
        })?
        .set_transition_condition("ajar_plus", |ctx: &mut DoorContext| {
            Ok((1..=98).contains(&ctx.degree_of_opening))
        })?
        .set_transition_event("ajar_plus", |ctx: &mut DoorContext| {
            ctx.degree_of_opening += 1;
            Ok(())
        })?
        .set_transition_condition("ajar_minus", |ctx: &mut DoorContext| {
            Ok((2..=99).contains(&ctx.degree_of_opening))
        })?
        .set_transition_event("ajar_minus", |ctx: &mut DoorContext| {
            ctx.degree_of_opening -= 1;
            Ok(())
        })
}

fn door() -> MachineBuilder<DoorState, DoorContext> {
    with_behavior(structure()).unwrap()
}

/// The canonical cycle: swing fully closed, then fully open again.
/// 200 transitions in total, 198 of them entering Ajar.
fn run_full_cycle(door: &mut Machine<DoorState, DoorContext>) {
    assert_eq!(door.state(), &DoorState::Open);
    assert_eq!(door.context().degree_of_opening, 100);

    door.transition("pre_close").unwrap();
    assert_eq!(door.state(), &DoorState::Ajar);
    assert_eq!(door.context().degree_of_opening, 99);

    while door.context().degree_of_opening > 1 {
        door.transition("ajar_minus").unwrap();
        assert_eq!(door.state(), &DoorState::Ajar);
    }
    assert_eq!(door.context().degree_of_opening, 1);

    door.transition("close").unwrap();
    assert_eq!(door.context().degree_of_opening, 0);
    assert_eq!(door.state(), &DoorState::Close);

    door.transition("pre_open").unwrap();
    assert_eq!(door.context().degree_of_opening, 1);
    assert_eq!(door.state(), &DoorState::Ajar);

    while door.context().degree_of_opening < 99 {
        door.transition("ajar_plus").unwrap();
        assert_eq!(door.state(), &DoorState::Ajar);
    }

    door.transition("open").unwrap();
    assert_eq!(door.state(), &DoorState::Open);
    assert_eq!(door.context().degree_of_opening, 100);
}

#[test]
fn builder_constructed_door_walks_the_full_cycle() {
    let mut machine = door()
        .set_context(DoorContext::default())
        .set_start_state(DoorState::Open)
        .build()
        .unwrap();

    run_full_cycle(&mut machine);
}

#[test]
fn typed_wrapper_exposes_named_transitions() {
    struct TypedDoor {
        machine: Machine<DoorState, DoorContext>,
    }

    impl TypedDoor {
        fn pre_close(&mut self) {
            self.machine.transition("pre_close").unwrap();
        }

        fn ajar_minus(&mut self) {
            self.machine.transition("ajar_minus").unwrap();
        }

        fn close(&mut self) {
            self.machine.transition("close").unwrap();
        }
    }

    let mut typed = door()
        .set_context(DoorContext::default())
        .set_start_state(DoorState::Open)
        .build_with(|machine| TypedDoor { machine })
        .unwrap();

    typed.pre_close();
    while typed.machine.context().degree_of_opening > 1 {
        typed.ajar_minus();
    }
    typed.close();

    assert_eq!(typed.machine.state(), &DoorState::Close);
    assert_eq!(typed.machine.context().degree_of_opening, 0);
}

#[test]
fn auto_transition_from_open_swings_ajar() {
    let mut machine = door()
        .set_context(DoorContext::default())
        .set_start_state(DoorState::Open)
        .build()
        .unwrap();

    // The only edge leaving Open is pre_close.
    assert_eq!(machine.auto_transition().as_deref(), Some("pre_close"));
    assert_eq!(machine.state(), &DoorState::Ajar);
}

#[test]
fn schema_round_trip_reproduces_the_machine() {
    let mut original = door()
        .set_context(DoorContext::default())
        .set_start_state(DoorState::Open)
        .build()
        .unwrap();

    run_full_cycle(&mut original);
    let schema = original.to_json_schema().unwrap();

    let rebuilt = MachineBuilder::new()
        .from_json_schema(&schema, decode_door)
        .unwrap();
    let mut rebuilt = with_behavior(rebuilt)
        .unwrap()
        .set_context(DoorContext::default())
        .build()
        .unwrap();

    assert_eq!(rebuilt.to_json_schema().unwrap(), schema);
    run_full_cycle(&mut rebuilt);
}

#[test]
fn schema_imports_into_string_typed_states() {
    let original = door()
        .set_context(DoorContext::default())
        .set_start_state(DoorState::Open)
        .build()
        .unwrap();
    let schema = original.to_json_schema().unwrap();

    let stringly: Machine<String, DoorContext> = MachineBuilder::new()
        .from_json_schema(&schema, |token| Some(token.to_string()))
        .unwrap()
        .set_context(DoorContext::default())
        .build()
        .unwrap();

    assert_eq!(stringly.state().as_str(), "Open");
}

#[test]
fn snapshot_restores_state_and_context() {
    struct DegreeAdapter;

    impl ContextJsonAdapter<DoorContext> for DegreeAdapter {
        fn to_json(&self, context: &DoorContext) -> Result<String, gearshift::core::DynError> {
            Ok(context.degree_of_opening.to_string())
        }

        fn from_json(&self, json: &str) -> Result<DoorContext, gearshift::core::DynError> {
            Ok(DoorContext {
                degree_of_opening: json.parse()?,
            })
        }
    }

    let mut machine = door()
        .set_context(DoorContext::default())
        .set_start_state(DoorState::Open)
        .set_context_json_adapter(DegreeAdapter)
        .build()
        .unwrap();

    assert_eq!(machine.state(), &DoorState::Open);
    let dump = machine.to_json().unwrap();

    machine.transition("pre_close").unwrap();
    assert_eq!(machine.state(), &DoorState::Ajar);
    assert_eq!(machine.context().degree_of_opening, 99);

    machine.from_json(&dump, decode_door).unwrap();
    assert_eq!(machine.state(), &DoorState::Open);
    assert_eq!(machine.context().degree_of_opening, 100);
}

#[test]
fn middleware_and_callback_invocation_counts() {
    let scoped_mw = Arc::new(AtomicUsize::new(0));
    let global_mw = Arc::new(AtomicUsize::new(0));
    let scoped_cb = Arc::new(AtomicUsize::new(0));
    let global_cb = Arc::new(AtomicUsize::new(0));
    let state_cb = Arc::new(AtomicUsize::new(0));
    let global_state_cb = Arc::new(AtomicUsize::new(0));

    let c = Arc::clone(&scoped_mw);
    let builder = door().transition_middleware("open", move |ctx, next| {
        c.fetch_add(1, Ordering::SeqCst);
        next.run(ctx)
    });

    let c = Arc::clone(&global_mw);
    let builder = builder.transition_all_middleware(move |_name, ctx, next| {
        c.fetch_add(1, Ordering::SeqCst);
        next.run(ctx)
    });

    let c = Arc::clone(&scoped_cb);
    let builder = builder.subscribe_on_transition("open", move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let c = Arc::clone(&global_cb);
    let builder = builder.subscribe_on_all_transition(move |_, _| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let c = Arc::clone(&state_cb);
    let builder = builder.subscribe_on_state(DoorState::Ajar, move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let c = Arc::clone(&global_state_cb);
    let builder = builder.subscribe_on_all_state(move |_, _| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let mut machine = builder
        .set_context(DoorContext::default())
        .set_start_state(DoorState::Open)
        .build()
        .unwrap();

    run_full_cycle(&mut machine);

    assert_eq!(scoped_mw.load(Ordering::SeqCst), 1);
    assert_eq!(global_mw.load(Ordering::SeqCst), 200);
    assert_eq!(scoped_cb.load(Ordering::SeqCst), 1);
    assert_eq!(global_cb.load(Ordering::SeqCst), 200);
    assert_eq!(state_cb.load(Ordering::SeqCst), 198);
    assert_eq!(global_state_cb.load(Ordering::SeqCst), 200);
}

#[test]
fn disabled_events_swing_the_door_without_touching_it() {
    let mut machine = door()
        .set_context(DoorContext::default())
        .set_start_state(DoorState::Open)
        .build()
        .unwrap();

    machine.disable_events();
    machine.transition("pre_close").unwrap();
    // "close" requires degree <= 1, but the condition is not consulted and
    // the pre_close event never ran.
    machine.transition("close").unwrap();
    assert_eq!(machine.state(), &DoorState::Close);
    assert_eq!(machine.context().degree_of_opening, 100);

    machine.enable_events();
    machine.transition("pre_open").unwrap();
    assert_eq!(machine.context().degree_of_opening, 1);
}
