//! Door State Machine
//!
//! This example demonstrates the full engine surface on a small machine:
//!
//! Key concepts:
//! - Conditions gating transitions on context values
//! - Events mutating the context after a move
//! - Middleware wrapping the pipeline
//! - Auto-transition and schema export
//!
//! Run with: cargo run --example door

use gearshift::builder::MachineBuilder;
use gearshift::state_enum;

state_enum! {
    enum DoorState {
        Open,
        Ajar,
        Close,
    }
}

#[derive(Debug)]
struct DoorContext {
    degree_of_opening: i32,
}

fn main() {
    println!("=== Door State Machine ===\n");

    let mut door = MachineBuilder::new()
        .add_transition("pre_close", DoorState::Open, DoorState::Ajar)
        .unwrap()
        .add_transition("close", DoorState::Ajar, DoorState::Close)
        .unwrap()
        .add_transition("pre_open", DoorState::Close, DoorState::Ajar)
        .unwrap()
        .add_transition("open", DoorState::Ajar, DoorState::Open)
        .unwrap()
        .set_transition_event("pre_close", |ctx: &mut DoorContext| {
            ctx.degree_of_opening = 1;
            Ok(())
        })
        .unwrap()
        .set_transition_condition("close", |ctx: &mut DoorContext| {
            Ok(ctx.degree_of_opening <= 1)
        })
        .unwrap()
        .set_transition_event("close", |ctx: &mut DoorContext| {
            ctx.degree_of_opening = 0;
            Ok(())
        })
        .unwrap()
        .transition_all_middleware(|name, ctx, next| {
            println!("  [middleware] entering '{name}'");
            next.run(ctx)
        })
        .subscribe_on_all_state(|state, _ctx: &mut DoorContext| {
            println!("  [callback] now in {state:?}");
            Ok(())
        })
        .set_start_state(DoorState::Open)
        .set_context(DoorContext {
            degree_of_opening: 100,
        })
        .build()
        .unwrap();

    println!("Initial state: {:?}\n", door.state());

    println!("transition(\"pre_close\"):");
    door.transition("pre_close").unwrap();

    println!("transition(\"close\"):");
    door.transition("close").unwrap();

    println!("\nDoor is now {:?}, degree {}", door.state(), door.context().degree_of_opening);

    println!("\nauto_transition() probes the edges leaving Close:");
    let taken = door.auto_transition();
    println!("  took {taken:?}, now in {:?}", door.state());

    println!("\nExported schema:");
    println!("{}", door.to_json_schema().unwrap());

    println!("\n=== Example Complete ===");
}
