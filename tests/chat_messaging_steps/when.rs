//! When steps for chat messaging BDD scenarios.

use super::world::{ChatWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"{who} sends "{text}""#)]
fn sends(world: &mut ChatWorld, who: String, text: String) -> Result<(), eyre::Report> {
    let participant = world.participant(&who)?;
    run_async(participant.controller.send(&text))?;
    world.pump_all()
}

#[when(r#"{who} types "{text}" and submits"#)]
fn types_and_submits(world: &mut ChatWorld, who: String, text: String) -> Result<(), eyre::Report> {
    let participant = world.participant(&who)?;
    participant.controller.set_input(text)?;
    let result = run_async(participant.controller.submit());
    world.last_error = result.err();
    world.pump_all()
}

#[when("{who} deletes the selection")]
fn deletes_selection(world: &mut ChatWorld, who: String) -> Result<(), eyre::Report> {
    let participant = world.participant(&who)?;
    let result = run_async(participant.controller.bulk_delete());
    world.last_error = result.err();
    world.pump_all()
}

#[when("{who} copies the selection")]
fn copies_selection(world: &mut ChatWorld, who: String) -> Result<(), eyre::Report> {
    let participant = world.participant(&who)?;
    run_async(participant.controller.copy_selection())?
        .ok_or_else(|| eyre::eyre!("nothing was selected"))?;
    Ok(())
}
