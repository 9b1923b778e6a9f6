//! Given steps for chat messaging BDD scenarios.

use super::world::{ChatWorld, join, run_async};
use rstest_bdd_macros::given;

#[given("alice and bob share a conversation")]
fn share_conversation(world: &mut ChatWorld) -> Result<(), eyre::Report> {
    world.alice = Some(run_async(join(&world.store, "alice"))?);
    world.bob = Some(run_async(join(&world.store, "bob"))?);
    Ok(())
}

#[given(r#"{who} has sent "{text}""#)]
fn has_sent(world: &mut ChatWorld, who: String, text: String) -> Result<(), eyre::Report> {
    let participant = world.participant(&who)?;
    run_async(participant.controller.send(&text))?;
    world.pump_all()
}

#[given(r#"{who} selects the message "{text}""#)]
fn selects_message(world: &mut ChatWorld, who: String, text: String) -> Result<(), eyre::Report> {
    let participant = world.participant(&who)?;
    let id = participant.id_of(&text)?;
    if !participant.controller.toggle_selection(&id)? {
        return Err(eyre::eyre!("message {text:?} was not selected"));
    }
    Ok(())
}

#[given("the store rejects writes")]
fn store_rejects_writes(world: &mut ChatWorld) {
    world.store.set_fail_writes(true);
}
