//! Then steps for chat messaging BDD scenarios.

use super::world::ChatWorld;
use rstest_bdd_macros::then;

#[then("the message count for {who} is {count:usize}")]
fn message_count(world: &ChatWorld, who: String, count: usize) -> Result<(), eyre::Report> {
    let texts = world.participant(&who)?.texts()?;
    if texts.len() != count {
        return Err(eyre::eyre!(
            "expected {count} messages for {who}, found {texts:?}"
        ));
    }
    Ok(())
}

#[then(r#"{who} sees the message "{text}""#)]
fn sees_message(world: &ChatWorld, who: String, text: String) -> Result<(), eyre::Report> {
    let texts = world.participant(&who)?.texts()?;
    if !texts.contains(&text) {
        return Err(eyre::eyre!("{who} does not see {text:?} in {texts:?}"));
    }
    Ok(())
}

#[then(r#"{who}'s composer holds "{text}""#)]
fn composer_holds(world: &ChatWorld, who: String, text: String) -> Result<(), eyre::Report> {
    let input = world.participant(&who)?.controller.composer_input()?;
    if input != text {
        return Err(eyre::eyre!("composer holds {input:?}, expected {text:?}"));
    }
    Ok(())
}

#[then(r#"{who} is notified "{notice}""#)]
fn is_notified(world: &ChatWorld, who: String, notice: String) -> Result<(), eyre::Report> {
    let notices = world.participant(&who)?.controller.take_notices()?;
    if !notices.iter().any(|raised| raised.message() == notice) {
        return Err(eyre::eyre!("{who} was not notified {notice:?}: {notices:?}"));
    }
    if world.last_error.is_none() {
        return Err(eyre::eyre!("the failing operation did not report an error"));
    }
    Ok(())
}

#[then(r#"{who}'s clipboard holds "{first}" then "{second}""#)]
fn clipboard_holds(
    world: &ChatWorld,
    who: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let contents = world.participant(&who)?.clipboard.contents();
    let expected = format!("{first}\n{second}");
    if contents.as_deref() != Some(expected.as_str()) {
        return Err(eyre::eyre!("clipboard holds {contents:?}, expected {expected:?}"));
    }
    Ok(())
}

#[then("{who} has no selection")]
fn has_no_selection(world: &ChatWorld, who: String) -> Result<(), eyre::Report> {
    let selected = world.participant(&who)?.controller.selected_ids()?;
    if !selected.is_empty() {
        return Err(eyre::eyre!("{who} still has {} selected", selected.len()));
    }
    Ok(())
}
