//! Pipeline runner: applies systems to their participants and threads the
//! growing message list through the frame.

use crate::entity::Entity;
use crate::message::Message;
use crate::systems::{StepContext, SystemDescriptor, PIPELINE};
use tracing::trace;

/// Apply one pipeline stage.
///
/// Partitions `state` by the stage's participation predicate, maps the
/// update over each participant paired with the accumulated `messages`,
/// and recombines updated participants with the untouched remainder.
/// Every entity passes through the update at most once. Entity order in
/// the returned state is not semantically meaningful and callers must not
/// depend on it.
///
/// Emitted messages are returned in entity-processing order; the caller
/// appends them to the accumulated list so later stages see them.
pub fn run_system(
    state: Vec<Entity>,
    messages: &[Message],
    system: &SystemDescriptor,
    ctx: &StepContext,
) -> (Vec<Entity>, Vec<Message>) {
    let (participants, rest): (Vec<Entity>, Vec<Entity>) =
        state.into_iter().partition(|e| (system.participates)(e));

    let mut next_state = Vec::with_capacity(participants.len() + rest.len());
    let mut emitted = Vec::new();
    for entity in &participants {
        let (updated, mut messages_out) = (system.update)(entity, messages, ctx);
        next_state.push(updated);
        emitted.append(&mut messages_out);
    }
    next_state.extend(rest);

    (next_state, emitted)
}

/// Run the full ordered pipeline for one frame.
///
/// `seed_messages` (collision detection plus translated input) are visible
/// to every stage; each stage additionally sees whatever earlier stages of
/// this frame emitted. Returns the final state and the complete
/// accumulated message list.
pub fn run_pipeline(
    state: Vec<Entity>,
    seed_messages: Vec<Message>,
    ctx: &StepContext,
) -> (Vec<Entity>, Vec<Message>) {
    let mut state = state;
    let mut messages = seed_messages;

    for system in PIPELINE {
        let (next_state, emitted) = run_system(state, &messages, system, ctx);
        if !emitted.is_empty() {
            trace!(system = ?system.id, emitted = emitted.len(), "stage emitted messages");
        }
        state = next_state;
        messages.extend(emitted);
    }

    (state, messages)
}
