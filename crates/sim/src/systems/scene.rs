//! Round countdown and scene transitions.

use super::{StepContext, SystemOutput};
use crate::entity::{Entity, EntityType, Scene, SceneState, TimerState};
use crate::message::Message;

/// Timer participation.
pub fn is_timer(entity: &Entity) -> bool {
    entity.has_type(EntityType::Timer)
}

/// Scene-manager participation.
pub fn is_scene_manager(entity: &Entity) -> bool {
    entity.has_type(EntityType::SceneManager)
}

/// Count the round down by the wall-clock time elapsed since the last tick.
///
/// The first tick adopts the frame timestamp as `last_time_ms` instead of
/// diffing against the epoch. Once remaining time is negative, a
/// `GAME_OVER` scene transition is emitted — every frame, not only on the
/// crossing one.
///
/// This is the one stage with a real-time dependency; the timestamp comes
/// from the clock injected into `step`, so replicas needing strict replay
/// drive it with a shared or simulated clock.
pub fn timer_tick(entity: &Entity, _messages: &[Message], ctx: &StepContext) -> SystemOutput {
    let Some(timer) = &entity.timer else {
        return (entity.clone(), Vec::new());
    };

    let now_ms = ctx.now_ms;
    let last_time_ms = if timer.last_time_ms == 0 {
        now_ms
    } else {
        timer.last_time_ms
    };
    let time_remaining_ms = timer.time_remaining_ms - (now_ms - last_time_ms);

    let mut updated = entity.clone();
    updated.timer = Some(TimerState {
        last_time_ms: now_ms,
        time_remaining_ms,
    });

    let emitted = if time_remaining_ms < 0 {
        vec![Message::SceneTransition {
            scene: Scene::GameOver,
        }]
    } else {
        Vec::new()
    };
    (updated, emitted)
}

/// Adopt the scene named by this frame's first transition message, if any.
pub fn scene_manager(entity: &Entity, messages: &[Message], _ctx: &StepContext) -> SystemOutput {
    let transition = messages.iter().find_map(|message| match message {
        Message::SceneTransition { scene } => Some(*scene),
        _ => None,
    });

    let mut updated = entity.clone();
    if let Some(scene) = transition {
        updated.scene_manager = Some(SceneState {
            current_scene: scene,
        });
    }
    (updated, Vec::new())
}
