//! Input-driven locomotion and trigger-based scoring.

use super::{StepContext, SystemOutput};
use crate::entity::{Entity, EntityType};
use crate::message::{Axis, InputState, Message};
use coinrush_core::{degree_to_radian, Vec3, FRAME_MS};

/// Thrust added to velocity per millisecond while forward/back is held.
pub const THRUST: f64 = 0.001;

/// Instantaneous upward velocity added by one flap.
pub const FLAP_IMPULSE: f64 = 0.06;

/// Per-frame exponential decay applied to horizontal velocity.
pub const HORIZONTAL_DECAY: f64 = 0.99;

/// Horizontal velocities below this magnitude decay to exactly zero.
pub const DECAY_EPSILON: f64 = 1e-5;

/// Yaw change in degrees per frame while left/right is held.
pub const TURN_RATE_DEGREES: f64 = 1.0;

/// Locomotion participation.
pub fn is_player(entity: &Entity) -> bool {
    entity.has_type(EntityType::Player)
}

/// Scoring participation: presence of the component is the signal.
pub fn has_score(entity: &Entity) -> bool {
    entity.score.is_some()
}

/// Move a player according to its client's input.
///
/// Less a "player movement" system than a "controllable" one: the entity
/// participates because an `INPUT` message addressed to its id exists this
/// frame. Without one the entity is returned untouched.
///
/// Thrust is applied along the heading derived from the current yaw; a
/// horizontal axis with an ongoing collision holds last frame's velocity
/// (resting against a surface) instead of taking thrust and decay. The
/// pre-update position is snapshotted into `last_position` before
/// integration.
pub fn locomotion(entity: &Entity, messages: &[Message], _ctx: &StepContext) -> SystemOutput {
    let Some(body) = &entity.body else {
        return (entity.clone(), Vec::new());
    };

    let Some(input) = input_for(&entity.id, messages) else {
        return (entity.clone(), Vec::new());
    };

    let last_position = body.transform.position;

    let collision_x = messages
        .iter()
        .any(|m| m.collision_active_axis(&entity.id) == Some(Axis::X));
    let collision_z = messages
        .iter()
        .any(|m| m.collision_active_axis(&entity.id) == Some(Axis::Z));

    let direction = if input.forward { 1.0 } else { -1.0 };
    let thrust = if input.forward || input.back { 1.0 } else { 0.0 };
    let heading = body.transform.rotation.y;

    let vz = body.velocity.z + thrust * direction * THRUST * degree_to_radian(heading - 90.0).sin();
    let vx = body.velocity.x + thrust * direction * THRUST * degree_to_radian(heading + 90.0).cos();
    let vy = if input.flap {
        body.velocity.y + FLAP_IMPULSE
    } else {
        body.velocity.y
    };

    let decay = |v: f64| {
        if v.abs() < DECAY_EPSILON {
            0.0
        } else {
            v * HORIZONTAL_DECAY
        }
    };

    let velocity = Vec3 {
        x: if collision_x { body.velocity.x } else { decay(vx) },
        y: vy,
        z: if collision_z { body.velocity.z } else { decay(vz) },
    };

    let position = Vec3 {
        x: body.transform.position.x + velocity.x * FRAME_MS,
        y: body.transform.position.y + velocity.y * FRAME_MS,
        z: body.transform.position.z + velocity.z * FRAME_MS,
    };

    let turn = if input.left {
        TURN_RATE_DEGREES
    } else if input.right {
        -TURN_RATE_DEGREES
    } else {
        0.0
    };
    let rotation = Vec3 {
        y: body.transform.rotation.y + turn,
        ..body.transform.rotation
    };

    let mut updated = entity.clone();
    if let Some(body) = updated.body.as_mut() {
        body.velocity = velocity;
        body.transform.position = position;
        body.transform.rotation = rotation;
        body.transform.last_position = Some(last_position);
    }
    (updated, Vec::new())
}

/// Add one point when any trigger-active message names this entity as the
/// toucher. At most one point per frame, however many triggers fired.
pub fn score_update(entity: &Entity, messages: &[Message], _ctx: &StepContext) -> SystemOutput {
    let touched_trigger = messages.iter().any(|message| {
        matches!(message, Message::TriggerActive { entity_id, .. } if *entity_id == entity.id)
    });

    let mut updated = entity.clone();
    if touched_trigger {
        if let Some(score) = updated.score.as_mut() {
            *score += 1;
        }
    }
    (updated, Vec::new())
}

fn input_for(id: &coinrush_core::EntityId, messages: &[Message]) -> Option<InputState> {
    messages.iter().find_map(|message| match message {
        Message::Input { client_id, input } if client_id == id => Some(*input),
        _ => None,
    })
}
