//! Gravity, collision response, and collider bookkeeping.

use super::{StepContext, SystemOutput};
use crate::entity::Entity;
use crate::message::{Axis, Message};
use coinrush_core::{Vec3, FRAME_MS};

/// Downward acceleration in velocity units per millisecond of frame time.
pub const GRAVITY: f64 = 0.0001;

/// Damping applied to Y velocity on a fresh collision (bounce/rest).
pub const COLLISION_DAMPING_Y: f64 = 0.5;

/// Damped velocities below this magnitude snap to exactly zero, so resting
/// contacts settle instead of jittering.
pub const COLLISION_SNAP_EPSILON: f64 = 0.001;

/// Gravity participation: a body that opted in.
pub fn affected_by_gravity(entity: &Entity) -> bool {
    entity.body.as_ref().is_some_and(|body| body.use_gravity)
}

/// Debug-outline participation.
pub fn wants_collision_outline(entity: &Entity) -> bool {
    entity
        .collider
        .as_ref()
        .is_some_and(|collider| collider.debug_draw_outline)
}

/// Participation for collision response and collider sync.
pub fn has_collider_and_body(entity: &Entity) -> bool {
    entity.collider.is_some() && entity.body.is_some()
}

/// Subtract gravity from vertical velocity.
///
/// Skipped while a Y-axis collision (fresh or ongoing) references the
/// entity; the collision response stage owns the resting case.
pub fn gravity(entity: &Entity, messages: &[Message], _ctx: &StepContext) -> SystemOutput {
    let Some(body) = &entity.body else {
        return (entity.clone(), Vec::new());
    };

    let resting = messages.iter().any(|message| {
        message.collision_active_axis(&entity.id) == Some(Axis::Y)
            || message.collision_start_axis(&entity.id) == Some(Axis::Y)
    });

    let mut velocity = body.velocity;
    if !resting {
        velocity.y -= GRAVITY * FRAME_MS;
    }

    let mut updated = entity.clone();
    if let Some(body) = updated.body.as_mut() {
        body.velocity = velocity;
    }
    (updated, Vec::new())
}

/// Maintain the cosmetic `debug_active_collision` flag: true iff any
/// collision-start, collision-active, or trigger-active message references
/// this entity. No effect on physics.
pub fn collider_debug_info(
    entity: &Entity,
    messages: &[Message],
    _ctx: &StepContext,
) -> SystemOutput {
    let touched = messages.iter().any(|message| message.touches(&entity.id));

    let mut updated = entity.clone();
    if let Some(collider) = updated.collider.as_mut() {
        collider.debug_active_collision = touched;
    }
    (updated, Vec::new())
}

/// Velocity response on the first frame a collision is reported.
///
/// The axis-of-collision component is damped and negated; the other axes
/// are damped without inversion (Y always by [`COLLISION_DAMPING_Y`]).
/// Damped magnitudes below [`COLLISION_SNAP_EPSILON`] snap to zero.
///
/// Only the first collision-start message in message order is honored when
/// several target the entity in one frame. Simultaneous multi-contact
/// resolution is a known simplification, kept as-is.
pub fn collision_start_response(
    entity: &Entity,
    messages: &[Message],
    _ctx: &StepContext,
) -> SystemOutput {
    let Some(body) = &entity.body else {
        return (entity.clone(), Vec::new());
    };

    let Some(axis_of_collision) = messages
        .iter()
        .find_map(|message| message.collision_start_axis(&entity.id))
    else {
        return (entity.clone(), Vec::new());
    };

    let adjust = |axis: Axis, v: f64, damping: f64| {
        let damped = damping * v;
        let capped = if damped.abs() < COLLISION_SNAP_EPSILON {
            0.0
        } else {
            damped
        };
        if axis == axis_of_collision {
            -capped
        } else {
            capped
        }
    };

    let velocity = Vec3 {
        x: adjust(Axis::X, body.velocity.x, 1.0),
        y: adjust(Axis::Y, body.velocity.y, COLLISION_DAMPING_Y),
        z: adjust(Axis::Z, body.velocity.z, 1.0),
    };

    let mut updated = entity.clone();
    if let Some(body) = updated.body.as_mut() {
        body.velocity = velocity;
    }
    (updated, Vec::new())
}

/// Copy the body's final position into the collider.
///
/// Runs after every stage that moves bodies, so the next frame's collision
/// detection sees this frame's final positions.
pub fn collider_transform_sync(
    entity: &Entity,
    _messages: &[Message],
    _ctx: &StepContext,
) -> SystemOutput {
    let Some(body) = &entity.body else {
        return (entity.clone(), Vec::new());
    };
    let position = body.transform.position;

    let mut updated = entity.clone();
    if let Some(collider) = updated.collider.as_mut() {
        collider.position = position;
    }
    (updated, Vec::new())
}
