//! Behavior systems and their fixed execution order.
//!
//! Each system is a pure function `(entity, messages, ctx) -> (entity,
//! emitted)`. It never mutates its input, returns a complete replacement
//! entity, and only reads components its participation predicate
//! guarantees (missing components are treated as non-participation, never
//! as a fault).
//!
//! [`PIPELINE`] fixes the stage order at compile time. The order is a
//! correctness contract: later stages observe messages emitted by earlier
//! stages of the same frame, and the collider sync stage must run after
//! every stage that moves bodies.

pub mod coin;
pub mod physics;
pub mod player;
pub mod scene;

use crate::entity::Entity;
use crate::message::Message;

/// Replacement entity plus messages emitted for later stages.
pub type SystemOutput = (Entity, Vec<Message>);

/// Participation predicate for one stage.
pub type ParticipationFn = fn(&Entity) -> bool;

/// Pure update applied to each participating entity.
pub type UpdateFn = fn(&Entity, &[Message], &StepContext) -> SystemOutput;

/// Per-frame context threaded to every system.
///
/// The clock is sampled once at the top of `step`, so every system in a
/// frame observes the same instant.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Frame timestamp in epoch milliseconds.
    pub now_ms: i64,
}

/// Identifies one stage of the frame pipeline, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemId {
    /// Downward acceleration on gravity-enabled bodies.
    Gravity,
    /// Cosmetic collider debug flag maintenance.
    ColliderDebugInfo,
    /// Velocity response on fresh collisions.
    CollisionStartResponse,
    /// Input-driven player movement.
    Locomotion,
    /// Trigger-based scoring.
    ScoreUpdate,
    /// Cosmetic coin spin.
    CoinRotation,
    /// Coin collection.
    CoinDeactivation,
    /// Coin respawn after the delay.
    CoinReactivation,
    /// Copy final body positions into colliders.
    ColliderTransformSync,
    /// Round countdown.
    TimerTick,
    /// Scene transitions.
    SceneManager,
}

/// One stage of the pipeline: who participates and what happens to them.
#[derive(Debug)]
pub struct SystemDescriptor {
    /// Stage identifier.
    pub id: SystemId,
    /// Which entities participate in this stage.
    pub participates: ParticipationFn,
    /// Pure update applied to each participant.
    pub update: UpdateFn,
}

/// The frame pipeline, in execution order.
pub const PIPELINE: &[SystemDescriptor] = &[
    SystemDescriptor {
        id: SystemId::Gravity,
        participates: physics::affected_by_gravity,
        update: physics::gravity,
    },
    SystemDescriptor {
        id: SystemId::ColliderDebugInfo,
        participates: physics::wants_collision_outline,
        update: physics::collider_debug_info,
    },
    SystemDescriptor {
        id: SystemId::CollisionStartResponse,
        participates: physics::has_collider_and_body,
        update: physics::collision_start_response,
    },
    SystemDescriptor {
        id: SystemId::Locomotion,
        participates: player::is_player,
        update: player::locomotion,
    },
    SystemDescriptor {
        id: SystemId::ScoreUpdate,
        participates: player::has_score,
        update: player::score_update,
    },
    SystemDescriptor {
        id: SystemId::CoinRotation,
        participates: coin::is_coin,
        update: coin::rotation,
    },
    SystemDescriptor {
        id: SystemId::CoinDeactivation,
        participates: coin::is_coin,
        update: coin::deactivation,
    },
    SystemDescriptor {
        id: SystemId::CoinReactivation,
        participates: coin::is_coin,
        update: coin::reactivation,
    },
    SystemDescriptor {
        id: SystemId::ColliderTransformSync,
        participates: physics::has_collider_and_body,
        update: physics::collider_transform_sync,
    },
    SystemDescriptor {
        id: SystemId::TimerTick,
        participates: scene::is_timer,
        update: scene::timer_tick,
    },
    SystemDescriptor {
        id: SystemId::SceneManager,
        participates: scene::is_scene_manager,
        update: scene::scene_manager,
    },
];
