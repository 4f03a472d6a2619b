//! Entity and component model.
//!
//! An entity is a fixed-shape record with one explicit `Option` slot per
//! component. A component's presence is the sole participation signal for
//! systems gated on it: absence is always represented by `None`, never by a
//! zeroed placeholder, so predicate checks stay meaningful.
//!
//! Entities are created at world-seed time and never removed from state;
//! "deletion" is `is_active = false` plus the entity's own component state.

use coinrush_core::{EntityId, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Coarse discriminator used by systems as a participation filter.
///
/// Entities may carry no type at all (e.g. the ground plane participates in
/// collisions purely through its components).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Client-controlled flyer.
    Player,
    /// Floating platform block.
    Cube,
    /// Collectible trigger.
    Coin,
    /// Round countdown timer.
    Timer,
    /// Holder of the current scene.
    SceneManager,
}

/// Mesh shapes known to the renderer. Inert to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeshType {
    /// Unit cube.
    Cube,
    /// Flat ground plane.
    Ground,
    /// Spinning coin disc.
    Coin,
    /// Decorative teapot.
    Teapot,
    /// Player bird model.
    Bird,
}

/// Rendering hint component. Never read by any system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mesh {
    /// Which mesh the renderer should draw.
    pub mesh_type: MeshType,
}

/// Spatial placement of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// Euler rotation in degrees.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Position at the start of the most recent locomotion update, for
    /// collision resolution and client interpolation. Set by locomotion.
    pub last_position: Option<Vec3>,
}

impl Transform {
    /// Transform at `position` with no rotation and unit scale.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(1.0),
            last_position: None,
        }
    }
}

/// Physical body component: velocity plus transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Whether the gravity system accelerates this body downward.
    pub use_gravity: bool,
    /// Velocity in world units per millisecond.
    pub velocity: Vec3,
    /// Placement in the world.
    pub transform: Transform,
}

/// Collision participation component.
///
/// `position` is derived state: a dedicated pipeline stage copies
/// `body.transform.position` into it once per frame, after all movement,
/// so the next frame's collision detection sees final positions. It is
/// never the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Collider center, synchronized from the body each frame.
    pub position: Vec3,
    /// Collider extent per axis.
    pub scale: Vec3,
    /// Triggers report overlap without blocking motion (coin pickup).
    pub is_trigger: bool,
    /// Static colliders never move (cubes, ground).
    pub is_static: bool,
    /// Debug: whether any collision or trigger referenced this entity
    /// this frame. Cosmetic only.
    pub debug_active_collision: bool,
    /// Debug: whether the client should draw the collider outline.
    pub debug_draw_outline: bool,
}

impl Collider {
    /// Solid static collider at `position` with the given extent.
    pub fn fixed(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            is_trigger: false,
            is_static: true,
            debug_active_collision: false,
            debug_draw_outline: false,
        }
    }
}

/// Coin lifecycle component, present only on coin entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinState {
    /// Frames elapsed since the coin was collected.
    pub time_since_deactivation: u32,
}

/// Countdown timer component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Epoch milliseconds of the previous tick; `0` means "not yet ticked".
    pub last_time_ms: i64,
    /// Milliseconds left in the round. May go negative.
    pub time_remaining_ms: i64,
}

/// Scenes the world can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scene {
    /// Waiting for players.
    Lobby,
    /// Round in progress.
    Game,
    /// Round finished.
    GameOver,
}

/// Scene-manager component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneState {
    /// Scene currently in effect.
    pub current_scene: Scene,
}

/// One simulated object: a stable id plus a sparse bag of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique, stable identifier.
    pub id: EntityId,
    /// Inactive entities persist in state but are excluded from collision
    /// detection and most behavior.
    pub is_active: bool,
    /// Coarse type tag, if any.
    pub entity_type: Option<EntityType>,
    /// Rendering hint, if any.
    pub mesh: Option<Mesh>,
    /// Physical body, if any.
    pub body: Option<Body>,
    /// Collision participation, if any.
    pub collider: Option<Collider>,
    /// Score counter; only scoring entities carry this.
    pub score: Option<u64>,
    /// Coin lifecycle state; only coins carry this.
    pub coin: Option<CoinState>,
    /// Countdown timer state; only the timer carries this.
    pub timer: Option<TimerState>,
    /// Scene state; only the scene manager carries this.
    pub scene_manager: Option<SceneState>,
}

impl Entity {
    /// Active entity with the given id and no components.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            is_active: true,
            entity_type: None,
            mesh: None,
            body: None,
            collider: None,
            score: None,
            coin: None,
            timer: None,
            scene_manager: None,
        }
    }

    /// True if the entity carries the given type tag.
    pub fn has_type(&self, entity_type: EntityType) -> bool {
        self.entity_type == Some(entity_type)
    }
}

/// Invariant violations in a caller-supplied state snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Two entities share an id; message routing would be ambiguous.
    #[error("duplicate entity id `{0}`")]
    DuplicateId(EntityId),
}

/// Check that a snapshot satisfies the state invariants (unique ids).
///
/// `step` itself is total over well-formed input and performs no checks;
/// hosts should validate untrusted seeds once, before the frame loop.
pub fn validate_state(state: &[Entity]) -> Result<(), StateError> {
    let mut seen = HashSet::with_capacity(state.len());
    for entity in state {
        if !seen.insert(&entity.id) {
            return Err(StateError::DuplicateId(entity.id.clone()));
        }
    }
    Ok(())
}
