#![warn(missing_docs)]
//! Deterministic per-frame simulation core.
//!
//! The world is a flat collection of entities, each a bag of optional
//! components. Once per fixed-duration frame the hosting server calls
//! [`step`], which seeds a frame-scoped message list from collision
//! detection and client input, then folds an ordered pipeline of pure
//! behavior systems over the state. Each system sees every message
//! produced by earlier stages of the *same* frame, so the stage order in
//! [`systems::PIPELINE`] is a correctness contract shared by all replicas.
//!
//! The core is a pure function from `(state, inputs)` to
//! `(state, messages)`: collision geometry, transport, and rendering live
//! behind collaborator boundaries ([`CollisionDetector`], the returned
//! message log, the inert mesh hints).

pub mod entity;
pub mod message;
pub mod pipeline;
pub mod step;
pub mod systems;

pub use entity::{
    validate_state, Body, Collider, CoinState, Entity, EntityType, Mesh, MeshType, Scene,
    SceneState, StateError, TimerState, Transform,
};
pub use message::{Axis, InputRequest, InputState, Message};
pub use step::{step, CollisionDetector, NoCollisions, Simulation, StepOutput};
