//! Small math helpers for the simulation state.
//!
//! Positions, velocities, Euler rotations (degrees), and scales all share
//! one float-triple shape. Everything here must serialize, since snapshots
//! are replicated to clients every frame.

use serde::{Deserialize, Serialize};

/// Float triple used for position, velocity, rotation (Euler degrees), and scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component (vertical).
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a vector from components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components set to `v`.
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
}

/// Convert degrees to radians.
pub fn degree_to_radian(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
