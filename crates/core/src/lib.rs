#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod clock;
pub mod math;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use clock::{ManualClock, SimClock, WallClock};
pub use math::{degree_to_radian, Vec3};

/// Fixed frame duration in milliseconds (60 Hz tick).
///
/// All tuning constants in the simulation are authored against this unit;
/// the hosting server calls `step` once per frame of this length.
pub const FRAME_MS: f64 = 16.0;

/// Stable identifier for a simulated entity.
///
/// Ids are string-backed because client ids double as player entity ids:
/// the input layer addresses players by the same id the transport assigned
/// to the connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
