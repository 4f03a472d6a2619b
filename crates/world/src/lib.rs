#![warn(missing_docs)]
//! Shipped world content: the seeded initial state.
//!
//! Randomness is confined to seed time. Given the same world seed the
//! content is bit-identical, so every replica can rebuild the starting
//! snapshot locally; nothing here may run inside the frame loop.

mod seed;

pub use seed::{initial_state, make_player, ROUND_LENGTH_MS, WORLD_CUBE_COUNT};
