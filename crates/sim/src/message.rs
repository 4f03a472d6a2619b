//! Frame-scoped message protocol.
//!
//! Messages are immutable event records produced within a frame and
//! discarded at its end. A message emitted by one pipeline stage is visible
//! to every stage that runs *after* it in the same frame; this same-frame
//! visibility is load-bearing (e.g. the timer's scene transition must reach
//! the scene manager two stages later).
//!
//! A message may name an entity id that is absent from the current state;
//! consumers ignore such references rather than fault.

use crate::entity::Scene;
use coinrush_core::EntityId;
use serde::{Deserialize, Serialize};

/// World axis along which a collision was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis (vertical).
    Y,
    /// Z axis.
    Z,
}

/// Button state reported by one client for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Thrust forward along the current heading.
    pub forward: bool,
    /// Thrust backward.
    pub back: bool,
    /// Turn left.
    pub left: bool,
    /// Turn right.
    pub right: bool,
    /// Instantaneous upward impulse.
    pub flap: bool,
}

/// One client's input for the coming frame, as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRequest {
    /// Connection id; equals the player entity's id.
    pub client_id: EntityId,
    /// Buttons held this frame.
    pub input: InputState,
}

/// Event that occurred during the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subject", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Input arrived from a client.
    Input {
        /// Client that sent the input; matched against player entity ids.
        client_id: EntityId,
        /// Buttons held.
        input: InputState,
    },
    /// Two colliders began overlapping this frame.
    CollisionStart {
        /// The pair involved.
        entity_ids: [EntityId; 2],
        /// Axis the contact was resolved along.
        axis_of_collision: Axis,
    },
    /// An overlap that began on an earlier frame is still in effect.
    CollisionActive {
        /// The pair involved.
        entity_ids: [EntityId; 2],
        /// Axis the contact was resolved along.
        axis_of_collision: Axis,
    },
    /// A previously reported overlap ended.
    CollisionEnd {
        /// The pair that separated.
        entity_ids: [EntityId; 2],
    },
    /// Something overlapped a trigger collider.
    TriggerActive {
        /// Entity that touched the trigger (e.g. the player).
        entity_id: EntityId,
        /// The trigger that was touched (e.g. a coin).
        trigger_id: EntityId,
    },
    /// A scene change was requested.
    SceneTransition {
        /// Scene to switch to.
        scene: Scene,
    },
}

impl Message {
    /// Axis of a [`Message::CollisionStart`] naming `id`, if this is one.
    pub fn collision_start_axis(&self, id: &EntityId) -> Option<Axis> {
        match self {
            Message::CollisionStart {
                entity_ids,
                axis_of_collision,
            } if entity_ids.contains(id) => Some(*axis_of_collision),
            _ => None,
        }
    }

    /// Axis of a [`Message::CollisionActive`] naming `id`, if this is one.
    pub fn collision_active_axis(&self, id: &EntityId) -> Option<Axis> {
        match self {
            Message::CollisionActive {
                entity_ids,
                axis_of_collision,
            } if entity_ids.contains(id) => Some(*axis_of_collision),
            _ => None,
        }
    }

    /// True if this is a collision or trigger message referencing `id`.
    pub fn touches(&self, id: &EntityId) -> bool {
        match self {
            Message::CollisionStart { entity_ids, .. }
            | Message::CollisionActive { entity_ids, .. } => entity_ids.contains(id),
            Message::TriggerActive {
                entity_id,
                trigger_id,
            } => entity_id == id || trigger_id == id,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> [EntityId; 2] {
        [a.into(), b.into()]
    }

    #[test]
    fn collision_start_axis_matches_either_participant() {
        let message = Message::CollisionStart {
            entity_ids: pair("player-1", "cube-3"),
            axis_of_collision: Axis::Y,
        };

        assert_eq!(message.collision_start_axis(&"player-1".into()), Some(Axis::Y));
        assert_eq!(message.collision_start_axis(&"cube-3".into()), Some(Axis::Y));
        assert_eq!(message.collision_start_axis(&"cube-4".into()), None);
    }

    #[test]
    fn collision_start_axis_ignores_other_subjects() {
        let message = Message::CollisionActive {
            entity_ids: pair("player-1", "cube-3"),
            axis_of_collision: Axis::X,
        };

        assert_eq!(message.collision_start_axis(&"player-1".into()), None);
        assert_eq!(message.collision_active_axis(&"player-1".into()), Some(Axis::X));
    }

    #[test]
    fn touches_covers_trigger_both_ways() {
        let message = Message::TriggerActive {
            entity_id: "player-1".into(),
            trigger_id: "coin-7".into(),
        };

        assert!(message.touches(&"player-1".into()));
        assert!(message.touches(&"coin-7".into()));
        assert!(!message.touches(&"cube-0".into()));
    }

    #[test]
    fn touches_excludes_input_and_transition() {
        let input = Message::Input {
            client_id: "player-1".into(),
            input: InputState::default(),
        };
        assert!(!input.touches(&"player-1".into()));

        let transition = Message::SceneTransition {
            scene: Scene::GameOver,
        };
        assert!(!transition.touches(&"player-1".into()));
    }

    #[test]
    fn messages_tag_with_subject_field() {
        let message = Message::CollisionEnd {
            entity_ids: pair("a", "b"),
        };
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["subject"], "COLLISION_END");
        assert_eq!(json["entity_ids"][0], "a");
    }
}
