//! Frame entry point and external collaborator boundaries.

use crate::entity::Entity;
use crate::message::{InputRequest, Message};
use crate::pipeline::run_pipeline;
use crate::systems::StepContext;
use coinrush_core::SimClock;
use serde::Serialize;
use tracing::debug;

/// Collision/trigger detection boundary.
///
/// `step` hands the detector the active, collidable subset of the state;
/// the detector returns this frame's collision and trigger messages. The
/// contract: pure with respect to its input subset, deterministic for
/// identical geometric input, and only `COLLISION_START`,
/// `COLLISION_ACTIVE`, `COLLISION_END`, and `TRIGGER_ACTIVE` messages,
/// each referencing ids from the input subset.
pub trait CollisionDetector {
    /// Produce collision/trigger messages for the given entities.
    fn detect(&self, entities: &[&Entity]) -> Vec<Message>;
}

/// Detector that never reports anything. Useful for lobby scenes and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollisions;

impl CollisionDetector for NoCollisions {
    fn detect(&self, _entities: &[&Entity]) -> Vec<Message> {
        Vec::new()
    }
}

/// Result of one frame advance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutput {
    /// Complete replacement state.
    pub state: Vec<Entity>,
    /// Every message visible during the frame, in accumulation order —
    /// ready for an event log or network broadcast.
    pub messages: Vec<Message>,
}

/// Advance the world by one fixed-duration frame.
///
/// Seeds the frame's message list with collision detection over the
/// active, collidable entities followed by one `INPUT` message per input
/// request, then folds the ordered system pipeline over the state. Pure
/// given `(state, input_requests, detector output, clock reading)`; the
/// clock is sampled exactly once, here.
///
/// Callers own the state across frames and are responsible for
/// serializing calls — one `step` fully completes before the next begins.
pub fn step(
    state: Vec<Entity>,
    input_requests: &[InputRequest],
    detector: &dyn CollisionDetector,
    clock: &dyn SimClock,
) -> StepOutput {
    let collidable: Vec<&Entity> = state
        .iter()
        .filter(|entity| entity.collider.is_some() && entity.is_active)
        .collect();
    let mut messages = detector.detect(&collidable);

    messages.extend(input_requests.iter().map(|request| Message::Input {
        client_id: request.client_id.clone(),
        input: request.input,
    }));

    let ctx = StepContext {
        now_ms: clock.now_ms(),
    };
    debug!(
        entities = state.len(),
        seeded_messages = messages.len(),
        "stepping frame"
    );

    let (state, messages) = run_pipeline(state, messages, &ctx);
    StepOutput { state, messages }
}

/// Bundles the external collaborators so a hosting server can drive the
/// caller-owned state with one call per tick.
#[derive(Debug)]
pub struct Simulation<D, C> {
    detector: D,
    clock: C,
}

impl<D: CollisionDetector, C: SimClock> Simulation<D, C> {
    /// Build a simulation around a detector and a clock.
    pub fn new(detector: D, clock: C) -> Self {
        Self { detector, clock }
    }

    /// Advance the given state by one frame. See [`step`].
    pub fn step(&self, state: Vec<Entity>, input_requests: &[InputRequest]) -> StepOutput {
        step(state, input_requests, &self.detector, &self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Collider;
    use coinrush_core::{EntityId, ManualClock, Vec3};
    use std::cell::RefCell;

    /// Records which entity ids the detector was shown.
    struct SpyDetector {
        seen: RefCell<Vec<Vec<EntityId>>>,
    }

    impl SpyDetector {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl CollisionDetector for SpyDetector {
        fn detect(&self, entities: &[&Entity]) -> Vec<Message> {
            self.seen
                .borrow_mut()
                .push(entities.iter().map(|e| e.id.clone()).collect());
            Vec::new()
        }
    }

    #[test]
    fn detector_sees_only_active_collidable_entities() {
        let mut with_collider = Entity::new("cube-0");
        with_collider.collider = Some(Collider::fixed(Vec3::ZERO, Vec3::splat(5.0)));

        let mut inactive = Entity::new("coin-0");
        inactive.collider = Some(Collider::fixed(Vec3::ZERO, Vec3::splat(2.0)));
        inactive.is_active = false;

        let no_collider = Entity::new("scene-manager");

        let detector = SpyDetector::new();
        let clock = ManualClock::new(0);
        step(
            vec![with_collider, inactive, no_collider],
            &[],
            &detector,
            &clock,
        );

        let seen = detector.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![EntityId::new("cube-0")]);
    }

    #[test]
    fn input_requests_become_input_messages() {
        let detector = NoCollisions;
        let clock = ManualClock::new(0);
        let request = InputRequest {
            client_id: "player-1".into(),
            input: crate::message::InputState {
                flap: true,
                ..Default::default()
            },
        };

        let output = step(Vec::new(), &[request.clone()], &detector, &clock);
        assert_eq!(
            output.messages,
            vec![Message::Input {
                client_id: request.client_id,
                input: request.input,
            }]
        );
    }

    #[test]
    fn empty_step_is_a_fixed_point_for_empty_state() {
        let output = step(Vec::new(), &[], &NoCollisions, &ManualClock::new(0));
        assert!(output.state.is_empty());
        assert!(output.messages.is_empty());
    }
}
