//! Coin lifecycle: spin, collection, respawn.

use super::{StepContext, SystemOutput};
use crate::entity::{CoinState, Entity, EntityType};
use crate::message::Message;

/// Yaw degrees a coin spins every frame, collected or not.
pub const SPIN_DEGREES_PER_FRAME: f64 = 0.5;

/// Frames a collected coin must wait before respawning. The comparison is
/// strictly greater-than: a coin reactivates on the frame where its counter
/// has already reached `RESPAWN_DELAY_TICKS + 1`.
pub const RESPAWN_DELAY_TICKS: u32 = 625;

/// Participation for all three coin stages.
pub fn is_coin(entity: &Entity) -> bool {
    entity.has_type(EntityType::Coin)
}

/// Cosmetic spin, applied whether or not the coin is active.
pub fn rotation(entity: &Entity, _messages: &[Message], _ctx: &StepContext) -> SystemOutput {
    let mut updated = entity.clone();
    if let Some(body) = updated.body.as_mut() {
        body.transform.rotation.y += SPIN_DEGREES_PER_FRAME;
    }
    (updated, Vec::new())
}

/// Collect the coin when something touched it this frame.
///
/// A trigger-active message naming this coin as the *trigger* deactivates
/// it and resets the respawn counter.
pub fn deactivation(entity: &Entity, messages: &[Message], _ctx: &StepContext) -> SystemOutput {
    let collected = messages.iter().any(|message| {
        matches!(message, Message::TriggerActive { trigger_id, .. } if *trigger_id == entity.id)
    });

    let mut updated = entity.clone();
    if collected {
        updated.is_active = false;
        updated.coin = Some(CoinState {
            time_since_deactivation: 0,
        });
    }
    (updated, Vec::new())
}

/// Respawn a collected coin once the delay has elapsed.
///
/// Active coins pass through untouched, as does a coin collected earlier
/// in this same frame (its counter starts running next frame, so the
/// pickup frame returns it at exactly zero). An inactive coin's counter is
/// checked before it is incremented; on reactivation the counter is left
/// as-is.
pub fn reactivation(entity: &Entity, messages: &[Message], _ctx: &StepContext) -> SystemOutput {
    if entity.is_active {
        return (entity.clone(), Vec::new());
    }
    let collected_this_frame = messages.iter().any(|message| {
        matches!(message, Message::TriggerActive { trigger_id, .. } if *trigger_id == entity.id)
    });
    if collected_this_frame {
        return (entity.clone(), Vec::new());
    }
    let Some(coin) = &entity.coin else {
        return (entity.clone(), Vec::new());
    };

    let mut updated = entity.clone();
    if coin.time_since_deactivation > RESPAWN_DELAY_TICKS {
        updated.is_active = true;
    } else if let Some(coin) = updated.coin.as_mut() {
        coin.time_since_deactivation += 1;
    }
    (updated, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Body, Transform};
    use coinrush_core::Vec3;

    fn ctx() -> StepContext {
        StepContext { now_ms: 0 }
    }

    fn coin(id: &str) -> Entity {
        let mut entity = Entity::new(id);
        entity.entity_type = Some(EntityType::Coin);
        entity.body = Some(Body {
            use_gravity: false,
            velocity: Vec3::ZERO,
            transform: Transform::at(Vec3::new(10.0, 12.5, 10.0)),
        });
        entity.coin = Some(CoinState::default());
        entity
    }

    fn touch(coin_id: &str) -> Message {
        Message::TriggerActive {
            entity_id: "p".into(),
            trigger_id: coin_id.into(),
        }
    }

    #[test]
    fn coins_spin_every_frame() {
        let mut entity = coin("coin-0");
        entity.is_active = false; // spin is independent of activity

        let (updated, _) = rotation(&entity, &[], &ctx());
        let (updated, _) = rotation(&updated, &[], &ctx());
        assert_eq!(
            updated.body.unwrap().transform.rotation.y,
            2.0 * SPIN_DEGREES_PER_FRAME
        );
    }

    #[test]
    fn touched_coin_deactivates_and_resets_counter() {
        let mut entity = coin("coin-0");
        entity.coin = Some(CoinState {
            time_since_deactivation: 400,
        });

        let (updated, _) = deactivation(&entity, &[touch("coin-0")], &ctx());
        assert!(!updated.is_active);
        assert_eq!(updated.coin.unwrap().time_since_deactivation, 0);
    }

    #[test]
    fn untouched_coin_stays_active() {
        let entity = coin("coin-0");
        let (updated, _) = deactivation(&entity, &[touch("coin-1")], &ctx());
        assert_eq!(updated, entity);
    }

    #[test]
    fn deactivation_ignores_messages_where_coin_is_the_toucher() {
        let entity = coin("coin-0");
        let message = Message::TriggerActive {
            entity_id: "coin-0".into(),
            trigger_id: "coin-9".into(),
        };
        let (updated, _) = deactivation(&entity, &[message], &ctx());
        assert!(updated.is_active);
    }

    #[test]
    fn inactive_coin_counts_up_each_frame() {
        let mut entity = coin("coin-0");
        entity.is_active = false;

        let (updated, _) = reactivation(&entity, &[], &ctx());
        let (updated, _) = reactivation(&updated, &[], &ctx());
        assert!(!updated.is_active);
        assert_eq!(updated.coin.unwrap().time_since_deactivation, 2);
    }

    #[test]
    fn coin_at_delay_boundary_stays_inactive() {
        let mut entity = coin("coin-0");
        entity.is_active = false;
        entity.coin = Some(CoinState {
            time_since_deactivation: RESPAWN_DELAY_TICKS,
        });

        let (updated, _) = reactivation(&entity, &[], &ctx());
        assert!(!updated.is_active);
        assert_eq!(
            updated.coin.unwrap().time_since_deactivation,
            RESPAWN_DELAY_TICKS + 1
        );
    }

    #[test]
    fn coin_past_delay_boundary_reactivates_with_counter_as_is() {
        let mut entity = coin("coin-0");
        entity.is_active = false;
        entity.coin = Some(CoinState {
            time_since_deactivation: RESPAWN_DELAY_TICKS + 1,
        });

        let (updated, _) = reactivation(&entity, &[], &ctx());
        assert!(updated.is_active);
        assert_eq!(
            updated.coin.unwrap().time_since_deactivation,
            RESPAWN_DELAY_TICKS + 1
        );
    }

    #[test]
    fn freshly_collected_coin_waits_until_next_frame() {
        let mut entity = coin("coin-0");
        entity.is_active = false;
        entity.coin = Some(CoinState {
            time_since_deactivation: 0,
        });

        // The pickup message is still in the frame's message list.
        let (updated, _) = reactivation(&entity, &[touch("coin-0")], &ctx());
        assert!(!updated.is_active);
        assert_eq!(updated.coin.unwrap().time_since_deactivation, 0);
    }

    #[test]
    fn active_coin_is_untouched_by_reactivation() {
        let mut entity = coin("coin-0");
        entity.coin = Some(CoinState {
            time_since_deactivation: 99,
        });

        let (updated, _) = reactivation(&entity, &[], &ctx());
        assert_eq!(updated, entity);
    }
}
