//! Initial-state construction.
//!
//! The field is 80 cubes floating over a flat ground plane, one spinning
//! coin perched on each cube, plus a decorative display entity, the round
//! countdown timer, and the scene manager. Players are not part of the
//! seed; the hosting server adds one via [`make_player`] per connection.

use coinrush_core::{EntityId, Vec3};
use coinrush_sim::{
    Body, Collider, CoinState, Entity, EntityType, Mesh, MeshType, Scene, SceneState, TimerState,
    Transform,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of floating cubes (and therefore coins) in the field.
pub const WORLD_CUBE_COUNT: usize = 80;

/// Round length in milliseconds.
pub const ROUND_LENGTH_MS: i64 = 120_000;

/// Cube edge length.
const CUBE_SCALE: f64 = 5.0;

/// Coin collider/mesh extent.
const COIN_SCALE: f64 = 2.0;

/// Half the ground plane's extent along X and Z.
const GROUND_EXTENT: f64 = 200.0;

/// Build the starting snapshot for a round.
///
/// Placement is drawn from a `StdRng` seeded with `world_seed`, so two
/// calls with the same seed produce identical states.
pub fn initial_state(world_seed: u64) -> Vec<Entity> {
    let mut rng = StdRng::seed_from_u64(world_seed);

    let mut entities = Vec::with_capacity(WORLD_CUBE_COUNT * 2 + 4);
    let mut coins = Vec::with_capacity(WORLD_CUBE_COUNT);

    for index in 0..WORLD_CUBE_COUNT {
        let position = Vec3 {
            x: rng.gen_range(-180.0..180.0),
            y: rng.gen_range(5.0..200.0),
            z: rng.gen_range(-100.0..180.0),
        };
        entities.push(make_cube(index, position));
        coins.push(make_coin(index, position));
    }
    entities.append(&mut coins);

    entities.push(make_ground());
    entities.push(make_dummy());
    entities.push(make_timer());
    entities.push(make_scene_manager());

    entities
}

/// Build a controllable player entity for a connected client.
///
/// The entity id equals the client id, which is how input messages find
/// their player.
pub fn make_player(client_id: impl Into<EntityId>) -> Entity {
    let spawn = Vec3::new(0.0, 20.0, 0.0);

    let mut entity = Entity::new(client_id);
    entity.entity_type = Some(EntityType::Player);
    entity.mesh = Some(Mesh {
        mesh_type: MeshType::Bird,
    });
    entity.body = Some(Body {
        use_gravity: true,
        velocity: Vec3::ZERO,
        transform: Transform::at(spawn),
    });
    entity.collider = Some(Collider {
        position: spawn,
        scale: Vec3::splat(1.0),
        is_trigger: false,
        is_static: false,
        debug_active_collision: false,
        debug_draw_outline: false,
    });
    entity.score = Some(0);
    entity
}

fn make_cube(index: usize, position: Vec3) -> Entity {
    let mut entity = Entity::new(format!("cube-{index}"));
    entity.entity_type = Some(EntityType::Cube);
    entity.mesh = Some(Mesh {
        mesh_type: MeshType::Cube,
    });
    entity.body = Some(Body {
        use_gravity: false,
        velocity: Vec3::ZERO,
        transform: Transform {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(CUBE_SCALE),
            last_position: None,
        },
    });
    entity.collider = Some(Collider::fixed(position, Vec3::splat(CUBE_SCALE)));
    entity
}

/// A coin hovers just above the top face of its cube.
fn make_coin(index: usize, cube_position: Vec3) -> Entity {
    let position = Vec3 {
        y: cube_position.y + CUBE_SCALE / 2.0 + COIN_SCALE,
        ..cube_position
    };

    let mut entity = Entity::new(format!("coin-{index}"));
    entity.entity_type = Some(EntityType::Coin);
    entity.mesh = Some(Mesh {
        mesh_type: MeshType::Coin,
    });
    entity.body = Some(Body {
        use_gravity: false,
        velocity: Vec3::ZERO,
        transform: Transform {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(COIN_SCALE),
            last_position: None,
        },
    });
    let mut collider = Collider::fixed(position, Vec3::splat(COIN_SCALE));
    collider.is_trigger = true;
    entity.collider = Some(collider);
    entity.coin = Some(CoinState::default());
    entity
}

fn make_ground() -> Entity {
    let scale = Vec3::new(GROUND_EXTENT, 0.0, GROUND_EXTENT);

    let mut entity = Entity::new("ground");
    entity.mesh = Some(Mesh {
        mesh_type: MeshType::Ground,
    });
    entity.body = Some(Body {
        use_gravity: false,
        velocity: Vec3::ZERO,
        transform: Transform {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale,
            last_position: None,
        },
    });
    entity.collider = Some(Collider::fixed(Vec3::ZERO, scale));
    entity
}

/// Decorative centerpiece; no collider, no type, never simulated.
fn make_dummy() -> Entity {
    let mut entity = Entity::new("dummy");
    entity.mesh = Some(Mesh {
        mesh_type: MeshType::Teapot,
    });
    entity.body = Some(Body {
        use_gravity: false,
        velocity: Vec3::ZERO,
        transform: Transform {
            position: Vec3::new(0.0, 10.0, -30.0),
            rotation: Vec3::ZERO,
            scale: Vec3::splat(10.0),
            last_position: None,
        },
    });
    entity
}

fn make_timer() -> Entity {
    let mut entity = Entity::new("timer");
    entity.entity_type = Some(EntityType::Timer);
    entity.timer = Some(TimerState {
        last_time_ms: 0,
        time_remaining_ms: ROUND_LENGTH_MS,
    });
    entity
}

fn make_scene_manager() -> Entity {
    let mut entity = Entity::new("scene-manager");
    entity.entity_type = Some(EntityType::SceneManager);
    entity.scene_manager = Some(SceneState {
        current_scene: Scene::Lobby,
    });
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinrush_sim::validate_state;

    #[test]
    fn seed_produces_valid_state() {
        let state = initial_state(42);
        assert_eq!(validate_state(&state), Ok(()));
        // 80 cubes + 80 coins + ground, dummy, timer, scene manager.
        assert_eq!(state.len(), WORLD_CUBE_COUNT * 2 + 4);
    }

    #[test]
    fn same_seed_reproduces_identical_content() {
        let a = serde_json::to_string(&initial_state(7)).unwrap();
        let b = serde_json::to_string(&initial_state(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_scatter_cubes_differently() {
        let a = serde_json::to_string(&initial_state(1)).unwrap();
        let b = serde_json::to_string(&initial_state(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn coins_sit_above_their_cubes_as_triggers() {
        let state = initial_state(42);

        for index in 0..WORLD_CUBE_COUNT {
            let cube = state
                .iter()
                .find(|e| e.id == EntityId::new(format!("cube-{index}")))
                .unwrap();
            let coin = state
                .iter()
                .find(|e| e.id == EntityId::new(format!("coin-{index}")))
                .unwrap();

            let cube_position = cube.body.as_ref().unwrap().transform.position;
            let coin_position = coin.body.as_ref().unwrap().transform.position;
            assert!(coin_position.y > cube_position.y);
            assert_eq!(coin_position.x, cube_position.x);

            let collider = coin.collider.as_ref().unwrap();
            assert!(collider.is_trigger);
            assert!(coin.coin.is_some());
        }
    }

    #[test]
    fn cubes_are_static_solids_within_bounds() {
        let state = initial_state(9);

        for entity in state.iter().filter(|e| e.has_type(EntityType::Cube)) {
            let collider = entity.collider.as_ref().unwrap();
            assert!(collider.is_static);
            assert!(!collider.is_trigger);

            let position = entity.body.as_ref().unwrap().transform.position;
            assert!((-180.0..180.0).contains(&position.x));
            assert!((5.0..200.0).contains(&position.y));
            assert!((-100.0..180.0).contains(&position.z));
        }
    }

    #[test]
    fn player_factory_uses_the_client_id() {
        let player = make_player("client-abc");
        assert_eq!(player.id, EntityId::new("client-abc"));
        assert_eq!(player.score, Some(0));
        assert!(player.body.as_ref().unwrap().use_gravity);
        assert!(!player.collider.as_ref().unwrap().is_static);
    }

    #[test]
    fn timer_and_scene_manager_start_fresh() {
        let state = initial_state(3);

        let timer = state
            .iter()
            .find(|e| e.has_type(EntityType::Timer))
            .unwrap();
        assert_eq!(
            timer.timer,
            Some(TimerState {
                last_time_ms: 0,
                time_remaining_ms: ROUND_LENGTH_MS,
            })
        );

        let manager = state
            .iter()
            .find(|e| e.has_type(EntityType::SceneManager))
            .unwrap();
        assert_eq!(
            manager.scene_manager,
            Some(SceneState {
                current_scene: Scene::Lobby,
            })
        );
    }
}
