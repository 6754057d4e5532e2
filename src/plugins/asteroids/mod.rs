//! Asteroids plugin: pooled rocks, timed waves and recursive splitting.
//!
//! ```text
//!   Update:          spawner tick ── plan_wave ──┐
//!                                                ├─▶ launch_asteroid ─▶ AsteroidPool.acquire
//!   FixedPostUpdate: CollisionStart(bullet) ─ plan_split ─┘
//!                         └─▶ retire parent ─▶ publish AsteroidDestroyed
//!   Update:          TimerFired(ExpireAsteroid) ─▶ retire (no score)
//! ```

pub mod collision;
pub mod components;
pub mod expiry;
pub mod pool;
pub mod spawner;
pub mod split;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::pool::Pool;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::timers::FireTimers;

pub use components::Asteroid;
pub use pool::{AsteroidLaunch, AsteroidPool};

pub fn plugin(app: &mut App) {
    let config = app.world().resource::<Tunables>().asteroid_pool();

    app.insert_resource(AsteroidPool(Pool::new(config)))
        .add_systems(
            OnEnter(GameState::InGame),
            (pool::init_asteroid_pool, spawner::reset_spawner),
        )
        .add_systems(OnExit(GameState::InGame), pool::dispose_asteroid_pool)
        .add_systems(
            Update,
            (
                spawner::spawn_asteroid_waves,
                expiry::expire_asteroids.after(FireTimers),
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            collision::split_on_bullet_impact
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}
