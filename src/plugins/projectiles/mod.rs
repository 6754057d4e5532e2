//! Projectiles plugin: **message-based producer → consumer** spawning on top of a pool.
//!
//! # Data flow
//! ```text
//!   Update (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: request_player_bullets                                      │
//!│      - reads: PlayerInput.fire, Player Transform + PlayerLifeState         │
//!│      - writes: SpawnBulletRequest message                                  │
//!│                                                                            │
//!│  (B) Consumer: allocate_bullets_from_pool                                  │
//!│      - reads: SpawnBulletRequest messages                                  │
//!│      - mutates: BulletPool (acquire), GameTimers (lifetime)                │
//!│                                                                            │
//!│  (C) expire_bullets                                                        │
//!│      - reads: TimerFired(ExpireBullet)                                     │
//!│      - mutates: BulletState -> PendingReturn                               │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics emits CollisionStart messages (Avian)                         │
//!│  (E) retire_bullets_on_impact: BulletState -> PendingReturn                │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (F) return_to_pool_commit                                                 │
//!│      - releases PendingReturn bullets, cancels their lifetime timers       │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never borrow `ResMut<BulletPool>`. The allocator is the single
//! acquirer and the commit is the single releaser.

pub mod components;
pub mod pool;
pub mod collision;

pub mod messages;
pub mod request;
pub mod allocator;
pub mod commit;

use bevy::prelude::*;
use avian2d::collision::narrow_phase::CollisionEventSystems;

use crate::common::pool::Pool;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::ReadInput;
use crate::plugins::timers::FireTimers;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let config = app.world().resource::<Tunables>().bullet_pool();

        // Pool lives as long as the scene: prewarm on enter, dispose on exit.
        app.insert_resource(pool::BulletPool(Pool::new(config)))
            .add_systems(OnEnter(GameState::InGame), pool::init_bullet_pool)
            .add_systems(OnExit(GameState::InGame), pool::dispose_bullet_pool);

        app.add_message::<messages::SpawnBulletRequest>();

        // Update-phase pipeline: request -> allocate, timers -> expire
        app.add_systems(
            Update,
            (
                request::request_player_bullets.after(ReadInput),
                allocator::allocate_bullets_from_pool.after(request::request_player_bullets),
                commit::expire_bullets.after(FireTimers),
            )
                .run_if(in_state(GameState::InGame)),
        );

        // Fixed collision pipeline
        app.add_systems(
            FixedPostUpdate,
            collision::retire_bullets_on_impact
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            PostUpdate,
            commit::return_to_pool_commit.run_if(in_state(GameState::InGame)),
        );
    }
}
