//! Return commit: recycle bullets back into the pool.
//!
//! This system is the only place bullets are released. The archetype's
//! release hook restores the Inactive invariants:
//! - hidden
//! - velocity = 0
//! - collide with nothing (filters empty)

use bevy::prelude::*;

use crate::common::pool::{PoolError, Pooled};
use crate::plugins::timers::{GameTimers, Lifetime, TimedAction, TimerFired};

use super::components::{Bullet, BulletState};
use super::pool::{BulletArchetype, BulletPool};

/// Timed-out bullets are marked exactly like bullets that hit something.
pub fn expire_bullets(
    mut fired: MessageReader<TimerFired>,
    pool: Res<BulletPool>,
    mut q: Query<&mut BulletState, With<Bullet>>,
) {
    for TimerFired(action) in fired.read() {
        let TimedAction::ExpireBullet(handle) = *action else {
            continue;
        };
        let Some(&e) = pool.get(handle) else {
            debug!("stale bullet lifetime {handle:?} ignored");
            continue;
        };
        let mut state = q.get_mut(e).expect("BulletPool contained an entity missing bullet components");
        if *state == BulletState::Active {
            *state = BulletState::PendingReturn;
        }
    }
}

pub fn return_to_pool_commit(
    mut commands: Commands,
    mut pool: ResMut<BulletPool>,
    mut timers: ResMut<GameTimers>,
    q: Query<(&BulletState, &Pooled, Option<&Lifetime>), With<Bullet>>,
) {
    for (state, pooled, lifetime) in &q {
        if *state != BulletState::PendingReturn { continue; }

        match pool.release(pooled.0, &mut BulletArchetype::new(&mut commands)) {
            Ok(()) => {
                if let Some(lifetime) = lifetime {
                    timers.cancel(lifetime.0);
                }
            }
            Err(err @ (PoolError::DoubleRelease(_) | PoolError::StaleHandle(_))) => {
                error!("bullet release failed: {err}");
                debug_assert!(false, "bullet release failed: {err}");
            }
            Err(err) => error!("bullet release failed: {err}"),
        }
    }
}
