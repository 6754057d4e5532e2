use avian2d::prelude::*;
use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;

use crate::common::bus::PublishExt;
use crate::common::events::AsteroidDestroyed;
use crate::common::pool::{PoolError, Pooled};
use crate::common::random::GameRng;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::components::Bullet;
use crate::plugins::timers::{GameTimers, Lifetime};

use super::components::Asteroid;
use super::pool::{AsteroidPool, launch_asteroid, retire_asteroid};
use super::split::plan_split;

/// Bullet contact destroys a rock: it goes back to the pool first, then its
/// children (if any) are launched, then `AsteroidDestroyed` goes out.
///
/// Several bullets hitting the same rock in one step destroy it once.
pub fn split_on_bullet_impact(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut pool: ResMut<AsteroidPool>,
    mut timers: ResMut<GameTimers>,
    mut rng: ResMut<GameRng>,
    tunables: Res<Tunables>,
    q_asteroids: Query<(&Asteroid, &Pooled, &Transform, Option<&Lifetime>)>,
    q_bullets: Query<(), With<Bullet>>,
) {
    let mut destroyed = EntityHashSet::default();

    for ev in started.read() {
        let (rock, other) = if q_asteroids.contains(ev.collider1) {
            (ev.collider1, ev.collider2)
        } else if q_asteroids.contains(ev.collider2) {
            (ev.collider2, ev.collider1)
        } else {
            continue;
        };
        if !q_bullets.contains(other) || !destroyed.insert(rock) {
            continue;
        }

        let Ok((asteroid, pooled, tf, lifetime)) = q_asteroids.get(rock) else {
            continue;
        };
        if !pool.is_in_use(pooled.0) {
            continue;
        }

        // Snapshot before the entity is recycled.
        let position = tf.translation.truncate();
        let size = asteroid.size;

        match retire_asteroid(&mut commands, &mut pool, &mut timers, pooled.0, lifetime) {
            Ok(()) => {}
            Err(err @ (PoolError::DoubleRelease(_) | PoolError::StaleHandle(_))) => {
                error!("asteroid release failed: {err}");
                debug_assert!(false, "asteroid release failed: {err}");
                continue;
            }
            Err(err) => {
                error!("asteroid release failed: {err}");
                continue;
            }
        }

        if let Some(children) = plan_split(&mut rng.0, &tunables, position, size) {
            for launch in &children {
                if let Err(err) = launch_asteroid(&mut commands, &mut pool, &mut timers, &tunables, launch) {
                    debug!("split fragment dropped: {err}");
                }
            }
        }

        commands.publish(AsteroidDestroyed { position, size });
    }
}
