//! Spawn consumer: activate bullets from the pool.
//!
//! The pool is the only source of bullet entities, and this system is the only
//! place that acquires them. Running out of bullets drops the request.

use bevy::prelude::*;
use bevy::ecs::message::MessageReader;

use crate::common::tunables::Tunables;
use crate::plugins::timers::{GameTimers, Lifetime, TimedAction};

use super::messages::SpawnBulletRequest;
use super::pool::{acquire_bullet, BulletPool};

pub fn allocate_bullets_from_pool(
    mut commands: Commands,
    mut pool: ResMut<BulletPool>,
    mut timers: ResMut<GameTimers>,
    tunables: Res<Tunables>,
    mut reader: MessageReader<SpawnBulletRequest>,
) {
    for req in reader.read() {
        let vel = req.dir * tunables.bullet_speed;
        let Some((handle, e)) = acquire_bullet(&mut commands, &mut pool, req.pos, vel) else {
            continue;
        };

        let token = timers.schedule(tunables.bullet_lifetime_delay(), TimedAction::ExpireBullet(handle));
        commands.entity(e).insert(Lifetime(token));
    }
}
