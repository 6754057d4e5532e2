//! Wave spawner: a ring of rocks drifting roughly toward the centre.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::common::random::{GameRng, range_inclusive, unit_vector};
use crate::common::tunables::Tunables;
use crate::plugins::timers::GameTimers;

use super::components::PALETTE;
use super::pool::{AsteroidLaunch, AsteroidPool, launch_asteroid};

const MIN_INTERVAL_SECS: f32 = 0.01;

#[derive(Resource, Debug, Clone)]
pub struct AsteroidSpawner {
    pub timer: Timer,
    pub origin: Vec2,
}

impl AsteroidSpawner {
    pub fn new(tunables: &Tunables, origin: Vec2) -> Self {
        Self {
            timer: Timer::from_seconds(tunables.spawn_rate.max(MIN_INTERVAL_SECS), TimerMode::Repeating),
            origin,
        }
    }
}

/// One wave of `spawn_amount` launches on the spawn ring around `origin`.
pub fn plan_wave(rng: &mut impl Rng, tunables: &Tunables, origin: Vec2) -> Vec<AsteroidLaunch> {
    let variance = tunables.trajectory_variance.abs();

    (0..tunables.spawn_amount)
        .map(|_| {
            let outward = unit_vector(rng);
            let deviation = range_inclusive(rng, -variance, variance).to_radians();
            let direction = Vec2::from_angle(deviation).rotate(-outward);

            AsteroidLaunch {
                position: origin + outward * tunables.spawn_distance,
                size: range_inclusive(rng, tunables.asteroid_min_size, tunables.asteroid_max_size),
                heading: rng.gen_range(0.0..TAU),
                velocity: direction * tunables.asteroid_speed,
                variant: rng.gen_range(0..PALETTE.len()),
            }
        })
        .collect()
}

pub fn reset_spawner(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(AsteroidSpawner::new(&tunables, Vec2::ZERO));
}

pub fn spawn_asteroid_waves(
    time: Res<Time>,
    mut commands: Commands,
    mut spawner: ResMut<AsteroidSpawner>,
    mut rng: ResMut<GameRng>,
    mut pool: ResMut<AsteroidPool>,
    mut timers: ResMut<GameTimers>,
    tunables: Res<Tunables>,
) {
    spawner.timer.tick(time.delta());

    for _ in 0..spawner.timer.times_finished_this_tick() {
        for launch in plan_wave(&mut rng.0, &tunables, spawner.origin) {
            if let Err(err) = launch_asteroid(&mut commands, &mut pool, &mut timers, &tunables, &launch) {
                debug!("asteroid spawn skipped: {err}");
            }
        }
    }
}
