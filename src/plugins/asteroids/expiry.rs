use bevy::prelude::*;

use crate::plugins::timers::{GameTimers, TimedAction, TimerFired};

use super::pool::{AsteroidPool, retire_asteroid};

/// Rocks that drift for their whole lifetime vanish without scoring.
pub fn expire_asteroids(
    mut commands: Commands,
    mut fired: MessageReader<TimerFired>,
    mut pool: ResMut<AsteroidPool>,
    mut timers: ResMut<GameTimers>,
) {
    for TimerFired(action) in fired.read() {
        let TimedAction::ExpireAsteroid(handle) = *action else {
            continue;
        };
        if !pool.is_in_use(handle) {
            debug!("stale asteroid lifetime {handle:?} ignored");
            continue;
        }
        // The timer that fired is this one, nothing left to cancel.
        if let Err(err) = retire_asteroid(&mut commands, &mut pool, &mut timers, handle, None) {
            error!("asteroid expiry failed: {err}");
        }
    }
}
