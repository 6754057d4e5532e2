//! Timer plugin: drives the scheduled-callback queue once per frame.
//!
//! ```text
//!   schedule(delay, action)          Update (FireTimers)            Update (.after(FireTimers))
//!   ─────────────────────▶ GameTimers ───── advance(dt) ─────▶ TimerFired ─────▶ consumers
//! ```
//!
//! Consumers only ever see actions that came due this frame, in schedule order.
//! Anything that can be released early (bullets, asteroids) keeps its token in
//! a [`Lifetime`] component and cancels it on release. A fire that still slips
//! through carries a pool handle whose generation no longer matches, and the
//! consumer drops it.

use bevy::prelude::*;

use crate::common::pool::PoolHandle;
use crate::common::state::GameState;
use crate::common::timers::{TimerQueue, TimerToken};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimedAction {
    Respawn,
    EndInvincibility,
    ExpireAsteroid(PoolHandle),
    ExpireBullet(PoolHandle),
}

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct GameTimers(pub TimerQueue<TimedAction>);

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerFired(pub TimedAction);

/// Pending expiry for a pooled entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifetime(pub TimerToken);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FireTimers;

pub fn plugin(app: &mut App) {
    app.init_resource::<GameTimers>()
        .add_message::<TimerFired>()
        .add_systems(
            Update,
            fire_due_timers
                .in_set(FireTimers)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(OnExit(GameState::InGame), clear_timers);
}

fn fire_due_timers(
    time: Res<Time>,
    mut timers: ResMut<GameTimers>,
    mut writer: MessageWriter<TimerFired>,
) {
    for action in timers.advance(time.delta()) {
        writer.write(TimerFired(action));
    }
}

fn clear_timers(mut timers: ResMut<GameTimers>) {
    let dropped = timers.pending();
    timers.clear();
    if dropped > 0 {
        debug!("dropped {dropped} pending timers on scene exit");
    }
}
