//! Session controller: score, lives, high score and the end of a run.
//!
//! The session owns no entities. It listens on the event buses while a scene is
//! running and reacts:
//!
//! ```text
//!   AsteroidDestroyed ─▶ explosion, +points by size tier
//!   PlayerDied        ─▶ explosion, lives - 1 ─┬─▶ lives left: schedule Respawn
//!                                              └─▶ none left: game over, persist hi-score
//! ```
//!
//! Once the run is over, score and lives stay frozen until the scene reloads.

use bevy::prelude::*;

use crate::common::bus::{EventBus, SubscriptionId};
use crate::common::events::{AsteroidDestroyed, PlayerDied};
use crate::common::state::GameState;
use crate::common::storage::ScoreStorage;
use crate::common::tunables::Tunables;
use crate::plugins::fx::{ScreenShake, spawn_explosion};
use crate::plugins::timers::{GameTimers, TimedAction};

pub const HI_SCORE_KEY: &str = "hiScore";

const ASTEROID_SHAKE: f32 = 0.25;
const PLAYER_SHAKE: f32 = 0.8;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    pub lives: u32,
    pub hi_score: u32,
    pub game_over: bool,
}

/// What losing a life led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLost {
    Respawn,
    /// The last life went; carries whether the high score was beaten.
    GameOver { new_hi_score: bool },
    /// The run had already ended.
    Ignored,
}

impl Session {
    pub fn new(lives: u32, hi_score: u32) -> Self {
        Self {
            score: 0,
            lives,
            hi_score,
            game_over: false,
        }
    }

    /// Returns `false` once the run is over.
    pub fn add_points(&mut self, points: u32) -> bool {
        if self.game_over {
            return false;
        }
        self.score = self.score.saturating_add(points);
        true
    }

    pub fn lose_life(&mut self) -> LifeLost {
        if self.game_over {
            return LifeLost::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            return LifeLost::Respawn;
        }

        self.game_over = true;
        let new_hi_score = self.score > self.hi_score;
        if new_hi_score {
            self.hi_score = self.score;
        }
        LifeLost::GameOver { new_hi_score }
    }
}

/// Score for destroying a rock of `size`. Smaller rocks are worth more.
pub fn points_for_size(size: f32) -> u32 {
    if size < 0.75 {
        100
    } else if size < 1.2 {
        50
    } else {
        25
    }
}

/// Handler registrations live exactly as long as the scene.
#[derive(Resource, Debug)]
struct SessionSubscriptions {
    destroyed: SubscriptionId,
    died: SubscriptionId,
}

pub fn plugin(app: &mut App) {
    let lives = app.world().resource::<Tunables>().lives;

    app.insert_resource(Session::new(lives, 0))
        .add_systems(
            OnEnter(GameState::InGame),
            (reset_session, subscribe_handlers).chain(),
        )
        .add_systems(OnExit(GameState::InGame), unsubscribe_handlers)
        .add_systems(
            Update,
            restart_on_input.run_if(in_state(GameState::InGame)),
        )
        .add_systems(OnEnter(GameState::Reloading), finish_reload);
}

fn reset_session(
    mut session: ResMut<Session>,
    tunables: Res<Tunables>,
    storage: Res<ScoreStorage>,
) {
    let hi_score = storage
        .0
        .get(HI_SCORE_KEY)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);
    *session = Session::new(tunables.lives, hi_score);
}

fn subscribe_handlers(world: &mut World) {
    let destroyed = EventBus::<AsteroidDestroyed>::subscribe(world, on_asteroid_destroyed);
    let died = EventBus::<PlayerDied>::subscribe(world, on_player_died);
    world.insert_resource(SessionSubscriptions { destroyed, died });
}

fn unsubscribe_handlers(world: &mut World) {
    let Some(subs) = world.remove_resource::<SessionSubscriptions>() else {
        return;
    };
    EventBus::<AsteroidDestroyed>::unsubscribe(world, subs.destroyed);
    EventBus::<PlayerDied>::unsubscribe(world, subs.died);
}

fn on_asteroid_destroyed(
    In(ev): In<AsteroidDestroyed>,
    mut commands: Commands,
    mut session: ResMut<Session>,
    mut shake: ResMut<ScreenShake>,
) {
    spawn_explosion(&mut commands, ev.position, ev.size);
    shake.add(ASTEROID_SHAKE * ev.size);
    session.add_points(points_for_size(ev.size));
}

fn on_player_died(
    In(ev): In<PlayerDied>,
    mut commands: Commands,
    mut session: ResMut<Session>,
    mut shake: ResMut<ScreenShake>,
    mut timers: ResMut<GameTimers>,
    mut storage: ResMut<ScoreStorage>,
    tunables: Res<Tunables>,
) {
    spawn_explosion(&mut commands, ev.position, 1.5);
    shake.add(PLAYER_SHAKE);

    match session.lose_life() {
        LifeLost::Respawn => {
            timers.schedule(tunables.respawn_delay(), TimedAction::Respawn);
        }
        LifeLost::GameOver { new_hi_score } => {
            info!("game over with {} points", session.score);
            if new_hi_score {
                info!("new hi-score {}", session.hi_score);
                storage.0.set(HI_SCORE_KEY, i64::from(session.hi_score));
                if let Err(err) = storage.0.flush() {
                    warn!("hi-score not saved: {err}");
                }
            }
        }
        LifeLost::Ignored => {}
    }
}

fn restart_on_input(
    keys: Res<ButtonInput<KeyCode>>,
    session: Res<Session>,
    mut next: ResMut<NextState<GameState>>,
) {
    if session.game_over && keys.just_pressed(KeyCode::Space) {
        next.set(GameState::Reloading);
    }
}

/// Everything scoped to the scene has been torn down by now; build it again.
fn finish_reload(mut next: ResMut<NextState<GameState>>) {
    next.set(GameState::InGame);
}

#[cfg(test)]
mod tests;
