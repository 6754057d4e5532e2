//! Player plugin: flight controls and the life-state machine.
//!
//! ```text
//!             asteroid contact              respawn timer              invincible timer
//!   Active ─────────────────────▶ Dead ─────────────────────▶ Invincible ───────────────▶ Active
//!                                  │ (no lives left: stays Dead, session is over)
//! ```
//!
//! Pipeline:
//! - Update: sample keys into `PlayerInput`
//! - FixedUpdate: thrust and turn
//! - FixedPostUpdate: asteroid contacts kill an `Active` ship
//! - Update (after timers): respawn and end of invincibility
//!
//! Contacts in `Invincible`/`Dead` are filtered out by collision layers, so the
//! hit system never sees them. The state check there only guards the same step.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::bus::PublishExt;
use crate::common::events::PlayerDied;
use crate::common::layers::{Layer, non_interacting};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::asteroids::Asteroid;
use crate::plugins::timers::{FireTimers, GameTimers, TimedAction, TimerFired};

const PLAYER_Z: f32 = 1.5;
/// Where the ship starts and respawns.
pub const PLAYER_ORIGIN: Vec2 = Vec2::ZERO;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerLifeState {
    #[default]
    Active,
    Invincible,
    /// Waiting for a respawn, or out of lives.
    Dead,
}

/// Controls sampled once per frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub boosting: bool,
    /// +1 turns counter-clockwise (left), -1 clockwise (right).
    pub turn: f32,
    /// Edge-triggered: true only on the frame the trigger went down.
    pub fire: bool,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadInput;

#[inline]
pub fn active_player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::Asteroid])
}

#[inline]
pub fn invincible_player_layers() -> CollisionLayers {
    non_interacting(Layer::Invincible)
}

#[inline]
pub fn dead_player_layers() -> CollisionLayers {
    non_interacting(Layer::Player)
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (
                gather_input.in_set(ReadInput),
                apply_player_timers.after(FireTimers),
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            apply_thrust.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            resolve_player_hits
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let r = tunables.ship_radius;

    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerLifeState::Active,
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::new(r * 1.6, r * 2.2)),
            ..default()
        },
        Transform::from_translation(PLAYER_ORIGIN.extend(PLAYER_Z)),
        Visibility::Visible,
        RigidBody::Dynamic,
        Collider::circle(r),
        active_player_layers(),
        LinearVelocity::ZERO,
        AngularVelocity::ZERO,
        LinearDamping(tunables.ship_linear_damping),
        AngularDamping(tunables.ship_angular_damping),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut turn = 0.0;
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        turn += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        turn -= 1.0;
    }

    *input = PlayerInput {
        boosting: keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        turn,
        fire: keys.just_pressed(KeyCode::Space),
    };
}

fn apply_thrust(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<
        (&Transform, &PlayerLifeState, &mut LinearVelocity, &mut AngularVelocity),
        With<Player>,
    >,
) {
    let Ok((tf, life, mut vel, mut spin)) = q_player.single_mut() else {
        return;
    };
    if *life == PlayerLifeState::Dead {
        return;
    }

    if input.boosting {
        let forward = (tf.rotation * Vec3::Y).truncate();
        vel.0 += forward * tunables.thrust * time.delta_secs();
    }
    spin.0 = input.turn * tunables.turn_rate;
}

/// Asteroid contact kills an `Active` ship: it stops, hides, stops colliding
/// and `PlayerDied` goes out. Respawning is up to whoever handles the event.
fn resolve_player_hits(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    q_asteroids: Query<(), With<Asteroid>>,
    mut q_player: Query<
        (
            Entity,
            &Transform,
            &mut PlayerLifeState,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<Player>,
    >,
) {
    let Ok((ship, tf, mut life, mut vel, mut spin, mut vis, mut layers)) = q_player.single_mut() else {
        started.clear();
        return;
    };

    for ev in started.read() {
        let other = if ev.collider1 == ship {
            ev.collider2
        } else if ev.collider2 == ship {
            ev.collider1
        } else {
            continue;
        };
        if *life != PlayerLifeState::Active || !q_asteroids.contains(other) {
            continue;
        }

        *life = PlayerLifeState::Dead;
        vel.0 = Vec2::ZERO;
        spin.0 = 0.0;
        *vis = Visibility::Hidden;
        *layers = dead_player_layers();

        commands.publish(PlayerDied { position: tf.translation.truncate() });
    }
}

fn apply_player_timers(
    tunables: Res<Tunables>,
    mut fired: MessageReader<TimerFired>,
    mut timers: ResMut<GameTimers>,
    mut q_player: Query<
        (
            &mut Transform,
            &mut PlayerLifeState,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<Player>,
    >,
) {
    for TimerFired(action) in fired.read() {
        let Ok((mut tf, mut life, mut vel, mut spin, mut vis, mut layers)) = q_player.single_mut() else {
            return;
        };

        match (*action, *life) {
            (TimedAction::Respawn, PlayerLifeState::Dead) => {
                tf.translation = PLAYER_ORIGIN.extend(PLAYER_Z);
                tf.rotation = Quat::IDENTITY;
                vel.0 = Vec2::ZERO;
                spin.0 = 0.0;
                *vis = Visibility::Visible;
                *layers = invincible_player_layers();
                *life = PlayerLifeState::Invincible;
                timers.schedule(tunables.invincible_delay(), TimedAction::EndInvincibility);
            }
            (TimedAction::EndInvincibility, PlayerLifeState::Invincible) => {
                *layers = active_player_layers();
                *life = PlayerLifeState::Active;
            }
            (TimedAction::Respawn | TimedAction::EndInvincibility, state) => {
                debug!("{action:?} ignored while {state:?}");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests;
