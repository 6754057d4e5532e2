//! Test helpers.
//!
//! `World::run_system_once` runs a system without a schedule. Systems that use
//! `Commands` only enqueue work, so we `flush()` afterwards to apply it before
//! assertions. Event-bus publishes queued through `Commands` are delivered by
//! that same flush.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::pool::Pool;
use crate::common::random::GameRng;
use crate::common::storage::ScoreStorage;
use crate::common::tunables::Tunables;
use crate::plugins::asteroids::AsteroidPool;
use crate::plugins::fx::ScreenShake;
use crate::plugins::player::PlayerInput;
use crate::plugins::projectiles::messages::SpawnBulletRequest;
use crate::plugins::projectiles::pool::BulletPool;
use crate::plugins::session::Session;
use crate::plugins::timers::{GameTimers, TimerFired};

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A world holding every resource gameplay systems read, with a fixed seed.
pub fn gameplay_world() -> World {
    let tunables = Tunables {
        seed: Some(0x5EED),
        ..Tunables::default()
    };

    let mut world = World::new();
    world.insert_resource(GameRng::seeded(0x5EED));
    world.insert_resource(AsteroidPool(Pool::new(tunables.asteroid_pool())));
    world.insert_resource(BulletPool(Pool::new(tunables.bullet_pool())));
    world.insert_resource(Session::new(tunables.lives, 0));
    world.insert_resource(ScoreStorage::in_memory());
    world.insert_resource(tunables);
    world.init_resource::<GameTimers>();
    world.init_resource::<PlayerInput>();
    world.init_resource::<ScreenShake>();
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<TimerFired>>();
    world.init_resource::<Messages<SpawnBulletRequest>>();
    world
}

/// Inject a contact the way avian reports it.
pub fn write_collision(world: &mut World, a: Entity, b: Entity) {
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

/// Advance the game timers and publish what came due, like a frame would.
pub fn advance_timers(world: &mut World, delta: Duration) {
    let fired = world.resource_mut::<GameTimers>().advance(delta);
    for action in fired {
        world.write_message(TimerFired(action));
    }
}
