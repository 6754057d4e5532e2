use std::time::Duration;

use bevy::prelude::*;

use super::*;
use crate::common::storage::MemoryStore;
use crate::common::test_utils::{gameplay_world, run_system_once};
use crate::plugins::fx::Explosion;

fn running_session() -> World {
    let mut world = gameplay_world();
    run_system_once(&mut world, reset_session);
    subscribe_handlers(&mut world);
    world
}

fn destroy(world: &mut World, size: f32) -> usize {
    EventBus::publish(world, AsteroidDestroyed { position: Vec2::ZERO, size })
}

fn die(world: &mut World) -> usize {
    EventBus::publish(world, PlayerDied { position: Vec2::ZERO })
}

#[test]
fn smaller_rocks_score_more() {
    assert_eq!(points_for_size(0.5), 100);
    assert_eq!(points_for_size(0.74), 100);
    assert_eq!(points_for_size(0.75), 50);
    assert_eq!(points_for_size(1.19), 50);
    assert_eq!(points_for_size(1.2), 25);
    assert_eq!(points_for_size(1.5), 25);
}

#[test]
fn destroyed_rocks_add_up_and_explode() {
    let mut world = running_session();

    assert_eq!(destroy(&mut world, 0.5), 1);
    destroy(&mut world, 1.0);
    destroy(&mut world, 1.5);

    assert_eq!(world.resource::<Session>().score, 175);
    assert_eq!(world.query::<&Explosion>().iter(&world).count(), 3);
    assert!(world.resource::<ScreenShake>().trauma() > 0.0);
}

#[test]
fn losing_a_life_schedules_a_respawn() {
    let mut world = running_session();
    let lives = world.resource::<Tunables>().lives;

    die(&mut world);

    let session = world.resource::<Session>();
    assert_eq!(session.lives, lives - 1);
    assert!(!session.game_over);

    let delay = world.resource::<Tunables>().respawn_delay();
    let mut timers = world.resource_mut::<GameTimers>();
    assert_eq!(timers.pending(), 1);
    assert!(timers.advance(delay - Duration::from_millis(1)).is_empty());
    assert_eq!(timers.advance(Duration::from_millis(1)), vec![TimedAction::Respawn]);
}

#[test]
fn last_life_ends_the_run_and_freezes_it() {
    let mut world = running_session();
    world.resource_mut::<Session>().lives = 1;
    destroy(&mut world, 0.5);

    die(&mut world);
    assert!(world.resource::<Session>().game_over);
    assert_eq!(world.resource::<GameTimers>().pending(), 0, "no respawn after game over");

    destroy(&mut world, 0.5);
    die(&mut world);

    let session = world.resource::<Session>();
    assert_eq!(session.score, 100);
    assert_eq!(session.lives, 0);
}

#[test]
fn beaten_hi_score_is_persisted() {
    let mut world = running_session();
    {
        let mut session = world.resource_mut::<Session>();
        session.score = 300;
        session.hi_score = 200;
        session.lives = 1;
    }

    die(&mut world);

    assert_eq!(world.resource::<Session>().hi_score, 300);
    assert_eq!(world.resource::<ScoreStorage>().0.get(HI_SCORE_KEY), Some(300));
}

#[test]
fn unbeaten_hi_score_is_left_alone() {
    let mut world = running_session();
    {
        let mut session = world.resource_mut::<Session>();
        session.score = 150;
        session.hi_score = 200;
        session.lives = 1;
    }

    die(&mut world);

    assert_eq!(world.resource::<Session>().hi_score, 200);
    assert_eq!(world.resource::<ScoreStorage>().0.get(HI_SCORE_KEY), None);
}

#[test]
fn reset_loads_the_stored_hi_score() {
    let mut world = gameplay_world();
    world.insert_resource(ScoreStorage::new(MemoryStore::with(HI_SCORE_KEY, 1250)));
    world.insert_resource(Session { score: 40, lives: 0, hi_score: 0, game_over: true });

    run_system_once(&mut world, reset_session);

    let lives = world.resource::<Tunables>().lives;
    assert_eq!(*world.resource::<Session>(), Session::new(lives, 1250));
}

#[test]
fn handlers_stop_listening_after_teardown() {
    let mut world = running_session();
    unsubscribe_handlers(&mut world);

    assert_eq!(destroy(&mut world, 0.5), 0);
    assert_eq!(die(&mut world), 0);
    assert_eq!(world.resource::<Session>().score, 0);
    assert!(!world.contains_resource::<SessionSubscriptions>());
}

#[test]
fn space_restarts_only_after_game_over() {
    let mut world = running_session();
    world.init_resource::<NextState<GameState>>();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Space);
    world.insert_resource(keys);

    run_system_once(&mut world, restart_on_input);
    assert!(matches!(*world.resource::<NextState<GameState>>(), NextState::Unchanged));

    world.resource_mut::<Session>().game_over = true;
    run_system_once(&mut world, restart_on_input);
    assert!(matches!(
        *world.resource::<NextState<GameState>>(),
        NextState::Pending(GameState::Reloading)
    ));
}
