mod common;

use bevy::prelude::*;
use bevy_asteroids::common::state::GameState;
use bevy_asteroids::common::tunables::Tunables;
use bevy_asteroids::plugins::asteroids::AsteroidPool;
use bevy_asteroids::plugins::player::{Player, PlayerLifeState};
use bevy_asteroids::plugins::projectiles::pool::BulletPool;
use bevy_asteroids::plugins::session::Session;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
}

#[test]
fn entering_the_scene_builds_it() {
    let mut app = common::app_headless();
    app.update();

    let t = app.world().resource::<Tunables>().clone();
    assert_eq!(app.world().resource::<AsteroidPool>().free_count(), t.asteroid_prewarm);
    assert_eq!(app.world().resource::<BulletPool>().free_count(), t.bullet_prewarm);

    let life = *app
        .world_mut()
        .query_filtered::<&PlayerLifeState, With<Player>>()
        .single(app.world())
        .expect("one player");
    assert_eq!(life, PlayerLifeState::Active);

    let session = app.world().resource::<Session>();
    assert_eq!(session.lives, t.lives);
    assert_eq!(session.score, 0);
}

#[test]
fn first_wave_arrives_after_one_interval() {
    let mut app = common::app_headless();
    app.update();
    assert_eq!(app.world().resource::<AsteroidPool>().in_use_count(), 0);

    let spawn_amount = app.world().resource::<Tunables>().spawn_amount;
    common::update_until(&mut app, 240, |world| {
        world.resource::<AsteroidPool>().in_use_count() >= spawn_amount
    });
}

#[test]
fn holding_fire_launches_one_bullet_per_press() {
    let mut app = common::app_headless();
    app.update();

    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Space);
    app.update();
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        // Next frame: still held, no longer a fresh press.
        keys.clear();
    }
    app.update();

    assert_eq!(app.world().resource::<BulletPool>().in_use_count(), 1);
}
