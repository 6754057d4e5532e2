use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::bus::EventBus;
use crate::common::layers::accepts;
use crate::common::test_utils::{advance_timers, gameplay_world, run_system_once, write_collision};

#[derive(Resource, Default)]
struct Deaths(Vec<PlayerDied>);

fn record_death(In(ev): In<PlayerDied>, mut log: ResMut<Deaths>) {
    log.0.push(ev);
}

fn world_with_player(state: PlayerLifeState) -> (World, Entity) {
    let mut world = gameplay_world();
    world.init_resource::<Deaths>();
    EventBus::<PlayerDied>::subscribe(&mut world, record_death);

    run_system_once(&mut world, spawn);
    let ship = world
        .query_filtered::<Entity, With<Player>>()
        .single(&world)
        .expect("one player");
    *world.get_mut::<PlayerLifeState>(ship).unwrap() = state;
    (world, ship)
}

fn life(world: &World, ship: Entity) -> PlayerLifeState {
    *world.get::<PlayerLifeState>(ship).unwrap()
}

#[test]
fn spawn_creates_an_active_colliding_ship() {
    let (world, ship) = world_with_player(PlayerLifeState::Active);

    assert_eq!(life(&world, ship), PlayerLifeState::Active);
    let layers = world.get::<CollisionLayers>(ship).unwrap();
    assert!(layers.memberships.has_all(Layer::Player));
    assert!(accepts(layers, Layer::Asteroid));
}

#[test]
fn gather_input_maps_keys() {
    let mut world = World::new();
    world.init_resource::<PlayerInput>();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowUp);
    keys.press(KeyCode::KeyA);
    keys.press(KeyCode::Space);
    world.insert_resource(keys);

    run_system_once(&mut world, gather_input);

    assert_eq!(
        *world.resource::<PlayerInput>(),
        PlayerInput { boosting: true, turn: 1.0, fire: true }
    );
}

#[test]
fn opposite_turn_keys_cancel_and_held_fire_does_not_repeat() {
    let mut world = World::new();
    world.init_resource::<PlayerInput>();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyA);
    keys.press(KeyCode::KeyD);
    keys.press(KeyCode::Space);
    // A new frame: Space is still held but no longer just pressed.
    keys.clear();
    world.insert_resource(keys);

    run_system_once(&mut world, gather_input);

    let input = *world.resource::<PlayerInput>();
    assert_eq!(input.turn, 0.0);
    assert!(!input.fire);
}

#[test]
fn thrust_pushes_along_the_nose_and_turn_sets_spin() {
    let (mut world, ship) = world_with_player(PlayerLifeState::Active);
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(500));
    world.insert_resource(time);
    *world.resource_mut::<PlayerInput>() = PlayerInput { boosting: true, turn: -1.0, fire: false };

    run_system_once(&mut world, apply_thrust);

    let t = world.resource::<Tunables>().clone();
    let vel = world.get::<LinearVelocity>(ship).unwrap().0;
    assert!((vel - Vec2::Y * t.thrust * 0.5).length() < 1e-3);
    assert_eq!(world.get::<AngularVelocity>(ship).unwrap().0, -t.turn_rate);
}

#[test]
fn dead_ship_does_not_fly() {
    let (mut world, ship) = world_with_player(PlayerLifeState::Dead);
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(500));
    world.insert_resource(time);
    *world.resource_mut::<PlayerInput>() = PlayerInput { boosting: true, turn: 1.0, fire: false };

    run_system_once(&mut world, apply_thrust);

    assert_eq!(world.get::<LinearVelocity>(ship).unwrap().0, Vec2::ZERO);
    assert_eq!(world.get::<AngularVelocity>(ship).unwrap().0, 0.0);
}

#[test]
fn asteroid_contact_kills_an_active_ship() {
    let (mut world, ship) = world_with_player(PlayerLifeState::Active);
    world.get_mut::<Transform>(ship).unwrap().translation = Vec3::new(30.0, 40.0, 0.0);
    world.get_mut::<LinearVelocity>(ship).unwrap().0 = Vec2::new(5.0, 5.0);
    let rock = world.spawn(Asteroid { size: 1.0 }).id();

    write_collision(&mut world, rock, ship);
    run_system_once(&mut world, resolve_player_hits);

    assert_eq!(life(&world, ship), PlayerLifeState::Dead);
    assert_eq!(world.get::<LinearVelocity>(ship).unwrap().0, Vec2::ZERO);
    assert_eq!(*world.get::<Visibility>(ship).unwrap(), Visibility::Hidden);
    assert!(!accepts(world.get::<CollisionLayers>(ship).unwrap(), Layer::Asteroid));
    assert_eq!(world.resource::<Deaths>().0, vec![PlayerDied { position: Vec2::new(30.0, 40.0) }]);
}

#[test]
fn only_one_death_per_step() {
    let (mut world, ship) = world_with_player(PlayerLifeState::Active);
    let a = world.spawn(Asteroid { size: 1.0 }).id();
    let b = world.spawn(Asteroid { size: 0.5 }).id();

    write_collision(&mut world, ship, a);
    write_collision(&mut world, b, ship);
    run_system_once(&mut world, resolve_player_hits);

    assert_eq!(world.resource::<Deaths>().0.len(), 1);
}

#[test]
fn invincible_ship_and_non_asteroid_contacts_are_ignored() {
    let (mut world, ship) = world_with_player(PlayerLifeState::Invincible);
    let rock = world.spawn(Asteroid { size: 1.0 }).id();
    write_collision(&mut world, rock, ship);
    run_system_once(&mut world, resolve_player_hits);
    assert_eq!(life(&world, ship), PlayerLifeState::Invincible);

    *world.get_mut::<PlayerLifeState>(ship).unwrap() = PlayerLifeState::Active;
    let stray = world.spawn_empty().id();
    world.resource_mut::<Messages<CollisionStart>>().clear();
    write_collision(&mut world, stray, ship);
    run_system_once(&mut world, resolve_player_hits);
    assert_eq!(life(&world, ship), PlayerLifeState::Active);
    assert!(world.resource::<Deaths>().0.is_empty());
}

#[test]
fn respawn_then_invincibility_runs_out() {
    let (mut world, ship) = world_with_player(PlayerLifeState::Active);
    let rock = world.spawn(Asteroid { size: 1.0 }).id();
    world.get_mut::<Transform>(ship).unwrap().translation = Vec3::new(80.0, -20.0, 0.0);
    write_collision(&mut world, ship, rock);
    run_system_once(&mut world, resolve_player_hits);

    let t = world.resource::<Tunables>().clone();
    world.resource_mut::<GameTimers>().schedule(t.respawn_delay(), TimedAction::Respawn);

    advance_timers(&mut world, t.respawn_delay());
    run_system_once(&mut world, apply_player_timers);

    assert_eq!(life(&world, ship), PlayerLifeState::Invincible);
    assert_eq!(world.get::<Transform>(ship).unwrap().translation.truncate(), PLAYER_ORIGIN);
    assert_eq!(*world.get::<Visibility>(ship).unwrap(), Visibility::Visible);
    let layers = world.get::<CollisionLayers>(ship).unwrap();
    assert!(layers.memberships.has_all(Layer::Invincible));
    assert!(!accepts(layers, Layer::Asteroid));

    world.resource_mut::<Messages<TimerFired>>().clear();
    advance_timers(&mut world, t.invincible_delay());
    run_system_once(&mut world, apply_player_timers);

    assert_eq!(life(&world, ship), PlayerLifeState::Active);
    assert!(accepts(world.get::<CollisionLayers>(ship).unwrap(), Layer::Asteroid));
}

#[test]
fn respawn_is_ignored_unless_dead() {
    let (mut world, ship) = world_with_player(PlayerLifeState::Active);
    world.get_mut::<Transform>(ship).unwrap().translation = Vec3::new(10.0, 10.0, 0.0);

    world.write_message(TimerFired(TimedAction::Respawn));
    run_system_once(&mut world, apply_player_timers);

    assert_eq!(life(&world, ship), PlayerLifeState::Active);
    assert_eq!(world.get::<Transform>(ship).unwrap().translation.truncate(), Vec2::new(10.0, 10.0));
    assert_eq!(world.resource::<GameTimers>().pending(), 0);
}
