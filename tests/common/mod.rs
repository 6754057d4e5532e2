//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `bevy_asteroids::game::configure_headless` to install gameplay plugins.
//!
//! Time advances a fixed 1/60 s per `update()`, so the fixed schedule runs once
//! per frame and timer-driven flows take a predictable number of frames.

#![allow(dead_code)]

use std::time::Duration;

use avian2d::prelude::*;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use bevy_asteroids::common::tunables::Tunables;

pub const FRAME: Duration = Duration::from_nanos(16_666_667);

pub fn app_headless() -> App {
    app_headless_with(Tunables {
        seed: Some(0xA57E),
        ..Tunables::default()
    })
}

pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    // No InputPlugin: tests press keys directly and nothing clears them behind their back.
    app.init_resource::<ButtonInput<KeyCode>>();

    app.insert_resource(tunables);
    bevy_asteroids::game::configure_headless(&mut app);
    // `App::run` normally does this; tests drive `update()` directly, so finalize plugins here
    // (avian initializes resources such as `CollisionDiagnostics` in `Plugin::finish`).
    app.finish();
    app.cleanup();
    app
}

/// Tick until `done` holds, failing after `max_frames`.
pub fn update_until(app: &mut App, max_frames: usize, mut done: impl FnMut(&mut World) -> bool) {
    for _ in 0..max_frames {
        app.update();
        if done(app.world_mut()) {
            return;
        }
    }
    panic!("condition not reached within {max_frames} frames");
}

pub fn write_collision(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}
