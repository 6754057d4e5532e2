//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use std::io::ErrorKind;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::common::storage::{RonFileStore, ScoreStorage};
use crate::common::tunables::{ConfigError, Tunables};
use crate::plugins;

/// Overrides the tunables file location.
pub const TUNABLES_ENV: &str = "ASTEROIDS_TUNABLES";
pub const DEFAULT_TUNABLES_PATH: &str = "tunables.ron";
pub const SCORES_PATH: &str = "scores.ron";

/// Logical window size. The camera is unscaled, so this is also the visible
/// world area around the origin.
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Asteroids".into(),
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            ..default()
        }),
        ..default()
    }));

    // LogPlugin is up from here on, so loading can report what it did.
    app.insert_resource(load_tunables());
    app.insert_resource(open_score_storage());

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (Firefly/camera/HUD).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}

fn load_tunables() -> Tunables {
    let path = std::env::var(TUNABLES_ENV).unwrap_or_else(|_| DEFAULT_TUNABLES_PATH.to_owned());

    match Tunables::load(&path) {
        Ok(tunables) => {
            info!("tunables loaded from {path}");
            tunables
        }
        Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            debug!("no {path}, using default tunables");
            Tunables::default()
        }
        Err(err) => {
            warn!("{err}; using default tunables");
            Tunables::default()
        }
    }
}

fn open_score_storage() -> ScoreStorage {
    match RonFileStore::open(SCORES_PATH) {
        Ok(store) => ScoreStorage::new(store),
        Err(err) => {
            warn!("{err}; hi-scores will not persist this run");
            ScoreStorage::in_memory()
        }
    }
}
