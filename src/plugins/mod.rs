//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod asteroids;
pub mod core;
pub mod fx;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod timers;

// Render-only
pub mod camera;
pub mod hud;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    // Tunables must exist before anything below reads them.
    core::plugin(app);
    physics::plugin(app);
    timers::plugin(app);
    fx::plugin(app);
    player::plugin(app);
    asteroids::plugin(app);
    session::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    hud::plugin(app);
}
