//! Core plugin: shared resources and global settings.
//!
//! Anything inserted before the plugins are registered wins. The full game
//! does that for tunables and the score store; tests may do it for the RNG.

use bevy::prelude::*;

use crate::common::random::GameRng;
use crate::common::storage::ScoreStorage;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }

    if !app.world().contains_resource::<GameRng>() {
        let seed = app.world().resource::<Tunables>().seed;
        app.insert_resource(GameRng::from_optional_seed(seed));
    }

    if !app.world().contains_resource::<ScoreStorage>() {
        app.insert_resource(ScoreStorage::in_memory());
    }

    app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.04)));
}
