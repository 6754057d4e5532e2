//! Global state machine.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    /// One-frame hop used to tear down and rebuild everything scoped to `InGame`.
    Reloading,
}
