//! Gameplay notifications carried by [`EventBus`](super::bus::EventBus).
//!
//! Payloads are snapshots: by the time a handler runs, the entity that
//! produced the event may already be back in its pool.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidDestroyed {
    pub position: Vec2,
    pub size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerDied {
    pub position: Vec2,
}
