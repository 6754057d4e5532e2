//! Collision layers.
//!
//! Filters decide who can touch whom. Turning collision response off for an
//! entity never removes components: it swaps in a layer set with empty filters.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Player,
    /// Post-respawn grace period: the ship passes through asteroids.
    Invincible,
    Asteroid,
    Bullet,
}

/// Shared "collide with nothing" layer set for a given membership.
#[inline]
pub fn non_interacting(membership: Layer) -> CollisionLayers {
    CollisionLayers::new(membership, [] as [Layer; 0])
}

/// `true` if `layers` currently accepts contacts from `layer`.
#[inline]
pub fn accepts(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.filters.has_all(layer)
}
