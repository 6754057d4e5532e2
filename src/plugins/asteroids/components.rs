use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{Layer, non_interacting};

/// A rock in the field. `size` is a unitless scale: `1.0` is the base rock.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub size: f32,
}

impl Default for Asteroid {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

/// Tints a launch can pick from.
pub const PALETTE: [Color; 4] = [
    Color::srgb(0.55, 0.52, 0.50),
    Color::srgb(0.62, 0.48, 0.38),
    Color::srgb(0.45, 0.50, 0.58),
    Color::srgb(0.66, 0.63, 0.55),
];

pub const ASTEROID_Z: f32 = 1.0;

/// Rocks pass through each other and only react to the ship and bullets.
#[inline]
pub fn active_asteroid_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Asteroid, [Layer::Player, Layer::Bullet])
}

#[inline]
pub fn inactive_asteroid_layers() -> CollisionLayers {
    non_interacting(Layer::Asteroid)
}

pub fn asteroid_sprite(variant: usize, radius: f32) -> Sprite {
    Sprite {
        color: PALETTE[variant % PALETTE.len()],
        custom_size: Some(Vec2::splat(radius * 2.0)),
        ..default()
    }
}
