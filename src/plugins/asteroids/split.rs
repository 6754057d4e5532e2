//! Fragmentation planning. Pure functions over the RNG, no ECS access.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::common::random::{point_in_disk, unit_vector};
use crate::common::tunables::Tunables;

use super::components::PALETTE;
use super::pool::AsteroidLaunch;

#[inline]
pub fn split_size(size: f32) -> f32 {
    size * 0.5
}

/// Two children for a rock of `size` destroyed at `position`, or `None` when
/// the halves would fall below the split threshold.
///
/// Each child scatters inside a small disk around the parent and flies off
/// along its own random direction.
pub fn plan_split(
    rng: &mut impl Rng,
    tunables: &Tunables,
    position: Vec2,
    size: f32,
) -> Option<[AsteroidLaunch; 2]> {
    let child = split_size(size);
    if child < tunables.asteroid_min_split_size {
        return None;
    }

    Some(std::array::from_fn(|_| AsteroidLaunch {
        position: position + point_in_disk(rng, tunables.split_scatter_radius),
        size: child,
        heading: rng.gen_range(0.0..TAU),
        velocity: unit_vector(rng) * tunables.asteroid_speed,
        variant: rng.gen_range(0..PALETTE.len()),
    }))
}
