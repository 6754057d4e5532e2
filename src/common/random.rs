//! Seeded RNG resource and the few distributions gameplay needs.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct GameRng(pub ChaCha8Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seed from `seed` when given, otherwise from the OS.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        Self::seeded(seed.unwrap_or_else(rand::random))
    }
}

/// Uniformly distributed direction.
pub fn unit_vector(rng: &mut impl Rng) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

/// Uniform over the disk's area, not just its rim.
pub fn point_in_disk(rng: &mut impl Rng, radius: f32) -> Vec2 {
    let r = radius * rng.r#gen::<f32>().sqrt();
    unit_vector(rng) * r
}

/// Inclusive range that tolerates `lo == hi`.
pub fn range_inclusive(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    rng.gen_range(lo..=hi)
}
