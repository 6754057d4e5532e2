//! Tunable gameplay constants.
//!
//! Distances are in pixels (world space), times in seconds, angles in degrees
//! unless the field name says otherwise. Asteroid sizes are unitless scale
//! factors: `1.0` is the base rock.
//!
//! Every field has a default, so a RON override only needs the values it changes:
//!
//! ```ron
//! (lives: 5, spawn_amount: 2)
//! ```

use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::common::pool::PoolConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing tunables: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub physics_hz: f64,
    /// Fixed seed for reproducible runs; random when absent.
    pub seed: Option<u64>,

    // Ship
    pub thrust: f32,
    pub turn_rate: f32,
    pub ship_radius: f32,
    pub ship_linear_damping: f32,
    pub ship_angular_damping: f32,

    // Bullets
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_prewarm: usize,
    pub bullet_capacity: usize,

    // Asteroids
    pub asteroid_min_size: f32,
    pub asteroid_max_size: f32,
    pub asteroid_min_split_size: f32,
    pub asteroid_speed: f32,
    pub asteroid_lifetime: f32,
    pub asteroid_radius: f32,
    pub split_scatter_radius: f32,
    pub asteroid_prewarm: usize,
    pub asteroid_capacity: usize,

    // Spawner
    pub spawn_rate: f32,
    pub spawn_amount: usize,
    pub spawn_distance: f32,
    pub trajectory_variance: f32,

    // Session
    pub lives: u32,
    pub respawn_time: f32,
    pub invincible_time: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            physics_hz: 60.0,
            seed: None,

            thrust: 260.0,
            turn_rate: 7.0,
            ship_radius: 12.0,
            ship_linear_damping: 0.4,
            ship_angular_damping: 3.0,

            bullet_speed: 600.0,
            bullet_lifetime: 10.0,
            bullet_prewarm: 32,
            bullet_capacity: 128,

            asteroid_min_size: 0.5,
            asteroid_max_size: 1.5,
            asteroid_min_split_size: 0.5,
            asteroid_speed: 60.0,
            asteroid_lifetime: 30.0,
            asteroid_radius: 24.0,
            // Half a meter.
            split_scatter_radius: 10.0,
            asteroid_prewarm: 24,
            asteroid_capacity: 256,

            spawn_rate: 2.0,
            spawn_amount: 1,
            // Just past the corners of the 1280x720 view.
            spawn_distance: 760.0,
            trajectory_variance: 15.0,

            lives: 3,
            respawn_time: 3.0,
            invincible_time: 3.0,
        }
    }
}

impl Tunables {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&text)
    }

    pub fn bullet_pool(&self) -> PoolConfig {
        PoolConfig::new(self.bullet_prewarm, self.bullet_capacity)
    }

    pub fn asteroid_pool(&self) -> PoolConfig {
        PoolConfig::new(self.asteroid_prewarm, self.asteroid_capacity)
    }

    #[inline]
    pub fn respawn_delay(&self) -> Duration {
        seconds(self.respawn_time, Self::default().respawn_time)
    }

    #[inline]
    pub fn invincible_delay(&self) -> Duration {
        seconds(self.invincible_time, Self::default().invincible_time)
    }

    #[inline]
    pub fn bullet_lifetime_delay(&self) -> Duration {
        seconds(self.bullet_lifetime, Self::default().bullet_lifetime)
    }

    #[inline]
    pub fn asteroid_lifetime_delay(&self) -> Duration {
        seconds(self.asteroid_lifetime, Self::default().asteroid_lifetime)
    }
}

/// Negative times clamp to zero. Values too large for a `Duration` (such as
/// `inf`) use `fallback`.
fn seconds(value: f32, fallback: f32) -> Duration {
    Duration::try_from_secs_f32(value.max(0.0)).unwrap_or_else(|_| Duration::from_secs_f32(fallback))
}
