use bevy::prelude::*;

/// Marker for pooled bullet entities.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bullet;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    /// Hit something or timed out; the commit step hands it back to the pool.
    PendingReturn,
}
