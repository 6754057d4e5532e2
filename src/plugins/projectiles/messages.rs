//! Buffered spawn requests.
//!
//! Producers (the ship's trigger) only write intent. The allocator is the
//! single writer that pops the pool and activates entities.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnBulletRequest {
    pub pos: Vec2,
    /// Unit direction of travel.
    pub dir: Vec2,
}
