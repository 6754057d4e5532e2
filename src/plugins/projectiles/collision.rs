use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Bullet, BulletState};
use super::pool::inactive_bullet_layers;

/// Any contact ends an active bullet. The commit step recycles it.
///
/// The bullet stops colliding right away, so later fixed steps in the same
/// frame cannot hit anything else before the commit runs.
pub fn retire_bullets_on_impact(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut q_bullets: Query<&mut BulletState, With<Bullet>>,
) {
    for ev in started.read() {
        for collider in [ev.collider1, ev.collider2] {
            let Ok(mut state) = q_bullets.get_mut(collider) else {
                continue;
            };
            // A second contact in the same step finds it already pending.
            if *state == BulletState::Active {
                *state = BulletState::PendingReturn;
                commands.entity(collider).insert(inactive_bullet_layers());
            }
        }
    }
}
