use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{Layer, non_interacting};
use crate::common::pool::{Pool, PoolHandle, PoolHooks, Pooled};

use super::components::{Bullet, BulletState};

pub const BULLET_RADIUS: f32 = 3.0;
const BULLET_Z: f32 = 2.0;

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct BulletPool(pub Pool<Entity>);

#[inline]
pub fn active_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Bullet, [Layer::Asteroid])
}

/// Inactive bullets keep every physics component; empty filters mean they
/// collide with nothing and never produce collision events.
#[inline]
pub fn inactive_bullet_layers() -> CollisionLayers {
    non_interacting(Layer::Bullet)
}

/// How a bullet entity is built, shown and hidden.
pub struct BulletArchetype<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
}

impl<'a, 'w, 's> BulletArchetype<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>) -> Self {
        Self { commands }
    }
}

impl PoolHooks<Entity> for BulletArchetype<'_, '_, '_> {
    fn create(&mut self) -> Entity {
        self.commands
            .spawn((
                Name::new("Bullet(Pooled)"),
                Bullet,
                BulletState::Inactive,
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(BULLET_RADIUS * 2.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, BULLET_Z),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::circle(BULLET_RADIUS),
                inactive_bullet_layers(),
                LinearVelocity::ZERO,
                CollisionEventsEnabled,
            ))
            .id()
    }

    fn on_acquire(&mut self, handle: PoolHandle, item: &Entity) {
        self.commands.entity(*item).insert((
            Pooled(handle),
            BulletState::Active,
            Visibility::Visible,
            active_bullet_layers(),
        ));
    }

    fn on_release(&mut self, item: &Entity) {
        self.commands.entity(*item).insert((
            BulletState::Inactive,
            Visibility::Hidden,
            LinearVelocity::ZERO,
            inactive_bullet_layers(),
        ));
    }

    fn on_dispose(&mut self, item: Entity) {
        self.commands.entity(item).despawn();
    }
}

/// Activate a bullet at `pos` travelling at `vel`.
pub fn acquire_bullet(
    commands: &mut Commands,
    pool: &mut BulletPool,
    pos: Vec2,
    vel: Vec2,
) -> Option<(PoolHandle, Entity)> {
    let handle = match pool.acquire(&mut BulletArchetype::new(commands)) {
        Ok(handle) => handle,
        Err(err) => {
            // Capacity decision, not a correctness failure.
            debug!("bullet dropped: {err}");
            return None;
        }
    };
    let e = *pool.get(handle).expect("freshly acquired bullet handle must resolve");

    commands.entity(e).insert((
        Transform::from_translation(pos.extend(BULLET_Z))
            .with_rotation(Quat::from_rotation_z(vel.to_angle())),
        LinearVelocity(vel),
    ));

    Some((handle, e))
}

/// Pre-spawn pooled bullets (inactive).
pub fn init_bullet_pool(mut commands: Commands, mut pool: ResMut<BulletPool>) {
    let n = pool.config().prewarm;
    let created = pool.prewarm(n, &mut BulletArchetype::new(&mut commands));
    debug!("bullet pool prewarmed with {created} instances");
}

/// Tear down every bullet when the scene goes away.
pub fn dispose_bullet_pool(mut commands: Commands, mut pool: ResMut<BulletPool>) {
    pool.dispose(&mut BulletArchetype::new(&mut commands));
}
