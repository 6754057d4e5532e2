//! Asteroid pool and the single launch path shared by waves and splits.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::pool::{Pool, PoolError, PoolHandle, PoolHooks, Pooled};
use crate::common::tunables::Tunables;
use crate::plugins::timers::{GameTimers, Lifetime, TimedAction};

use super::components::{
    ASTEROID_Z, Asteroid, active_asteroid_layers, asteroid_sprite, inactive_asteroid_layers,
};

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct AsteroidPool(pub Pool<Entity>);

/// Everything needed to put one rock in motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidLaunch {
    pub position: Vec2,
    pub size: f32,
    /// Sprite rotation in radians.
    pub heading: f32,
    pub velocity: Vec2,
    /// Index into [`PALETTE`](super::components::PALETTE).
    pub variant: usize,
}

pub struct AsteroidArchetype<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    radius: f32,
}

impl<'a, 'w, 's> AsteroidArchetype<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, radius: f32) -> Self {
        Self { commands, radius }
    }
}

impl PoolHooks<Entity> for AsteroidArchetype<'_, '_, '_> {
    fn create(&mut self) -> Entity {
        self.commands
            .spawn((
                Name::new("Asteroid(Pooled)"),
                Asteroid::default(),
                asteroid_sprite(0, self.radius),
                Transform::from_xyz(0.0, 0.0, ASTEROID_Z),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::circle(self.radius),
                // Mass tracks size, not collider area.
                Mass(1.0),
                NoAutoMass,
                inactive_asteroid_layers(),
                LinearVelocity::ZERO,
                AngularVelocity::ZERO,
                CollisionEventsEnabled,
            ))
            .id()
    }

    fn on_acquire(&mut self, handle: PoolHandle, item: &Entity) {
        self.commands.entity(*item).insert((
            Pooled(handle),
            Visibility::Visible,
            active_asteroid_layers(),
        ));
    }

    fn on_release(&mut self, item: &Entity) {
        self.commands.entity(*item).insert((
            Visibility::Hidden,
            LinearVelocity::ZERO,
            AngularVelocity::ZERO,
            inactive_asteroid_layers(),
        ));
        self.commands.entity(*item).remove::<Lifetime>();
    }

    fn on_dispose(&mut self, item: Entity) {
        self.commands.entity(item).despawn();
    }
}

/// Acquire a rock and apply `launch` to it, starting its lifetime countdown.
pub fn launch_asteroid(
    commands: &mut Commands,
    pool: &mut AsteroidPool,
    timers: &mut GameTimers,
    tunables: &Tunables,
    launch: &AsteroidLaunch,
) -> Result<Entity, PoolError> {
    let radius = tunables.asteroid_radius;
    let handle = pool.acquire(&mut AsteroidArchetype::new(commands, radius))?;
    let e = *pool.get(handle).expect("freshly acquired asteroid handle must resolve");

    let token = timers.schedule(
        tunables.asteroid_lifetime_delay(),
        TimedAction::ExpireAsteroid(handle),
    );

    commands.entity(e).insert((
        Asteroid { size: launch.size },
        asteroid_sprite(launch.variant, radius),
        Transform {
            translation: launch.position.extend(ASTEROID_Z),
            rotation: Quat::from_rotation_z(launch.heading),
            scale: Vec3::new(launch.size, launch.size, 1.0),
        },
        Mass(launch.size),
        LinearVelocity(launch.velocity),
        Lifetime(token),
    ));

    Ok(e)
}

/// Hand a rock back to the pool and cancel its pending expiry.
pub fn retire_asteroid(
    commands: &mut Commands,
    pool: &mut AsteroidPool,
    timers: &mut GameTimers,
    handle: PoolHandle,
    lifetime: Option<&Lifetime>,
) -> Result<(), PoolError> {
    // Release hooks never create, so the radius is irrelevant here.
    pool.release(handle, &mut AsteroidArchetype::new(commands, 0.0))?;
    if let Some(lifetime) = lifetime {
        timers.cancel(lifetime.0);
    }
    Ok(())
}

pub fn init_asteroid_pool(
    mut commands: Commands,
    mut pool: ResMut<AsteroidPool>,
    tunables: Res<Tunables>,
) {
    let n = pool.config().prewarm;
    let created = pool.prewarm(n, &mut AsteroidArchetype::new(&mut commands, tunables.asteroid_radius));
    debug!("asteroid pool prewarmed with {created} instances");
}

pub fn dispose_asteroid_pool(mut commands: Commands, mut pool: ResMut<AsteroidPool>) {
    pool.dispose(&mut AsteroidArchetype::new(&mut commands, 0.0));
}
