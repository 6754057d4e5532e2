//! Explosion effects and the screen-shake intent they feed.
//!
//! Effects are presentation only: gameplay never reads them back. An explosion
//! swells and fades over a short timer and then despawns itself. Each one also
//! adds trauma to [`ScreenShake`], which the camera turns into an offset.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

const EXPLOSION_SECS: f32 = 0.45;
const EXPLOSION_Z: f32 = 5.0;
const EXPLOSION_BASE_SIZE: f32 = 36.0;
const SHAKE_DECAY_PER_SEC: f32 = 1.4;

#[derive(Component, Debug, Clone)]
pub struct Explosion {
    timer: Timer,
    scale: f32,
}

/// Camera shake intensity in `[0, 1]`. Decays on its own.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct ScreenShake {
    trauma: f32,
}

impl ScreenShake {
    #[inline]
    pub fn trauma(&self) -> f32 {
        self.trauma
    }

    #[inline]
    pub fn add(&mut self, amount: f32) {
        self.trauma = (self.trauma + amount).clamp(0.0, 1.0);
    }

    #[inline]
    fn decay(&mut self, dt: f32) {
        self.trauma = (self.trauma - SHAKE_DECAY_PER_SEC * dt).max(0.0);
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ScreenShake>()
        .add_systems(
            Update,
            (animate_explosions, decay_shake).run_if(in_state(GameState::InGame)),
        )
        .add_systems(OnExit(GameState::InGame), |mut shake: ResMut<ScreenShake>| {
            *shake = ScreenShake::default();
        });
}

/// Spawn a burst at `position`; `scale` is relative to a base rock.
pub fn spawn_explosion(commands: &mut Commands, position: Vec2, scale: f32) -> Entity {
    let scale = scale.max(0.1);

    commands
        .spawn((
            Name::new("Explosion"),
            Explosion {
                timer: Timer::from_seconds(EXPLOSION_SECS, TimerMode::Once),
                scale,
            },
            Sprite {
                color: Color::srgba(1.0, 0.7, 0.3, 1.0),
                custom_size: Some(Vec2::splat(EXPLOSION_BASE_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(EXPLOSION_Z))
                .with_scale(Vec3::splat(scale * 0.5)),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn animate_explosions(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut Explosion, &mut Sprite, &mut Transform)>,
) {
    for (e, mut fx, mut sprite, mut tf) in &mut q {
        fx.timer.tick(time.delta());

        let t = fx.timer.fraction();
        tf.scale = Vec3::splat(fx.scale * (0.5 + t));

        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();

        if fx.timer.is_finished() {
            commands.entity(e).despawn();
        }
    }
}

fn decay_shake(time: Res<Time>, mut shake: ResMut<ScreenShake>) {
    shake.decay(time.delta_secs());
}
