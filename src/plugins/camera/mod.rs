//! Camera plugin (render-only).
//!
//! The field is centred on the origin, so the camera never follows anything.
//! It only shakes:
//!
//! ```text
//!   ScreenShake.trauma ─▶ apply_screen_shake ─▶ MainCamera.translation = rest + offset
//! ```
//!
//! The offset is recomputed from `rest` every frame, so it never drifts.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::fx::ScreenShake;

const MAX_SHAKE_OFFSET: f32 = 18.0;

#[derive(Component, Debug)]
pub struct MainCamera {
    rest: Vec2,
    phase: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            apply_screen_shake
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { rest: Vec2::ZERO, phase: 0.0 },
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn apply_screen_shake(
    time: Res<Time>,
    shake: Res<ScreenShake>,
    mut q_cam: Query<(&mut Transform, &mut MainCamera)>,
) {
    let Ok((mut tf, mut cam)) = q_cam.single_mut() else {
        return;
    };

    cam.phase += time.delta_secs();
    let strength = shake.trauma() * shake.trauma();

    // Deterministic pseudo-noise (no RNG needed).
    let p = cam.phase * std::f32::consts::TAU;
    let noise = Vec2::new(
        (p * 37.0).sin() + 0.5 * (p * 61.0).sin(),
        (p * 41.0).cos() + 0.5 * (p * 53.0).cos(),
    )
    .clamp_length_max(1.0);

    let offset = noise * MAX_SHAKE_OFFSET * strength;
    tf.translation.x = cam.rest.x + offset.x;
    tf.translation.y = cam.rest.y + offset.y;
}
