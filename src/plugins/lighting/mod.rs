//! Lighting plugin (Firefly) (render-only).
//!
//! A warm light rides on the ship; it goes dark while the ship is dead.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::{Player, PlayerLifeState};

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(
            Update,
            follow_player_light.run_if(in_state(GameState::InGame)),
        );
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: 450.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        Visibility::Visible,
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<(&Transform, &PlayerLifeState), (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<(&mut Transform, &mut Visibility), (With<PlayerLight>, Without<Player>)>,
) {
    let Ok((tf_player, life)) = q_player.single() else {
        return;
    };
    let Ok((mut tf_light, mut vis)) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
    vis.set_if_neq(if *life == PlayerLifeState::Dead {
        Visibility::Hidden
    } else {
        Visibility::Visible
    });
}
