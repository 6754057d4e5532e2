//! HUD plugin (render-only): score, life icons and the game-over panel.
//!
//! Everything here is derived from [`Session`]; nothing writes back.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::session::Session;

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct LifeIcon(u32);

#[derive(Component)]
struct GameOverPanel;

#[derive(Component)]
struct FinalScoreText;

#[derive(Component)]
struct HiScoreText;

const TEXT_COLOR: Color = Color::srgb(0.92, 0.92, 0.95);
const ICON_COLOR: Color = Color::srgb(0.2, 0.75, 0.9);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(
            Update,
            (update_score, update_lives, update_game_over)
                .run_if(in_state(GameState::InGame).and(resource_changed::<Session>)),
        );
}

fn label(text: impl Into<String>, size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont { font_size: size, ..default() },
        TextColor(TEXT_COLOR),
    )
}

fn spawn_hud(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        label("0", 28.0),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(12.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));

    commands
        .spawn((
            Name::new("Lives"),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                column_gap: Val::Px(6.0),
                ..default()
            },
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|row| {
            for i in 0..tunables.lives {
                row.spawn((
                    LifeIcon(i),
                    Node {
                        width: Val::Px(14.0),
                        height: Val::Px(20.0),
                        ..default()
                    },
                    BackgroundColor(ICON_COLOR),
                ));
            }
        });

    commands
        .spawn((
            Name::new("GameOverPanel"),
            GameOverPanel,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(10.0),
                ..default()
            },
            Visibility::Hidden,
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|panel| {
            panel.spawn(label("GAME OVER", 56.0));
            panel.spawn((FinalScoreText, label("", 30.0)));
            panel.spawn((HiScoreText, label("", 30.0)));
            panel.spawn(label("Press Space to play again", 20.0));
        });
}

fn update_score(session: Res<Session>, mut q: Query<&mut Text, With<ScoreText>>) {
    for mut text in &mut q {
        text.0 = session.score.to_string();
    }
}

fn update_lives(session: Res<Session>, mut q: Query<(&LifeIcon, &mut Visibility)>) {
    for (icon, mut vis) in &mut q {
        vis.set_if_neq(if icon.0 < session.lives {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

fn update_game_over(
    session: Res<Session>,
    mut q_panel: Query<&mut Visibility, With<GameOverPanel>>,
    mut q_final: Query<&mut Text, (With<FinalScoreText>, Without<HiScoreText>)>,
    mut q_hi: Query<&mut Text, (With<HiScoreText>, Without<FinalScoreText>)>,
) {
    for mut vis in &mut q_panel {
        vis.set_if_neq(if session.game_over {
            Visibility::Visible
        } else {
            Visibility::Hidden
        });
    }
    if !session.game_over {
        return;
    }
    for mut text in &mut q_final {
        text.0 = format!("Final Score: {}", session.score);
    }
    for mut text in &mut q_hi {
        text.0 = format!("Hi-Score: {}", session.hi_score);
    }
}
