use bevy::prelude::*;
use bevy::ecs::message::MessageWriter;

use crate::common::tunables::Tunables;
use crate::plugins::player::{Player, PlayerInput, PlayerLifeState};

use super::messages::SpawnBulletRequest;

/// Producer: turn the fire button into a SpawnBulletRequest message.
///
/// This system intentionally does **not** access BulletPool.
pub fn request_player_bullets(
    input: Res<PlayerInput>,
    tunables: Res<Tunables>,
    q_player: Query<(&Transform, &PlayerLifeState), With<Player>>,
    mut writer: MessageWriter<SpawnBulletRequest>,
) {
    if !input.fire {
        return;
    }

    let (tf, life) = match q_player.single() {
        Ok(v) => v,
        Err(e) => { debug!("No single Player: {e:?}"); return; }
    };
    if *life == PlayerLifeState::Dead {
        return;
    }

    let dir = (tf.rotation * Vec3::Y).truncate().normalize_or(Vec2::Y);
    let pos = tf.translation.truncate() + dir * (tunables.ship_radius + 4.0);

    writer.write(SpawnBulletRequest { pos, dir });
}
