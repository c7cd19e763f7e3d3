//! Player controller: input-driven movement, pointer aiming and restart.
use bevy::prelude::*;
use log::{debug, info};

use crate::body::BodyMotion;
use crate::components::{Health, Locomotion, MoveDirection, MoveSpeed, Player};
use crate::config::ArenaSettings;
use crate::input::{InputAxes, PointerRay};
use crate::raycast::{cast_ground_ray, GroundSurface, LayerMask, PhysicsLayer};
use crate::scene::LoadScene;
use crate::vector_math::{aim_offset, look_rotation, movement_step, planar_direction};

type GroundQuery<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform, &'static GroundSurface, &'static PhysicsLayer)>;

/// Turns the current axes into the player's movement direction and running flag.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn player_input_system(
    axes: Res<InputAxes>,
    mut players: Query<(&mut MoveDirection, &mut Locomotion), With<Player>>,
) {
    let direction = planar_direction(axes.horizontal, axes.vertical);
    for (mut move_direction, mut locomotion) in &mut players {
        move_direction.0 = direction;
        let running = direction != Vec3::ZERO;
        if locomotion.running != running {
            debug!("player running: {running}");
            locomotion.running = running;
        }
    }
}

/// Requests a scene reload when Fire is pressed after the player has died.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn restart_on_fire_system(
    mut commands: Commands,
    axes: Res<InputAxes>,
    players: Query<&Health, With<Player>>,
) {
    if !axes.fire_pressed {
        return;
    }
    if players.iter().any(|health| !health.is_alive()) {
        info!("restart requested");
        commands.trigger(LoadScene::arena());
    }
}

/// Moves the player along its direction by `direction × Δt × speed`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn player_move_system(
    time: Res<Time>,
    mut players: Query<(&Transform, &MoveDirection, &MoveSpeed, &mut BodyMotion), With<Player>>,
) {
    let delta = time.delta_secs();
    for (transform, direction, speed, mut motion) in &mut players {
        motion.move_position(movement_step(
            transform.translation,
            direction.0,
            delta,
            speed.0,
        ));
    }
}

/// Turns the player to face the ground point under the pointer.
///
/// The pointer ray only hits surfaces on [`LayerMask::GROUND`] within the
/// configured aim distance. A miss leaves the rotation unchanged.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn player_aim_system(
    pointer: Res<PointerRay>,
    settings: Res<ArenaSettings>,
    ground: GroundQuery,
    mut players: Query<(&Transform, &mut BodyMotion), With<Player>>,
) {
    let Some(ray) = pointer.0 else {
        return;
    };
    let Some(hit) = cast_ground_ray(ray, settings.aim_max_distance, LayerMask::GROUND, &ground)
    else {
        return;
    };
    for (transform, mut motion) in &mut players {
        if let Some(rotation) = look_rotation(aim_offset(hit.point, transform.translation)) {
            motion.move_rotation(rotation);
        }
    }
}
