//! Enemy chase controller.
//!
//! Enemies close in on their [`ChaseTarget`] every fixed tick until they are
//! within [`crate::ENGAGE_DISTANCE`]. Enemies carrying [`ContactDamage`] hurt
//! the target while they hold that position.
use bevy::prelude::*;

use crate::body::BodyMotion;
use crate::components::{ChaseTarget, ContactDamage, Enemy, Health, MoveSpeed};
use crate::health::DamageTaken;
use crate::vector_math::{chase_step, look_rotation};
use crate::ENGAGE_DISTANCE;

/// Steps every enemy toward its target and turns it to face the target.
///
/// Enemies inside the engage distance, or whose target no longer exists,
/// request nothing.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn enemy_chase_system(
    time: Res<Time>,
    targets: Query<&Transform>,
    mut enemies: Query<(&Transform, &ChaseTarget, &MoveSpeed, &mut BodyMotion), With<Enemy>>,
) {
    let delta = time.delta_secs();
    for (transform, target, speed, mut motion) in &mut enemies {
        let Ok(target_transform) = targets.get(target.0) else {
            continue;
        };
        let position = transform.translation;
        let Some(step) = chase_step(position, target_transform.translation, delta, speed.0)
        else {
            continue;
        };
        motion.move_position(position + step);
        if let Some(rotation) = look_rotation(target_transform.translation - position) {
            motion.move_rotation(rotation);
        }
    }
}

/// Lets enemies in contact with a living target deal their contact damage.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn contact_damage_system(
    mut commands: Commands,
    time: Res<Time>,
    targets: Query<(&Transform, &Health)>,
    mut enemies: Query<(&Transform, &ChaseTarget, &mut ContactDamage), With<Enemy>>,
) {
    for (transform, target, mut contact) in &mut enemies {
        contact.tick(time.delta());
        let Ok((target_transform, health)) = targets.get(target.0) else {
            continue;
        };
        let in_contact =
            transform.translation.distance(target_transform.translation) <= ENGAGE_DISTANCE;
        if in_contact && health.is_alive() && contact.is_ready() {
            commands.trigger(DamageTaken {
                target: target.0,
                amount: contact.strike(),
            });
        }
    }
}
