//! Kinematic body mover.
//!
//! Controllers never write `Transform` directly during a fixed tick. They
//! request a target pose on [`BodyMotion`] and [`apply_body_motion_system`]
//! commits it in `FixedPostUpdate`, after every controller has read the poses
//! of the previous tick.
use bevy::prelude::*;

/// Pose requested for a body at the end of the current fixed tick.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct BodyMotion {
    next_position: Option<Vec3>,
    next_rotation: Option<Quat>,
}

impl BodyMotion {
    /// Requests that the body end the tick at `position`.
    pub const fn move_position(&mut self, position: Vec3) {
        self.next_position = Some(position);
    }

    /// Requests that the body end the tick facing `rotation`.
    pub const fn move_rotation(&mut self, rotation: Quat) {
        self.next_rotation = Some(rotation);
    }

    /// Returns `true` when nothing has been requested this tick.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.next_position.is_none() && self.next_rotation.is_none()
    }

    /// Writes the pending pose into `transform` and clears the request.
    pub const fn commit(&mut self, transform: &mut Transform) {
        if let Some(position) = self.next_position.take() {
            transform.translation = position;
        }
        if let Some(rotation) = self.next_rotation.take() {
            transform.rotation = rotation;
        }
    }
}

/// Applies every pending [`BodyMotion`] request.
pub fn apply_body_motion_system(mut bodies: Query<(&mut BodyMotion, &mut Transform)>) {
    for (mut motion, mut transform) in &mut bodies {
        if motion.is_idle() {
            continue;
        }
        motion.commit(&mut transform);
    }
}
