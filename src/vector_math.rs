//! Vector helpers behind movement, aiming and pursuit.
//!
//! Everything here is plain arithmetic on `bevy::math` types so the rules can
//! be unit tested without an `App`.
use bevy::math::{Dir3, Quat, Vec3};
use bevy::transform::components::Transform;

use crate::ENGAGE_DISTANCE;

/// Builds the planar movement direction from the horizontal and vertical axes.
///
/// The axes map onto world X and Z. The result is not normalised, so a
/// diagonal input moves faster than a cardinal one, the same as reading both
/// axes directly.
///
/// # Examples
/// ```
/// use bevy::math::Vec3;
/// use pursuit::vector_math::planar_direction;
///
/// assert_eq!(planar_direction(0.0, 0.0), Vec3::ZERO);
/// assert_eq!(planar_direction(1.0, -0.5), Vec3::new(1.0, 0.0, -0.5));
/// ```
#[must_use]
pub const fn planar_direction(horizontal: f32, vertical: f32) -> Vec3 {
    Vec3::new(horizontal, 0.0, vertical)
}

/// Returns the position reached after moving along `direction` for `delta_secs`.
#[must_use]
pub fn movement_step(position: Vec3, direction: Vec3, delta_secs: f32, speed: f32) -> Vec3 {
    position + direction * delta_secs * speed
}

/// Rotation that points an entity's forward axis (`-Z`) along `direction`
/// while keeping `+Y` up.
///
/// Returns `None` for a zero or non-finite direction, where no facing can be
/// derived.
#[must_use]
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let forward = Dir3::new(direction).ok()?;
    Some(Transform::IDENTITY.looking_to(forward, Dir3::Y).rotation)
}

/// Offset from `position` to `hit` projected onto the ground plane.
///
/// The height component is always zero rather than the player's own height,
/// so the facing stays level even when the player stands above `y = 0`.
#[must_use]
pub fn aim_offset(hit: Vec3, position: Vec3) -> Vec3 {
    let offset = hit - position;
    Vec3::new(offset.x, 0.0, offset.z)
}

/// Displacement an enemy at `position` makes toward `target` this tick.
///
/// Returns `None` once the enemy is within [`ENGAGE_DISTANCE`] of the target;
/// otherwise a step of length `delta_secs * speed` along the normalised
/// direction.
///
/// # Examples
/// ```
/// use bevy::math::Vec3;
/// use pursuit::vector_math::chase_step;
///
/// assert!(chase_step(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0, 1.0).is_none());
/// let step = chase_step(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.5, 2.0).unwrap();
/// assert!((step.x - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn chase_step(position: Vec3, target: Vec3, delta_secs: f32, speed: f32) -> Option<Vec3> {
    let to_target = target - position;
    if to_target.length() <= ENGAGE_DISTANCE {
        return None;
    }
    Some(to_target.normalize_or_zero() * delta_secs * speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::idle(0.0, 0.0)]
    #[case::negative_zero(-0.0, -0.0)]
    fn no_input_means_no_direction(#[case] horizontal: f32, #[case] vertical: f32) {
        let direction = planar_direction(horizontal, vertical);
        assert_eq!(direction, Vec3::ZERO);
        let start = Vec3::new(4.0, 1.0, -2.0);
        assert_eq!(movement_step(start, direction, 0.02, 6.0), start);
    }

    #[rstest]
    fn movement_scales_with_delta_and_speed() {
        let next = movement_step(Vec3::ZERO, planar_direction(1.0, 1.0), 0.5, 4.0);
        assert_relative_eq!(next.x, 2.0);
        assert_relative_eq!(next.y, 0.0);
        assert_relative_eq!(next.z, 2.0);
    }

    #[rstest]
    #[case::positive_x(Vec3::X)]
    #[case::negative_z(Vec3::NEG_Z)]
    #[case::diagonal(Vec3::new(3.0, 0.0, -4.0))]
    fn look_rotation_points_forward_along_direction(#[case] direction: Vec3) {
        let rotation = look_rotation(direction).unwrap_or_else(|| panic!("rotation for {direction:?}"));
        let forward = rotation * Vec3::NEG_Z;
        let expected = direction.normalize();
        assert_relative_eq!(forward.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(forward.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(forward.z, expected.z, epsilon = 1e-5);
    }

    #[rstest]
    #[case::zero(Vec3::ZERO)]
    #[case::nan(Vec3::new(f32::NAN, 0.0, 1.0))]
    fn look_rotation_rejects_degenerate_directions(#[case] direction: Vec3) {
        assert!(look_rotation(direction).is_none());
    }

    #[rstest]
    fn aim_offset_ignores_height() {
        let offset = aim_offset(Vec3::new(5.0, 0.0, 5.0), Vec3::new(1.0, 1.5, 2.0));
        assert_eq!(offset, Vec3::new(4.0, 0.0, 3.0));
    }

    #[rstest]
    #[case::touching(Vec3::new(2.5, 0.0, 0.0))]
    #[case::inside(Vec3::new(1.0, 0.0, 1.0))]
    #[case::same_spot(Vec3::ZERO)]
    fn chase_holds_within_engage_distance(#[case] target: Vec3) {
        assert!(chase_step(Vec3::ZERO, target, 1.0, 10.0).is_none());
    }

    #[rstest]
    fn chase_step_has_constant_length() {
        let step = chase_step(Vec3::ZERO, Vec3::new(30.0, 0.0, 40.0), 0.1, 5.0)
            .unwrap_or_else(|| panic!("target is out of range"));
        assert_relative_eq!(step.length(), 0.5, epsilon = 1e-6);
        assert_relative_eq!(step.x, 0.3, epsilon = 1e-6);
        assert_relative_eq!(step.z, 0.4, epsilon = 1e-6);
    }
}
