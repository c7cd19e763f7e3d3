//! Virtual input axes smoothed from key bindings.
//!
//! Each axis behaves like a classic game-engine virtual axis: it ramps toward
//! the held direction at `sensitivity` units per second, falls back to rest at
//! `gravity` units per second once released and can snap through zero when
//! the direction reverses.
use bevy::math::Ray3d;
use bevy::prelude::*;
use serde::Deserialize;

use crate::{AXIS_DEAD_ZONE, DEFAULT_AXIS_GRAVITY, DEFAULT_AXIS_SENSITIVITY};

/// Tuning for how quickly axes respond to keys.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    /// Units per second the axis moves toward a held key.
    pub sensitivity: f32,
    /// Units per second the axis returns to rest when released.
    pub gravity: f32,
    /// Jump to zero first when the held direction opposes the current value.
    pub snap: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_AXIS_SENSITIVITY,
            gravity: DEFAULT_AXIS_GRAVITY,
            snap: true,
        }
    }
}

/// Smoothed axis values and button edges sampled this frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct InputAxes {
    /// Left/right axis in `[-1, 1]`, positive to the right.
    pub horizontal: f32,
    /// Back/forward axis in `[-1, 1]`, positive forward.
    pub vertical: f32,
    /// Fire was pressed this frame.
    pub fire_pressed: bool,
}

/// World-space ray under the pointer, refreshed by the presentation layer.
///
/// `None` while the cursor is outside the window or no camera exists.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerRay(pub Option<Ray3d>);

/// Raw key states for one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisKeys {
    /// A key for the negative direction is held.
    pub negative: bool,
    /// A key for the positive direction is held.
    pub positive: bool,
}

impl AxisKeys {
    /// Raw target value in `{-1, 0, 1}`. Opposing keys cancel.
    #[must_use]
    pub const fn raw(self) -> f32 {
        match (self.negative, self.positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advances an axis value by one frame toward its raw target.
///
/// # Examples
/// ```
/// use pursuit::input::{advance_axis, AxisSettings};
///
/// let settings = AxisSettings::default();
/// let value = advance_axis(0.0, 1.0, settings, 0.1);
/// assert!((value - 0.3).abs() < 1e-6);
/// assert_eq!(advance_axis(0.2, 0.0, settings, 0.1), 0.0);
/// ```
#[must_use]
pub const fn advance_axis(
    current: f32,
    raw: f32,
    settings: AxisSettings,
    delta_secs: f32,
) -> f32 {
    let next = if raw == 0.0 {
        move_toward(current, 0.0, settings.gravity * delta_secs)
    } else {
        let start = if settings.snap && current * raw < 0.0 {
            0.0
        } else {
            current
        };
        move_toward(start, raw, settings.sensitivity * delta_secs)
    };
    let clamped = next.clamp(-1.0, 1.0);
    if clamped.abs() < AXIS_DEAD_ZONE {
        0.0
    } else {
        clamped
    }
}

const fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let gap = target - current;
    if gap.abs() <= max_delta {
        target
    } else {
        current + gap.signum() * max_delta
    }
}

/// Samples the keyboard and mouse into [`InputAxes`].
///
/// Horizontal reads A/D and the left/right arrows, vertical reads S/W and the
/// down/up arrows. Fire is the left mouse button or left Control.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn read_input_axes_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    settings: Res<AxisSettings>,
    mut axes: ResMut<InputAxes>,
) {
    let horizontal = AxisKeys {
        negative: keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft),
        positive: keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight),
    };
    let vertical = AxisKeys {
        negative: keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown),
        positive: keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp),
    };
    let delta = time.delta_secs();

    axes.horizontal = advance_axis(axes.horizontal, horizontal.raw(), *settings, delta);
    axes.vertical = advance_axis(axes.vertical, vertical.raw(), *settings, delta);
    axes.fire_pressed =
        mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::ControlLeft);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const FRAME: f32 = 0.1;

    #[rstest]
    #[case::rest(AxisKeys::default(), 0.0)]
    #[case::negative(AxisKeys { negative: true, positive: false }, -1.0)]
    #[case::positive(AxisKeys { negative: false, positive: true }, 1.0)]
    #[case::opposing(AxisKeys { negative: true, positive: true }, 0.0)]
    fn raw_axis_values(#[case] keys: AxisKeys, #[case] expected: f32) {
        assert_eq!(keys.raw(), expected);
    }

    #[rstest]
    fn held_key_saturates_at_one() {
        let settings = AxisSettings::default();
        let mut value = 0.0;
        for _ in 0..10 {
            value = advance_axis(value, 1.0, settings, FRAME);
        }
        assert_eq!(value, 1.0);
    }

    #[rstest]
    fn released_axis_returns_to_rest() {
        let settings = AxisSettings::default();
        let first = advance_axis(1.0, 0.0, settings, FRAME);
        assert_relative_eq!(first, 0.7, epsilon = 1e-6);
        let mut value = first;
        for _ in 0..10 {
            value = advance_axis(value, 0.0, settings, FRAME);
        }
        assert_eq!(value, 0.0);
    }

    #[rstest]
    #[case::snapping(true, 0.3)]
    #[case::smooth(false, 0.2)]
    fn reversal_respects_snap(#[case] snap: bool, #[case] expected: f32) {
        let settings = AxisSettings {
            snap,
            ..AxisSettings::default()
        };
        let value = advance_axis(-0.1, 1.0, settings, FRAME);
        assert_relative_eq!(value, expected, epsilon = 1e-6);
    }

    #[rstest]
    fn idle_axis_stays_at_zero() {
        assert_eq!(advance_axis(0.0, 0.0, AxisSettings::default(), FRAME), 0.0);
    }
}
