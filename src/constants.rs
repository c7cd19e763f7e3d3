//! Gameplay constants shared across systems.
//!
//! Tunable values live in [`crate::config::ArenaSettings`]; the values here are
//! fixed rules of the arena.

/// Distance at which an enemy stops closing in on its target.
///
/// Player and enemy capsules both have a radius of one unit, so anything
/// inside this distance counts as contact.
pub const ENGAGE_DISTANCE: f32 = 2.5;
/// Health a freshly spawned player starts with.
pub const STARTING_HEALTH: i32 = 100;
/// Maximum length of the pointer ray used for aiming.
pub const AIM_MAX_DISTANCE: f32 = 100.0;
/// Name of the scene the restart action reloads.
pub const ARENA_SCENE: &str = "Game";
/// Default movement speed of the player in units per second.
pub const DEFAULT_PLAYER_SPEED: f32 = 6.0;
/// Default movement speed of an enemy in units per second.
pub const DEFAULT_ENEMY_SPEED: f32 = 3.0;
/// Default damage dealt by an enemy touching the player.
pub const DEFAULT_CONTACT_DAMAGE: u32 = 10;
/// Default delay between two contact hits from the same enemy.
pub const DEFAULT_CONTACT_INTERVAL_SECS: f32 = 1.0;
/// Default rate, in units per second, at which an input axis follows a held key.
pub const DEFAULT_AXIS_SENSITIVITY: f32 = 3.0;
/// Default rate, in units per second, at which a released axis returns to rest.
pub const DEFAULT_AXIS_GRAVITY: f32 = 3.0;
/// Axis magnitude below which an axis is treated as centred.
pub const AXIS_DEAD_ZONE: f32 = 0.001;
