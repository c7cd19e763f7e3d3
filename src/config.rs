//! Arena settings loaded from JSON.
//!
//! Every field has a default, so a settings file only needs the values it
//! changes. Loaded settings are validated before use.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::components::ContactDamage;
use crate::input::AxisSettings;
use crate::{
    AIM_MAX_DISTANCE, DEFAULT_CONTACT_DAMAGE, DEFAULT_CONTACT_INTERVAL_SECS,
    DEFAULT_ENEMY_SPEED, DEFAULT_PLAYER_SPEED, STARTING_HEALTH,
};

/// Errors raised while loading or validating [`ArenaSettings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings from {}: {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings were not valid JSON for [`ArenaSettings`].
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value was outside its permitted range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Player tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Movement speed in units per second.
    pub speed: f32,
    /// Starting hit points.
    pub health: i32,
    /// Spawn position in world space.
    pub spawn: [f32; 3],
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PLAYER_SPEED,
            health: STARTING_HEALTH,
            spawn: [0.0; 3],
        }
    }
}

/// Damage an enemy deals on contact.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactDamageSettings {
    /// Hit points removed per hit.
    pub amount: u32,
    /// Seconds between hits.
    pub interval_secs: f32,
}

impl Default for ContactDamageSettings {
    fn default() -> Self {
        Self {
            amount: DEFAULT_CONTACT_DAMAGE,
            interval_secs: DEFAULT_CONTACT_INTERVAL_SECS,
        }
    }
}

impl ContactDamageSettings {
    /// Builds the runtime component for these settings.
    ///
    /// An interval that cannot be represented falls back to the default.
    #[must_use]
    pub fn component(&self) -> ContactDamage {
        let interval = Duration::try_from_secs_f32(self.interval_secs)
            .unwrap_or_else(|_| Duration::from_secs_f32(DEFAULT_CONTACT_INTERVAL_SECS));
        ContactDamage::new(self.amount, interval)
    }
}

/// One enemy placed in the arena.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    /// Spawn position in world space.
    pub spawn: [f32; 3],
    /// Movement speed in units per second.
    pub speed: f32,
    /// Damage dealt while touching the player; `None` for a harmless chaser.
    pub contact_damage: Option<ContactDamageSettings>,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            spawn: [10.0, 0.0, 10.0],
            speed: DEFAULT_ENEMY_SPEED,
            contact_damage: Some(ContactDamageSettings::default()),
        }
    }
}

impl EnemySettings {
    fn at(x: f32, z: f32) -> Self {
        Self {
            spawn: [x, 0.0, z],
            ..Self::default()
        }
    }
}

/// Extent of the walkable ground.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroundSettings {
    /// Half size of the ground along X and Z.
    pub half_extents: [f32; 2],
    /// Height of the ground plane.
    pub height: f32,
}

impl Default for GroundSettings {
    fn default() -> Self {
        Self {
            half_extents: [20.0, 20.0],
            height: 0.0,
        }
    }
}

/// Complete arena configuration, inserted as a resource by the plugin.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Player tuning.
    pub player: PlayerSettings,
    /// Enemies spawned with the scene.
    pub enemies: Vec<EnemySettings>,
    /// Walkable ground.
    pub ground: GroundSettings,
    /// Input axis response.
    pub input: AxisSettings,
    /// Longest pointer ray considered when aiming.
    pub aim_max_distance: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            enemies: vec![
                EnemySettings::at(12.0, 12.0),
                EnemySettings::at(-12.0, 12.0),
                EnemySettings::at(0.0, -15.0),
            ],
            ground: GroundSettings::default(),
            input: AxisSettings::default(),
            aim_max_distance: AIM_MAX_DISTANCE,
        }
    }
}

impl ArenaSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates settings from `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// errors of [`ArenaSettings::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    /// Checks every value against its permitted range.
    ///
    /// # Errors
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("player.speed", self.player.speed)?;
        if self.player.health <= 0 {
            return Err(invalid("player.health", "must be positive"));
        }
        finite_point("player.spawn", &self.player.spawn)?;

        for (index, enemy) in self.enemies.iter().enumerate() {
            non_negative(&format!("enemies[{index}].speed"), enemy.speed)?;
            finite_point(&format!("enemies[{index}].spawn"), &enemy.spawn)?;
            if let Some(contact) = &enemy.contact_damage {
                positive(
                    &format!("enemies[{index}].contact_damage.interval_secs"),
                    contact.interval_secs,
                )?;
            }
        }

        positive("ground.half_extents[0]", self.ground.half_extents[0])?;
        positive("ground.half_extents[1]", self.ground.half_extents[1])?;
        finite("ground.height", self.ground.height)?;
        non_negative("input.sensitivity", self.input.sensitivity)?;
        non_negative("input.gravity", self.input.gravity)?;
        non_negative("aim_max_distance", self.aim_max_distance)
    }
}

fn invalid(field: &str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_owned(),
        reason,
    }
}

fn finite(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, "must not be negative"));
    }
    Ok(())
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(invalid(field, "must be positive"));
    }
    Ok(())
}

fn finite_point(field: &str, point: &[f32; 3]) -> Result<(), ConfigError> {
    if point.iter().all(|component| component.is_finite()) {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}
