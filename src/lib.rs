#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the Pursuit arena game logic.
//! Re-exports the controllers, components and plugin for the main application
//! and tests.
pub mod audio;
pub mod body;
pub mod components;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod health;
pub mod input;
pub mod logging;
pub mod player;
pub mod plugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub mod raycast;
pub mod scene;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use body::{apply_body_motion_system, BodyMotion};
pub use components::{
    ActiveState, ChaseTarget, ContactDamage, Enemy, GameOverText, Health, Locomotion,
    MoveDirection, MoveSpeed, Player, SceneMember,
};
pub use config::{ArenaSettings, ConfigError};
pub use health::{lose_health, DamageOutcome, DamageTaken, GameStatus, HealthSlider};
pub use input::{InputAxes, PointerRay};
pub use logging::init as init_logging;
pub use plugin::{ArenaPlugin, ArenaSet};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::PresentationPlugin;
pub use scene::{LoadScene, SceneError};
pub use vector_math::{chase_step, look_rotation, movement_step, planar_direction};
