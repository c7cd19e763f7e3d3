//! Utility helpers for tests.
//!
//! Builds headless arena apps whose clock advances by exactly one fixed
//! timestep per update, so every `tick` runs `FixedUpdate` once.
pub mod arena;

pub use arena::{ArenaHarness, FIXED_STEP};
