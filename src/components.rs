//! ECS component types used by the game.
//! Includes the player and enemy markers, health, movement state and the
//! scene bookkeeping shared between systems.
use std::time::Duration;

use bevy::prelude::*;

use crate::STARTING_HEALTH;

/// Marker for the player-controlled character.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Player;

/// Marker for a pursuing enemy.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Enemy;

/// Hit points of a character. Zero or below means dead.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    /// Remaining hit points.
    pub current: i32,
    /// Hit points at spawn, used to scale the health slider.
    pub max: i32,
}

impl Health {
    /// Creates a full health pool of `max` points.
    #[must_use]
    pub const fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Returns `true` while hit points remain.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.current > 0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::full(STARTING_HEALTH)
    }
}

/// Movement speed in world units per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct MoveSpeed(pub f32);

/// Planar direction derived from input this frame.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct MoveDirection(pub Vec3);

/// Animation parameters driven by gameplay.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Locomotion {
    /// Whether the running animation should play.
    pub running: bool,
}

/// Entity an enemy pursues.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Deref)]
pub struct ChaseTarget(pub Entity);

/// Damage an enemy deals to its target while in contact.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactDamage {
    /// Hit points removed per hit.
    pub amount: u32,
    /// Minimum time between two hits.
    pub interval: Duration,
    ready_in: Duration,
}

impl ContactDamage {
    /// Damage of `amount` that may land once every `interval`.
    ///
    /// The first hit lands on the first tick of contact.
    #[must_use]
    pub const fn new(amount: u32, interval: Duration) -> Self {
        Self {
            amount,
            interval,
            ready_in: Duration::ZERO,
        }
    }

    /// Advances the cooldown by `delta`.
    pub const fn tick(&mut self, delta: Duration) {
        self.ready_in = self.ready_in.saturating_sub(delta);
    }

    /// Returns `true` once the cooldown has elapsed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready_in.is_zero()
    }

    /// Lands a hit, restarting the cooldown, and returns its damage.
    pub const fn strike(&mut self) -> u32 {
        self.ready_in = self.interval;
        self.amount
    }
}

/// Marker for the text shown once the player dies.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameOverText;

/// Whether a scene object is currently active.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq, Deref, DerefMut)]
pub struct ActiveState(pub bool);

/// Tags entities owned by the loaded scene so a reload can replace them.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SceneMember;
