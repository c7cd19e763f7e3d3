//! Player health, damage intake and the terminal game-over state.
//!
//! Damage arrives as a [`DamageTaken`] event. [`apply_damage`] subtracts it,
//! refreshes the [`HealthSlider`], queues the damage sound and, on the hit
//! that takes the player from alive to dead, pauses virtual time and shows the
//! game-over text. Later hits still subtract but never re-enter game over.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, info, warn};

use crate::audio::{AudioQueue, SoundCue};
use crate::components::{ActiveState, GameOverText, Health, Player};

/// Request to remove `amount` hit points from `target`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageTaken {
    /// Entity losing health.
    pub target: Entity,
    /// Hit points removed.
    pub amount: u32,
}

/// What a single hit did to a health pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health dropped but remains above zero.
    Wounded,
    /// This hit took health from above zero to zero or below.
    Died,
    /// Health was already zero or below before the hit.
    AlreadyDead,
}

/// Subtracts `damage` from `health` and reports the transition.
///
/// Damage is unsigned, so health never rises. Subtraction saturates at
/// `i32::MIN`.
///
/// # Examples
/// ```
/// use pursuit::components::Health;
/// use pursuit::health::{lose_health, DamageOutcome};
///
/// let mut health = Health::full(100);
/// assert_eq!(lose_health(&mut health, 40), DamageOutcome::Wounded);
/// assert_eq!(lose_health(&mut health, 60), DamageOutcome::Died);
/// assert_eq!(health.current, 0);
/// assert_eq!(lose_health(&mut health, 5), DamageOutcome::AlreadyDead);
/// ```
pub const fn lose_health(health: &mut Health, damage: u32) -> DamageOutcome {
    let was_alive = health.is_alive();
    health.current = health.current.saturating_sub_unsigned(damage);
    match (was_alive, health.is_alive()) {
        (true, true) => DamageOutcome::Wounded,
        (true, false) => DamageOutcome::Died,
        (false, _) => DamageOutcome::AlreadyDead,
    }
}

/// Value shown by the on-screen health slider.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSlider {
    /// Player hit points as last reported.
    pub value: i32,
    /// Slider maximum.
    pub max: i32,
}

impl HealthSlider {
    /// Mirrors the given health pool.
    #[must_use]
    pub const fn from_health(health: &Health) -> Self {
        Self {
            value: health.current,
            max: health.max,
        }
    }

    /// Fill of the slider in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "Health values are small enough to be exact in f32."
        )]
        let fraction = self.value.max(0) as f32 / self.max as f32;
        fraction.clamp(0.0, 1.0)
    }
}

impl Default for HealthSlider {
    fn default() -> Self {
        Self::from_health(&Health::default())
    }
}

/// Whether the round is still being played.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The player is alive.
    #[default]
    Playing,
    /// The player died; only a restart leaves this state.
    GameOver,
}

/// Observer applying [`DamageTaken`] events.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub fn apply_damage(
    event: On<DamageTaken>,
    mut targets: Query<(&mut Health, Has<Player>)>,
    mut game_over_texts: Query<&mut ActiveState, With<GameOverText>>,
    mut slider: ResMut<HealthSlider>,
    mut audio: ResMut<AudioQueue>,
    mut status: ResMut<GameStatus>,
    mut time: ResMut<Time<Virtual>>,
) {
    let DamageTaken { target, amount } = *event.event();
    let Ok((mut health, is_player)) = targets.get_mut(target) else {
        warn!("damage of {amount} aimed at {target:?}, which has no health");
        return;
    };

    let outcome = lose_health(&mut health, amount);
    debug!("{target:?} took {amount} damage, {} left", health.current);
    if !is_player {
        return;
    }

    *slider = HealthSlider::from_health(&health);
    audio.play_one_shot(SoundCue::Damage);

    if outcome == DamageOutcome::Died {
        info!("player died; game over");
        *status = GameStatus::GameOver;
        time.pause();
        for mut text in &mut game_over_texts {
            text.0 = true;
        }
    }
}
