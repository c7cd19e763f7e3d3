//! Bevy plugin wiring the arena systems into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;
use thiserror::Error;

use crate::audio::{flush_audio_queue_system, AudioQueue};
use crate::body::apply_body_motion_system;
use crate::components::Health;
use crate::config::{ArenaSettings, ConfigError};
use crate::enemy::{contact_damage_system, enemy_chase_system};
use crate::health::{apply_damage, GameStatus, HealthSlider};
use crate::input::{read_input_axes_system, InputAxes, PointerRay};
use crate::player::{
    player_aim_system, player_input_system, player_move_system, restart_on_fire_system,
};
use crate::scene::{begin_session_system, load_scene};

/// Event raised when the plugin had to reject the settings it was given.
///
/// Observers log these events so the fallback to default settings stays
/// visible even when `bevy_log` is disabled.
#[derive(Event, Debug, Error)]
#[error("arena settings rejected, using defaults: {source}")]
pub struct ArenaSetupError {
    /// Why the settings were rejected.
    #[source]
    pub source: ConfigError,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_setup_error(event: On<ArenaSetupError>) {
    error!("{}", event.event());
}

/// Systems run each fixed tick, in order, while [`GameStatus::Playing`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaSet {
    /// Player movement and aiming.
    Player,
    /// Enemy pursuit and contact damage.
    Enemies,
}

/// Bevy plugin installing the player and enemy controllers.
#[derive(Debug, Clone, Default)]
pub struct ArenaPlugin {
    settings: ArenaSettings,
}

impl ArenaPlugin {
    /// Plugin using the given settings.
    #[must_use]
    pub const fn new(settings: ArenaSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_setup_error);
        app.add_observer(apply_damage);
        app.add_observer(load_scene);

        let settings = match self.settings.validate() {
            Ok(()) => self.settings.clone(),
            Err(source) => {
                app.world_mut().trigger(ArenaSetupError { source });
                ArenaSettings::default()
            }
        };

        app.insert_resource(settings.input);
        app.insert_resource(HealthSlider::from_health(&Health::full(
            settings.player.health,
        )));
        app.insert_resource(settings);
        app.init_resource::<InputAxes>();
        app.init_resource::<PointerRay>();
        app.init_resource::<GameStatus>();
        app.init_resource::<AudioQueue>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<ButtonInput<MouseButton>>();

        app.add_systems(Startup, begin_session_system);
        app.add_systems(
            Update,
            (
                (
                    read_input_axes_system,
                    player_input_system,
                    restart_on_fire_system,
                )
                    .chain(),
                flush_audio_queue_system,
            ),
        );

        // Dying pauses virtual time, but fixed steps already owed for the
        // current frame still run. The status gate stops them.
        app.configure_sets(
            FixedUpdate,
            (ArenaSet::Player, ArenaSet::Enemies)
                .chain()
                .run_if(resource_equals(GameStatus::Playing)),
        );
        app.add_systems(
            FixedUpdate,
            (
                (player_move_system, player_aim_system)
                    .chain()
                    .in_set(ArenaSet::Player),
                (enemy_chase_system, contact_damage_system)
                    .chain()
                    .in_set(ArenaSet::Enemies),
            ),
        );
        app.add_systems(FixedPostUpdate, apply_body_motion_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Player;
    use rstest::rstest;

    #[rstest]
    fn plugin_initialises_resources() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ArenaPlugin::default());
        assert!(app.world().contains_resource::<ArenaSettings>());
        assert!(app.world().contains_resource::<HealthSlider>());
        assert!(app.world().contains_resource::<AudioQueue>());
        app.update();

        let world = app.world_mut();
        let mut query = world.query_filtered::<(), With<Player>>();
        assert_eq!(query.iter(world).count(), 1);
    }

    #[rstest]
    fn invalid_settings_fall_back_to_defaults() {
        let mut settings = ArenaSettings::default();
        settings.player.speed = -4.0;
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ArenaPlugin::new(settings));

        assert_eq!(
            app.world().resource::<ArenaSettings>(),
            &ArenaSettings::default()
        );
    }
}
