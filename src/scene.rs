//! Scene loading for the arena.
//!
//! There is one scene, [`ARENA_SCENE`]. Loading it replaces every entity
//! tagged with [`SceneMember`] by a fresh arena built from [`ArenaSettings`],
//! resets the round bookkeeping and resumes virtual time.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, info};
use thiserror::Error;

use crate::body::BodyMotion;
use crate::components::{
    ActiveState, ChaseTarget, Enemy, GameOverText, Health, Locomotion, MoveDirection, MoveSpeed,
    Player, SceneMember,
};
use crate::config::ArenaSettings;
use crate::health::{GameStatus, HealthSlider};
use crate::input::InputAxes;
use crate::raycast::{GroundSurface, LayerMask, PhysicsLayer};
use crate::ARENA_SCENE;

/// Request to (re)load the scene called `name`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LoadScene {
    /// Scene to load.
    pub name: String,
}

impl LoadScene {
    /// Request for the arena scene.
    #[must_use]
    pub fn arena() -> Self {
        Self {
            name: ARENA_SCENE.to_owned(),
        }
    }
}

/// Errors raised when a scene request cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// No scene with this name exists.
    #[error("unknown scene `{0}`")]
    Unknown(String),
}

/// Checks that `name` refers to a scene this game can build.
///
/// # Errors
/// Returns [`SceneError::Unknown`] for any name but [`ARENA_SCENE`].
pub fn resolve_scene(name: &str) -> Result<(), SceneError> {
    if name == ARENA_SCENE {
        Ok(())
    } else {
        Err(SceneError::Unknown(name.to_owned()))
    }
}

/// Spawns the arena described by `settings` and returns the player entity.
pub fn spawn_arena(commands: &mut Commands, settings: &ArenaSettings) -> Entity {
    let [half_x, half_z] = settings.ground.half_extents;

    commands.spawn((
        Name::new("Ground"),
        SceneMember,
        GroundSurface {
            half_extents: Vec2::new(half_x, half_z),
        },
        PhysicsLayer(LayerMask::GROUND),
        Transform::from_xyz(0.0, settings.ground.height, 0.0),
    ));

    let player = commands
        .spawn((
            Name::new("Player"),
            SceneMember,
            Player,
            Health::full(settings.player.health),
            MoveSpeed(settings.player.speed),
            MoveDirection::default(),
            Locomotion::default(),
            BodyMotion::default(),
            PhysicsLayer(LayerMask::DEFAULT),
            Transform::from_translation(Vec3::from_array(settings.player.spawn)),
        ))
        .id();

    for (index, enemy) in settings.enemies.iter().enumerate() {
        let mut spawned = commands.spawn((
            Name::new(format!("Enemy {index}")),
            SceneMember,
            Enemy,
            ChaseTarget(player),
            MoveSpeed(enemy.speed),
            BodyMotion::default(),
            PhysicsLayer(LayerMask::DEFAULT),
            Transform::from_translation(Vec3::from_array(enemy.spawn)),
        ));
        if let Some(contact) = &enemy.contact_damage {
            spawned.insert(contact.component());
        }
    }

    commands.spawn((
        Name::new("GameOverText"),
        SceneMember,
        GameOverText,
        ActiveState(false),
    ));

    player
}

/// Observer replacing the current scene with the requested one.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> and Res<T> by value."
)]
pub fn load_scene(
    event: On<LoadScene>,
    mut commands: Commands,
    members: Query<Entity, With<SceneMember>>,
    settings: Res<ArenaSettings>,
    mut slider: ResMut<HealthSlider>,
    mut status: ResMut<GameStatus>,
    mut axes: ResMut<InputAxes>,
    mut time: ResMut<Time<Virtual>>,
) {
    let name = &event.event().name;
    if let Err(e) = resolve_scene(name) {
        error!("scene load failed: {e}");
        return;
    }

    let despawned = members.iter().count();
    for entity in &members {
        commands.entity(entity).despawn();
    }
    spawn_arena(&mut commands, &settings);

    *slider = HealthSlider::from_health(&Health::full(settings.player.health));
    *status = GameStatus::Playing;
    *axes = InputAxes::default();
    time.unpause();
    info!(
        "loaded scene `{name}` ({despawned} entities replaced, {} enemies)",
        settings.enemies.len()
    );
}

/// Starts a session: resumes virtual time and requests the arena scene.
pub fn begin_session_system(mut commands: Commands, mut time: ResMut<Time<Virtual>>) {
    time.unpause();
    commands.trigger(LoadScene::arena());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::arena(ARENA_SCENE, true)]
    #[case::lowercase("game", false)]
    #[case::menu("Menu", false)]
    fn scene_names(#[case] name: &str, #[case] known: bool) {
        assert_eq!(resolve_scene(name).is_ok(), known);
    }

    #[rstest]
    fn unknown_scene_error_names_the_scene() {
        let err = resolve_scene("Credits").err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("unknown scene `Credits`".to_owned())
        );
    }
}
