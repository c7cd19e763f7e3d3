//! Presentation layer: camera, meshes, HUD and the pointer ray.
//!
//! `PresentationPlugin` is a passive observer of simulation state. It dresses
//! scene entities with meshes as they appear, keeps the HUD in step with
//! [`HealthSlider`] and the game-over [`ActiveState`], and turns the cursor
//! position into the [`PointerRay`] the player controller aims with.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::components::{ActiveState, Enemy, GameOverText, Player};
use crate::health::HealthSlider;
use crate::input::PointerRay;
use crate::raycast::GroundSurface;

/// Marker component for the camera the pointer ray is cast from.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct ArenaCamera;

/// Marker for the HUD text showing the player's health.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthLabel;

/// Mesh and material handles shared by every dressed entity.
#[derive(Resource, Debug, Clone)]
struct ArenaAssets {
    capsule: Handle<Mesh>,
    nose: Handle<Mesh>,
    player: Handle<StandardMaterial>,
    enemy: Handle<StandardMaterial>,
    ground: Handle<StandardMaterial>,
}

/// Plugin owning the camera, meshes and HUD.
///
/// Add it alongside [`crate::ArenaPlugin`] and `DefaultPlugins`.
#[derive(Debug)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ArenaCamera>();
        app.add_systems(Startup, setup_presentation);
        app.add_systems(PreUpdate, update_pointer_ray_system);
        app.add_systems(
            Update,
            (
                dress_characters_system,
                dress_ground_system,
                dress_game_over_text_system,
                sync_game_over_visibility_system,
                update_health_label_system,
            )
                .chain(),
        );
    }
}

fn setup_presentation(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("ArenaCamera"),
        ArenaCamera,
        Camera3d::default(),
        Tonemapping::Reinhard,
        Transform::from_xyz(0.0, 24.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 20.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Name::new("HealthLabel"),
        HealthLabel,
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    commands.insert_resource(ArenaAssets {
        capsule: meshes.add(Capsule3d::new(1.0, 1.0)),
        nose: meshes.add(Cuboid::new(0.4, 0.4, 0.8)),
        player: materials.add(Color::srgb(0.2, 0.5, 0.9)),
        enemy: materials.add(Color::srgb(0.8, 0.2, 0.2)),
        ground: materials.add(Color::srgb(0.3, 0.45, 0.3)),
    });
}

/// Casts the cursor into the world through the arena camera.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn update_pointer_ray_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<ArenaCamera>>,
    mut pointer: ResMut<PointerRay>,
) {
    let ray = windows.single().ok().and_then(|window| {
        let cursor = window.cursor_position()?;
        let (camera, transform) = cameras.single().ok()?;
        camera.viewport_to_world(transform, cursor).ok()
    });
    pointer.0 = ray;
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn dress_characters_system(
    mut commands: Commands,
    assets: Res<ArenaAssets>,
    added: Query<(Entity, Has<Player>), Or<(Added<Player>, Added<Enemy>)>>,
) {
    for (entity, is_player) in &added {
        let material = if is_player {
            assets.player.clone()
        } else {
            assets.enemy.clone()
        };
        commands
            .entity(entity)
            .insert(Visibility::default())
            .with_child((
                Mesh3d(assets.capsule.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.0, 1.5, 0.0),
            ))
            .with_child((
                Mesh3d(assets.nose.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, 2.0, -1.0),
            ));
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn dress_ground_system(
    mut commands: Commands,
    assets: Res<ArenaAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    added: Query<(Entity, &GroundSurface), Added<GroundSurface>>,
) {
    for (entity, surface) in &added {
        let size = surface.half_extents * 2.0;
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(size.x, size.y))),
            MeshMaterial3d(assets.ground.clone()),
        ));
    }
}

fn dress_game_over_text_system(
    mut commands: Commands,
    added: Query<(Entity, &ActiveState), Added<GameOverText>>,
) {
    for (entity, active) in &added {
        commands.entity(entity).insert((
            Text::new("Game Over\nClick to restart"),
            TextFont {
                font_size: 48.0,
                ..default()
            },
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(40.0),
                left: Val::Percent(38.0),
                ..default()
            },
            visibility(*active),
        ));
    }
}

fn sync_game_over_visibility_system(
    mut texts: Query<(&ActiveState, &mut Visibility), (With<GameOverText>, Changed<ActiveState>)>,
) {
    for (active, mut shown) in &mut texts {
        *shown = visibility(*active);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn update_health_label_system(
    slider: Res<HealthSlider>,
    mut labels: Query<&mut Text, With<HealthLabel>>,
) {
    if !slider.is_changed() {
        return;
    }
    for mut text in &mut labels {
        text.0 = format!(
            "Health {} / {} ({:.0}%)",
            slider.value.max(0),
            slider.max,
            slider.fraction() * 100.0
        );
    }
}

const fn visibility(active: ActiveState) -> Visibility {
    if active.0 {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}
