//! Behavioural tests for loading and reloading the arena scene.

use bevy::prelude::*;
use pursuit::{
    ActiveState, Enemy, GameOverText, GameStatus, LoadScene, Player, SceneMember, ARENA_SCENE,
};
use rstest::{fixture, rstest};
use test_utils::arena::lone_enemy_at;
use test_utils::ArenaHarness;

#[fixture]
fn arena() -> ArenaHarness {
    ArenaHarness::new(lone_enemy_at(10.0, 3.0, false))
}

fn members(arena: &mut ArenaHarness) -> Vec<Entity> {
    let world = arena.app_mut().world_mut();
    let mut query = world.query_filtered::<Entity, With<SceneMember>>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort();
    entities
}

fn first_enemy(arena: &mut ArenaHarness) -> Entity {
    arena
        .enemies()
        .first()
        .copied()
        .unwrap_or_else(|| panic!("arena should hold an enemy"))
}

fn count<F: bevy::ecs::query::QueryFilter>(arena: &mut ArenaHarness) -> usize {
    let world = arena.app_mut().world_mut();
    let mut query = world.query_filtered::<Entity, F>();
    query.iter(world).count()
}

#[rstest]
fn startup_spawns_one_arena(mut arena: ArenaHarness) {
    assert_eq!(count::<With<Player>>(&mut arena), 1);
    assert_eq!(count::<With<Enemy>>(&mut arena), 1);
    assert_eq!(count::<With<GameOverText>>(&mut arena), 1);
    assert!(!arena.game_over_text_active());
    assert_eq!(arena.status(), GameStatus::Playing);
}

#[rstest]
fn unknown_scene_changes_nothing(mut arena: ArenaHarness) {
    let before = members(&mut arena);
    arena.app_mut().world_mut().trigger(LoadScene {
        name: "Menu".to_owned(),
    });
    arena.tick(1);

    assert_eq!(members(&mut arena), before);
}

#[rstest]
fn reload_replaces_every_scene_member(mut arena: ArenaHarness) {
    let enemy = first_enemy(&mut arena);
    arena.tick(20);
    let before = members(&mut arena);

    arena.app_mut().world_mut().trigger(LoadScene::arena());
    arena.tick(1);

    let after = members(&mut arena);
    assert_eq!(after.len(), before.len());
    assert!(after.iter().all(|entity| !before.contains(entity)));

    // The new enemy starts over from its spawn point.
    let fresh = first_enemy(&mut arena);
    assert_ne!(fresh, enemy);
    assert!(arena.transform(fresh).translation.x > 9.9);
}

#[rstest]
fn reload_keeps_entities_outside_the_scene(mut arena: ArenaHarness) {
    let camera_rig = arena
        .app_mut()
        .world_mut()
        .spawn((Name::new("CameraRig"), Transform::default()))
        .id();
    arena.app_mut().world_mut().trigger(LoadScene::arena());
    arena.tick(1);

    assert!(arena.world().get_entity(camera_rig).is_ok());
    assert!(arena.world().get::<SceneMember>(camera_rig).is_none());
}

#[rstest]
fn reload_after_game_over_resumes_play(mut arena: ArenaHarness) {
    arena.damage_player(200);
    assert!(arena.is_paused());

    arena.app_mut().world_mut().trigger(LoadScene {
        name: ARENA_SCENE.to_owned(),
    });
    arena.tick(1);

    assert!(!arena.is_paused());
    assert_eq!(arena.status(), GameStatus::Playing);
    let world = arena.app_mut().world_mut();
    let mut texts = world.query_filtered::<&ActiveState, With<GameOverText>>();
    assert!(texts.iter(world).all(|active| !active.0));
}
