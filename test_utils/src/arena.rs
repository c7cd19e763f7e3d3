//! Headless arena fixture.

use std::time::Duration;

use bevy::math::Ray3d;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use pursuit::config::{ArenaSettings, EnemySettings};
use pursuit::input::AxisSettings;
use pursuit::{
    ActiveState, DamageTaken, Enemy, GameOverText, GameStatus, Health, PointerRay, Player,
};

/// Length of one fixed tick, matching Bevy's default 64 Hz timestep.
pub const FIXED_STEP: Duration = Duration::from_micros(15_625);

/// Settings with axes that reach full deflection within a single frame.
#[must_use]
pub fn instant_axes() -> AxisSettings {
    AxisSettings {
        sensitivity: 1_000.0,
        gravity: 1_000.0,
        snap: true,
    }
}

/// Settings for a player alone in the arena.
#[must_use]
pub fn empty_arena() -> ArenaSettings {
    ArenaSettings {
        enemies: Vec::new(),
        input: instant_axes(),
        ..ArenaSettings::default()
    }
}

/// Settings for a single enemy placed at `x` on the X axis.
#[must_use]
pub fn lone_enemy_at(x: f32, speed: f32, contact_damage: bool) -> ArenaSettings {
    let enemy = EnemySettings {
        spawn: [x, 0.0, 0.0],
        speed,
        contact_damage: if contact_damage {
            EnemySettings::default().contact_damage
        } else {
            None
        },
    };
    ArenaSettings {
        enemies: vec![enemy],
        ..empty_arena()
    }
}

/// Headless app running the arena plugin on a manual clock.
#[derive(Debug)]
pub struct ArenaHarness {
    app: App,
}

impl ArenaHarness {
    /// Builds the app and runs the startup frame, which spawns the scene.
    #[must_use]
    pub fn new(settings: ArenaSettings) -> Self {
        Self::with_frame_time(settings, FIXED_STEP)
    }

    /// Like [`ArenaHarness::new`], but every frame advances the clock by
    /// `frame_time`, so one update may hold several fixed ticks.
    #[must_use]
    pub fn with_frame_time(settings: ArenaSettings, frame_time: Duration) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(frame_time))
            .add_plugins(pursuit::ArenaPlugin::new(settings));
        app.finish();
        app.cleanup();
        app.update();
        Self { app }
    }

    /// Advances the app by `frames` updates. With the default frame time each
    /// update holds one fixed tick unless virtual time is paused.
    pub fn tick(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    /// Mutable access to the underlying app.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// The world of the underlying app.
    #[must_use]
    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Holds `key` down until [`ArenaHarness::release_keys`].
    pub fn press(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    /// Releases every key and forgets this frame's edges.
    pub fn release_keys(&mut self) {
        let mut keyboard = self.app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release_all();
        keyboard.clear();
    }

    /// Presses `key` for exactly one frame.
    pub fn tap(&mut self, key: KeyCode) {
        self.press(key);
        self.app.update();
        let mut keyboard = self.app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(key);
        keyboard.clear();
    }

    /// Clicks the left mouse button for exactly one frame.
    pub fn click(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        self.app.update();
        let mut mouse = self.app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        mouse.release(MouseButton::Left);
        mouse.clear();
    }

    /// Deals `amount` damage to the player immediately.
    pub fn damage_player(&mut self, amount: u32) {
        let target = self.player();
        self.app
            .world_mut()
            .trigger(DamageTaken { target, amount });
    }

    /// Points the cursor along `ray`, or away from the window with `None`.
    pub fn point(&mut self, ray: Option<Ray3d>) {
        self.app.world_mut().insert_resource(PointerRay(ray));
    }

    /// The single player entity.
    ///
    /// # Panics
    /// Panics unless exactly one player exists.
    pub fn player(&mut self) -> Entity {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<Entity, With<Player>>();
        query
            .single(world)
            .unwrap_or_else(|e| panic!("expected one player: {e}"))
    }

    /// Every enemy entity.
    pub fn enemies(&mut self) -> Vec<Entity> {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<Entity, With<Enemy>>();
        query.iter(world).collect()
    }

    /// Transform of `entity`.
    ///
    /// # Panics
    /// Panics if `entity` has no transform.
    #[must_use]
    pub fn transform(&self, entity: Entity) -> Transform {
        *self
            .world()
            .get::<Transform>(entity)
            .unwrap_or_else(|| panic!("{entity:?} has no transform"))
    }

    /// Remaining health of the player.
    pub fn player_health(&mut self) -> i32 {
        let player = self.player();
        self.world()
            .get::<Health>(player)
            .map_or_else(|| panic!("player has no health"), |health| health.current)
    }

    /// Current round status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        *self.world().resource::<GameStatus>()
    }

    /// Whether the game-over text is showing.
    pub fn game_over_text_active(&mut self) -> bool {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&ActiveState, With<GameOverText>>();
        query.iter(world).any(|active| active.0)
    }

    /// Whether virtual time is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.world().resource::<Time<Virtual>>().is_paused()
    }
}
