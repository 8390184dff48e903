//! Headless app used by the integration tests: rules only, fixed 100 ms frames.
#![allow(dead_code)]
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use bloom::{AppState, GameConfig, RulesPlugin};

pub const FRAME: Duration = Duration::from_millis(100);

pub fn rules_app(cfg: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(ButtonInput::<KeyCode>::default())
        .insert_resource(ButtonInput::<MouseButton>::default())
        .insert_resource(cfg)
        .add_plugins(RulesPlugin);
    app.update();
    app
}

/// Quiet config: one bloom per run, no health ticks unless a test asks for them.
pub fn quiet_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.seed = Some(7);
    cfg.blooms.spawn_interval = 1000.0;
    cfg.health.tick_secs = 1000.0;
    cfg
}

pub fn state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

/// Tap Space: one frame held, one frame released.
pub fn tap_advance(app: &mut App) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::Space);
    app.update();
}

pub fn start_run(app: &mut App) {
    tap_advance(app);
    assert_eq!(state(app), AppState::Rules);
    tap_advance(app);
    assert_eq!(state(app), AppState::Playing);
}

/// Step until `done` holds, failing after `max_frames`.
pub fn run_until(app: &mut App, max_frames: usize, mut done: impl FnMut(&mut App) -> bool) {
    for _ in 0..max_frames {
        if done(app) {
            return;
        }
        app.update();
    }
    assert!(done(app), "condition not reached within {max_frames} frames");
}
