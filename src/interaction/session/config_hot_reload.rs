use bevy::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

use super::file_watch::FileWatch;
use crate::core::config::GameConfig;
use crate::gameplay::health::HealthClock;
use crate::gameplay::spawn::SpawnClock;

/// Layered config files to watch (later files override earlier ones).
#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    watch: FileWatch,
    timer: Timer,
}
impl FromWorld for ConfigReloadState {
    fn from_world(world: &mut World) -> Self {
        let settings = world
            .get_resource::<ConfigReloadSettings>()
            .cloned()
            .unwrap_or_default();
        let mut watch = FileWatch::new(settings.paths);
        watch.prime();
        Self {
            watch,
            timer: Timer::from_seconds(settings.interval_secs.max(0.05), TimerMode::Repeating),
        }
    }
}

pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Update, poll_and_reload_config);
        }
    }
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut windows: Query<&mut Window>,
    spawn_clock: Option<ResMut<SpawnClock>>,
    health_clock: Option<ResMut<HealthClock>>,
) {
    if !state.timer.tick(time.delta()).just_finished() || !state.watch.poll() {
        return;
    }
    let (mut new_cfg, _used, errors) =
        GameConfig::load_layered(settings.paths.iter().filter(|p| p.exists()));
    for e in errors {
        warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}");
    }
    // The seed only matters at startup (and may come from the command line).
    new_cfg.seed = cfg_res.seed;
    if *cfg_res == new_cfg {
        return;
    }
    for w in new_cfg.validate() {
        warn!(target: "config", "config: {w}");
    }
    if let Some(mut clock) = spawn_clock {
        clock.set_duration(Duration::from_secs_f32(new_cfg.blooms.spawn_interval.max(0.05)));
    }
    if let Some(mut clock) = health_clock {
        clock.set_duration(Duration::from_secs_f32(new_cfg.health.tick_secs.max(0.05)));
    }
    if let Ok(mut window) = windows.single_mut() {
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    info!(target: "config", "Config hot-reload applied");
    *cfg_res = new_cfg;
}
