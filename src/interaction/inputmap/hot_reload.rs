#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use std::path::PathBuf;

#[cfg(feature = "debug")]
use super::parse::parse_input_toml;
#[cfg(feature = "debug")]
use super::plugin::input_config_path;
#[cfg(feature = "debug")]
use super::types::InputMap;
#[cfg(feature = "debug")]
use crate::interaction::session::file_watch::FileWatch;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
struct InputReloadState {
    watch: FileWatch,
    timer: Timer,
}
#[cfg(feature = "debug")]
impl FromWorld for InputReloadState {
    fn from_world(_: &mut World) -> Self {
        let mut watch = FileWatch::new(vec![PathBuf::from(input_config_path())]);
        watch.prime();
        Self {
            watch,
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

/// Re-reads the input map when its file changes (debug builds, native only).
#[cfg(feature = "debug")]
pub struct InputMapHotReloadPlugin;
#[cfg(feature = "debug")]
impl Plugin for InputMapHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        app.init_resource::<InputReloadState>()
            .add_systems(Update, poll_input_map_reload);
    }
}

#[cfg(feature = "debug")]
fn poll_input_map_reload(
    time: Res<Time>,
    mut state: ResMut<InputReloadState>,
    mut input_map: ResMut<InputMap>,
) {
    if !state.timer.tick(time.delta()).just_finished() || !state.watch.poll() {
        return;
    }
    let Some(path) = state.watch.paths.first() else {
        return;
    };
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(target: "input", "INPUT HOT-RELOAD read error: {e}");
            return;
        }
    };
    let parsed = parse_input_toml(&raw, true);
    if !parsed.errors.is_empty() {
        for e in parsed.errors {
            warn!(target: "input", "INPUT HOT-RELOAD parse error: {e}");
        }
        return;
    }
    *input_map = parsed.input_map;
    info!(target: "input", "Input map hot-reloaded");
}
