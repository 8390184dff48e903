use bevy::input::InputSystem;
use bevy::prelude::*;

use super::parse::parse_input_toml;
use super::systems::system_evaluate_bindings;
use super::types::InputMap;

pub const INPUT_CONFIG_PATH: &str = "assets/config/input.toml";

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputActionUpdateSet;

pub struct InputActionsPlugin;

impl Plugin for InputActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputMap>()
            .configure_sets(PreUpdate, InputActionUpdateSet.after(InputSystem))
            .add_systems(PreStartup, load_initial_input_map)
            .add_systems(PreUpdate, system_evaluate_bindings.in_set(InputActionUpdateSet));
    }
}

pub fn input_config_path() -> String {
    std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| INPUT_CONFIG_PATH.into())
}

fn load_initial_input_map(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")]
    let raw: Option<String> = None;
    #[cfg(not(target_arch = "wasm32"))]
    let raw = std::fs::read_to_string(input_config_path()).ok();
    let Some(raw) = raw else {
        info!(target: "input", "Using built-in input map");
        return;
    };
    let parsed = parse_input_toml(&raw, cfg!(feature = "debug"));
    for e in &parsed.errors {
        error!(target: "input", "INPUT MAP ERROR: {e}");
    }
    info!(target: "input", "Input map loaded: {} actions, {} bindings", parsed.input_map.actions.len(), parsed.input_map.bindings.len());
    commands.insert_resource(parsed.input_map);
}
