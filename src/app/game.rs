// This file is part of Bloom.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use super::game_over::GameOverPlugin;
use super::menu::MenuPlugin;
use super::state::AppState;
use crate::audio::music::MusicPlugin;
use crate::core::system::system_order::{InputSet, OutcomeSet, PresentationSet, SimulationSet};
#[cfg(feature = "debug")]
use crate::debug::DebugPlugin;
use crate::gameplay::events::GameEventsPlugin;
use crate::gameplay::flower::FlowerPlugin;
use crate::gameplay::growth::BloomGrowthPlugin;
use crate::gameplay::health::FlowerHealthPlugin;
use crate::gameplay::score::ScorePlugin;
use crate::gameplay::spawn::BloomSpawnPlugin;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::hot_reload::InputMapHotReloadPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::interaction::pointer::PointerPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::sprites::SpritesPlugin;

/// Scene flow and game rules. Runs headless (no window, renderer or audio needed);
/// expects a `GameConfig` resource to be inserted before it is added.
pub struct RulesPlugin;

impl Plugin for RulesPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .enable_state_scoped_entities::<AppState>()
            .configure_sets(
                Update,
                (InputSet, SimulationSet, OutcomeSet, PresentationSet).chain(),
            )
            .add_plugins((
                GameEventsPlugin,
                InputActionsPlugin,
                PointerPlugin,
                BloomSpawnPlugin,
                BloomGrowthPlugin,
                FlowerHealthPlugin,
                ScorePlugin,
                FlowerPlugin,
                MenuPlugin,
                GameOverPlugin,
            ));
    }
}

/// Everything: rules plus camera, sprites, HUD, music and session helpers.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RulesPlugin,
            CameraPlugin,
            SpritesPlugin,
            HudPlugin,
            MusicPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
            #[cfg(feature = "debug")]
            DebugPlugin,
            #[cfg(feature = "debug")]
            InputMapHotReloadPlugin,
        ));
    }
}
