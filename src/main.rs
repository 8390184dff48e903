use std::path::PathBuf;

use anyhow::Context;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;

use bloom::interaction::session::config_hot_reload::ConfigReloadSettings;
use bloom::{GameConfig, GamePlugin};

const BASE_CONFIG: &str = "assets/config/game.ron";
const LOCAL_CONFIG: &str = "assets/config/game.local.ron";

#[derive(Parser, Debug)]
#[command(name = "bloom", about = "Keep the flower alive: cut the blooms before they mature")]
struct Cli {
    /// Extra RON config layered over assets/config/game.ron (repeatable, later wins)
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<PathBuf>,
    /// Seed for bloom placement and regrow delays
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds
    #[arg(long, value_name = "SECS")]
    auto_close: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cli = Cli::parse();

    // Explicitly requested files must exist and parse; the shipped layers may be absent.
    for path in &cli.configs {
        GameConfig::load_from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading --config {}", path.display()))?;
    }
    let local = [PathBuf::from(LOCAL_CONFIG)];
    let layers = GameConfig::layer_paths(BASE_CONFIG, &local, &cli.configs);
    let (mut cfg, used, errors) = GameConfig::load_layered(&layers);

    // Hot reload also watches the local layer so creating it later takes effect.
    let mut paths = vec![PathBuf::from(BASE_CONFIG), PathBuf::from(LOCAL_CONFIG)];
    paths.extend(cli.configs.iter().cloned());
    if let Some(seed) = cli.seed {
        cfg.seed = Some(seed);
    }
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }
    let warnings = cfg.validate();

    App::new()
        .insert_resource(cfg.clone())
        .insert_resource(ConfigReloadSettings {
            paths,
            ..default()
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: cfg.window.title.clone(),
                        resolution: (cfg.window.width, cfg.window.height).into(),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn".to_string(),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .add_systems(Startup, move || {
            // Logged once the log plugin is up.
            for p in &used {
                info!(target: "config", "config layer: {p}");
            }
            for e in &errors {
                warn!(target: "config", "{e}");
            }
            for w in &warnings {
                warn!(target: "config", "config: {w}");
            }
        })
        .add_plugins(GamePlugin)
        .run();
    Ok(())
}
