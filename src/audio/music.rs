use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;

use crate::core::config::GameConfig;

#[derive(Component)]
pub struct BackgroundMusic;

/// Looping soundtrack kept across scenes; starts at launch or when a config reload enables it.
pub struct MusicPlugin;

impl Plugin for MusicPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_music)
            .add_systems(Update, follow_volume_config.run_if(resource_changed::<GameConfig>));
    }
}

fn start_music(mut commands: Commands, server: Res<AssetServer>, cfg: Res<GameConfig>) {
    if !cfg.audio.enabled {
        info!(target: "audio", "Music disabled by config");
        return;
    }
    spawn_music(&mut commands, &server, &cfg);
}

fn spawn_music(commands: &mut Commands, server: &AssetServer, cfg: &GameConfig) {
    let audio = &cfg.audio;
    commands.spawn((
        Name::new("BackgroundMusic"),
        BackgroundMusic,
        AudioPlayer::new(server.load(audio.music.clone())),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(audio.volume.clamp(0.0, 1.0))),
    ));
    info!(target: "audio", "Playing '{}' at volume {:.2}", audio.music, audio.volume);
}

/// Applies config changes: volume on the playing track, or starts it when music
/// was switched on after launch.
fn follow_volume_config(
    mut commands: Commands,
    server: Res<AssetServer>,
    cfg: Res<GameConfig>,
    players: Query<(), With<BackgroundMusic>>,
    mut sinks: Query<&mut AudioSink, With<BackgroundMusic>>,
) {
    if cfg.audio.enabled && players.is_empty() {
        spawn_music(&mut commands, &server, &cfg);
        return;
    }
    let volume = if cfg.audio.enabled {
        cfg.audio.volume.clamp(0.0, 1.0)
    } else {
        0.0
    };
    for mut sink in &mut sinks {
        sink.set_volume(Volume::Linear(volume));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn music_app(enabled: bool) -> App {
        let mut cfg = GameConfig::default();
        cfg.audio.enabled = enabled;
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<AudioSource>()
            .insert_resource(cfg)
            .add_plugins(MusicPlugin);
        app.update();
        app
    }

    fn music_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world
            .query_filtered::<(), With<BackgroundMusic>>()
            .iter(world)
            .count()
    }

    #[test]
    fn enabling_music_later_starts_it_once() {
        let mut app = music_app(false);
        assert_eq!(music_count(&mut app), 0);

        app.world_mut().resource_mut::<GameConfig>().audio.enabled = true;
        app.update();
        assert_eq!(music_count(&mut app), 1);

        app.world_mut().resource_mut::<GameConfig>().audio.volume = 0.2;
        app.update();
        assert_eq!(music_count(&mut app), 1);
    }

    #[test]
    fn enabled_music_starts_at_launch() {
        let mut app = music_app(true);
        assert_eq!(music_count(&mut app), 1);
    }
}
