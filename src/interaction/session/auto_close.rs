use crate::core::config::GameConfig;
use crate::gameplay::score::Score;
use bevy::prelude::*;

/// Exits the app after `window.autoClose` seconds (smoke runs, screenshots).
#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_auto_close).add_systems(
            Update,
            check_auto_close.run_if(resource_exists::<AutoCloseTimer>),
        );
    }
}

fn arm_auto_close(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_auto_close(
    time: Res<Time>,
    mut timer: ResMut<AutoCloseTimer>,
    score: Option<Res<Score>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if timer.tick(time.delta()).just_finished() {
        let score = score.map(|s| s.0).unwrap_or_default();
        info!(score, "AutoClose: timer finished, requesting app exit");
        ev_exit.write(AppExit::Success);
    }
}
