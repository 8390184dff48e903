use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{Bloom, BloomGrowth, Flower, Health};
use crate::core::config::GameConfig;
use crate::core::system::system_order::SimulationSet;
use crate::gameplay::events::{BloomCut, RuleTick};
use crate::gameplay::rules::health_delta;

/// Drives the once-per-second health rule (and the per-second score).
#[derive(Resource, Deref, DerefMut)]
pub struct HealthClock(pub Timer);

pub struct FlowerHealthPlugin;

impl Plugin for FlowerHealthPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), reset_health_clock)
            .add_systems(
                Update,
                (heal_on_ripe_cut, tick_flower_health)
                    .chain()
                    .in_set(SimulationSet)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}

fn reset_health_clock(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.insert_resource(HealthClock(Timer::from_seconds(
        cfg.health.tick_secs.max(0.05),
        TimerMode::Repeating,
    )));
}

pub fn tick_flower_health(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    clock: Option<ResMut<HealthClock>>,
    blooms: Query<&BloomGrowth, With<Bloom>>,
    mut flower: Query<&mut Health, With<Flower>>,
    mut ticks: EventWriter<RuleTick>,
) {
    let Some(mut clock) = clock else {
        return;
    };
    clock.tick(time.delta());
    let n = clock.times_finished_this_tick();
    if n == 0 {
        return;
    }
    let Ok(mut hp) = flower.single_mut() else {
        return;
    };
    let live = blooms.iter().count();
    let mature = blooms.iter().filter(|g| g.is_mature()).count();
    for _ in 0..n {
        // Ticks past death neither change health nor score.
        if hp.is_dead() {
            break;
        }
        let applied = hp.apply(health_delta(live, mature, &cfg.health));
        debug!(
            target: "health",
            "tick live={live} mature={mature} change={applied} hp={}/{}",
            hp.current, hp.max
        );
        ticks.write(RuleTick {
            live,
            mature,
            health_change: applied,
        });
    }
}

fn heal_on_ripe_cut(mut cuts: EventReader<BloomCut>, mut flower: Query<&mut Health, With<Flower>>) {
    let Ok(mut hp) = flower.single_mut() else {
        cuts.clear();
        return;
    };
    for cut in cuts.read() {
        if cut.reward.heal != 0 && !hp.is_dead() {
            let applied = hp.apply(cut.reward.heal);
            info!(target: "health", "Ripe cut healed {applied} (hp {}/{})", hp.current, hp.max);
        }
    }
}
