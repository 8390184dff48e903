use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::system::system_order::SimulationSet;
use crate::gameplay::events::{BloomCut, RuleTick};
use crate::gameplay::health::tick_flower_health;
use crate::core::config::GameConfig;

/// Score of the current run. Only ever increases until the run ends.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Deref)]
pub struct Score(pub u32);

impl Score {
    pub fn add(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }
}

/// Score carried into the game over scene.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore(pub u32);

pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Score>()
            .init_resource::<FinalScore>()
            .add_systems(OnEnter(AppState::Playing), reset_score)
            .add_systems(
                Update,
                (award_cuts, award_per_second.after(tick_flower_health))
                    .in_set(SimulationSet)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}

fn reset_score(mut score: ResMut<Score>) {
    *score = Score::default();
}

fn award_per_second(mut ticks: EventReader<RuleTick>, cfg: Res<GameConfig>, mut score: ResMut<Score>) {
    for _ in ticks.read() {
        score.add(cfg.scoring.per_second);
    }
}

fn award_cuts(mut cuts: EventReader<BloomCut>, mut score: ResMut<Score>) {
    for cut in cuts.read() {
        score.add(cut.reward.score);
        debug!(target: "score", "Cut at frame {} scored {} (total {})", cut.frame, cut.reward.score, score.0);
    }
}
