#[cfg(feature = "debug")]
use super::state::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::{Bloom, BloomGrowth, BloomPhase, Flower, Health};
#[cfg(feature = "debug")]
use crate::gameplay::score::Score;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_blooms: Query<&BloomGrowth, With<Bloom>>,
    q_flower: Query<&Health, With<Flower>>,
    score: Option<Res<Score>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    stats.fps = if stats.fps == 0.0 {
        inst_fps
    } else {
        stats.fps * 0.9 + inst_fps * 0.1
    };
    let inst_ms = dt * 1000.0;
    stats.frame_time_ms = if stats.frame_time_ms == 0.0 {
        inst_ms
    } else {
        stats.frame_time_ms * 0.9 + inst_ms * 0.1
    };
    stats.bloom_count = q_blooms.iter().count();
    stats.mature_count = q_blooms.iter().filter(|g| g.is_mature()).count();
    stats.cut_count = q_blooms
        .iter()
        .filter(|g| matches!(g.phase, BloomPhase::Cut { .. }))
        .count();
    stats.flower_hp = q_flower.single().ok().map(|h| h.current);
    stats.score = score.map(|s| s.0).unwrap_or_default();
}
