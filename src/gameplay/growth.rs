use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{Bloom, BloomGrowth};
use crate::core::config::GameConfig;
use crate::core::system::system_order::SimulationSet;

/// Emitted when a bloom reaches its last frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct BloomMatured(pub Entity);

pub struct BloomGrowthPlugin;

impl Plugin for BloomGrowthPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BloomMatured>().add_systems(
            Update,
            advance_bloom_growth
                .in_set(SimulationSet)
                .run_if(in_state(AppState::Playing)),
        );
    }
}

pub fn advance_bloom_growth(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut q: Query<(Entity, &mut BloomGrowth), With<Bloom>>,
    mut matured: EventWriter<BloomMatured>,
) {
    let mature_frame = cfg.blooms.mature_frame();
    for (entity, mut growth) in &mut q {
        if growth.is_mature() {
            continue;
        }
        growth.tick(time.delta(), mature_frame);
        if growth.is_mature() {
            debug!(target: "spawn", "Bloom {:?} matured", entity);
            matured.write(BloomMatured(entity));
        }
    }
}
