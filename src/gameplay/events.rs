use bevy::prelude::*;

use crate::gameplay::rules::CutReward;

/// A grown bloom had its head cut off.
#[derive(Event, Debug, Clone, Copy)]
pub struct BloomCut {
    pub entity: Entity,
    /// Frame shown when the bloom was clicked.
    pub frame: usize,
    pub reward: CutReward,
}

/// A bloom was destroyed outright.
#[derive(Event, Debug, Clone, Copy)]
pub struct BloomUprooted {
    pub entity: Entity,
    pub frame: usize,
}

/// One health/score tick (once per `health.tick_secs`).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTick {
    pub live: usize,
    pub mature: usize,
    pub health_change: i32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FlowerDied {
    pub final_score: u32,
}

pub struct GameEventsPlugin;

impl Plugin for GameEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BloomCut>()
            .add_event::<BloomUprooted>()
            .add_event::<RuleTick>()
            .add_event::<FlowerDied>();
    }
}
