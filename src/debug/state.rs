#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub overlay_visible: bool,
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            overlay_visible: false,
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub bloom_count: usize,
    pub mature_count: usize,
    pub cut_count: usize,
    pub flower_hp: Option<i32>,
    pub score: u32,
}
