pub mod config;

pub use config::{
    AudioConfig, BloomConfig, CanvasConfig, FlowerConfig, GameConfig, HealthConfig, ScoringConfig,
    SpawnRange, WindowConfig,
};
