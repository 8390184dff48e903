//! Central system ordering labels to make the per-frame rule sequence explicit.
//! Stages (all in `Update`):
//! 1. Input (pointer presses resolved against blooms)
//! 2. Simulation (spawning, growth, health and score ticks)
//! 3. Outcome (mood bands, death detection)
//! 4. Presentation (sprite frames, HUD text)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SimulationSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct OutcomeSet; // reads the health/score values settled by SimulationSet

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PresentationSet;
