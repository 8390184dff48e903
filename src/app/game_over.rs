use bevy::prelude::*;

use super::menu::scene_text;
use super::state::AppState;
use crate::gameplay::score::FinalScore;

pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::GameOver), spawn_game_over);
    }
}

fn spawn_game_over(mut commands: Commands, final_score: Res<FinalScore>) {
    info!(target: "scene", "Game over with score {}", final_score.0);
    commands.spawn((
        Name::new("GameOverText"),
        scene_text("you lose", 24.0, 32.0, AppState::GameOver),
    ));
    commands.spawn((
        Name::new("FinalScoreText"),
        scene_text(format!("score: {}", final_score.0), 12.0, 0.0, AppState::GameOver),
    ));
    commands.spawn((
        Name::new("RestartPrompt"),
        scene_text("click to try again", 10.0, -40.0, AppState::GameOver),
    ));
}
