use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::canvas::{Canvas, CanvasRect};
use crate::core::components::{CanvasBox, Flower, FlowerMood, Health};
use crate::core::config::GameConfig;
use crate::core::system::system_order::OutcomeSet;
use crate::gameplay::events::FlowerDied;
use crate::gameplay::rules::mood_for;
use crate::gameplay::score::{FinalScore, Score};
use crate::rendering::sprites::{flower_sprite, SpriteAssets};

const FLOWER_Z: f32 = 1.0;

pub struct FlowerPlugin;

impl Plugin for FlowerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), spawn_flower).add_systems(
            Update,
            (update_flower_mood, detect_flower_death)
                .chain()
                .in_set(OutcomeSet)
                .run_if(in_state(AppState::Playing)),
        );
    }
}

fn spawn_flower(mut commands: Commands, cfg: Res<GameConfig>, sprites: Option<Res<SpriteAssets>>) {
    let f = &cfg.flower;
    let rect = CanvasRect::new(Vec2::new(f.x, f.y), Vec2::new(f.width, f.height));
    let health = Health::full(f.max_health.max(1));
    let mood = mood_for(health.current, &cfg.health);
    let world = Canvas::from_config(&cfg).rect_to_world(&rect);
    commands.spawn((
        Name::new("Flower"),
        Flower,
        health,
        mood,
        CanvasBox(rect),
        flower_sprite(sprites.as_deref(), mood, rect.size),
        Transform::from_translation(world.extend(FLOWER_Z)),
        StateScoped(AppState::Playing),
    ));
    info!(target: "scene", "Flower planted with {} hp", health.max);
}

pub fn update_flower_mood(
    cfg: Res<GameConfig>,
    mut q: Query<(&Health, &mut FlowerMood), (With<Flower>, Changed<Health>)>,
) {
    for (hp, mut mood) in &mut q {
        let next = mood_for(hp.current, &cfg.health);
        if mood.set_if_neq(next) {
            info!(target: "health", "Flower is now {:?} ({} hp)", next, hp.current);
        }
    }
}

pub fn detect_flower_death(
    mut commands: Commands,
    q: Query<&Health, (With<Flower>, Changed<Health>)>,
    score: Res<Score>,
    mut next_state: ResMut<NextState<AppState>>,
    mut died: EventWriter<FlowerDied>,
) {
    if !q.iter().any(Health::is_dead) {
        return;
    }
    info!(target: "scene", "Flower died; final score {}", score.0);
    commands.insert_resource(FinalScore(score.0));
    died.write(FlowerDied {
        final_score: score.0,
    });
    next_state.set(AppState::GameOver);
}
