use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::app::state::AppState;
use crate::core::canvas::Canvas;
use crate::core::components::{Flower, Health};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PresentationSet;
use crate::gameplay::score::Score;

const HUD_Z: f32 = 50.0;
const HUD_FONT_SIZE: f32 = 12.0;
const HUD_MARGIN: f32 = 4.0;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct HealthText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), spawn_hud).add_systems(
            Update,
            (update_score_text, update_health_text)
                .in_set(PresentationSet)
                .run_if(in_state(AppState::Playing)),
        );
    }
}

pub fn hud_text(value: impl Into<String>) -> impl Bundle {
    (
        Text2d::new(value),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

fn spawn_hud(mut commands: Commands, cfg: Res<GameConfig>) {
    let canvas = Canvas::from_config(&cfg);
    let top_left = canvas.point_to_world(Vec2::splat(HUD_MARGIN));
    let top_right = canvas.point_to_world(Vec2::new(cfg.canvas.width - HUD_MARGIN, HUD_MARGIN));
    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        hud_text("score: 0"),
        Anchor::TopLeft,
        Transform::from_translation(top_left.extend(HUD_Z)),
        StateScoped(AppState::Playing),
    ));
    commands.spawn((
        Name::new("HealthText"),
        HealthText,
        hud_text(format!("hp: {}", cfg.flower.max_health)),
        Anchor::TopRight,
        Transform::from_translation(top_right.extend(HUD_Z)),
        StateScoped(AppState::Playing),
    ));
}

fn update_score_text(score: Res<Score>, mut q: Query<&mut Text2d, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = format!("score: {}", score.0);
    }
}

fn update_health_text(
    flower: Query<&Health, (With<Flower>, Changed<Health>)>,
    mut q: Query<&mut Text2d, With<HealthText>>,
) {
    let Ok(hp) = flower.single() else {
        return;
    };
    for mut text in &mut q {
        text.0 = format!("hp: {}", hp.current);
    }
}
