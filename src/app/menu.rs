use bevy::prelude::*;

use super::state::AppState;
use crate::interaction::inputmap::types::{InputMap, ACTION_ADVANCE};

const TITLE_FONT_SIZE: f32 = 32.0;
const BODY_FONT_SIZE: f32 = 10.0;
const TEXT_Z: f32 = 10.0;

const RULES_TEXT: &str = "Blooms sprout around your flower.\n\
Left click a grown bloom to cut it;\n\
its size is added to your score.\n\
Cut one at full bud to heal the flower.\n\
Right click uproots a bloom.\n\
Fully grown blooms drain the flower.";

/// Title and rules scenes, plus the `Advance` action that moves between scenes.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Title), spawn_title)
            .add_systems(OnEnter(AppState::Rules), spawn_rules)
            .add_systems(
                Update,
                advance_scene.run_if(not(in_state(AppState::Playing))),
            );
    }
}

/// Centred scene text; `y` is world space (canvas centre = 0).
pub fn scene_text(value: impl Into<String>, font_size: f32, y: f32, state: AppState) -> impl Bundle {
    (
        Text2d::new(value),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0.0, y, TEXT_Z),
        StateScoped(state),
    )
}

fn spawn_title(mut commands: Commands) {
    info!(target: "scene", "=== BLOOM ===");
    commands.spawn((Name::new("TitleText"), scene_text("bloom", TITLE_FONT_SIZE, 24.0, AppState::Title)));
    commands.spawn((
        Name::new("TitlePrompt"),
        scene_text("click to start", BODY_FONT_SIZE, -40.0, AppState::Title),
    ));
}

fn spawn_rules(mut commands: Commands) {
    commands.spawn((Name::new("RulesText"), scene_text(RULES_TEXT, BODY_FONT_SIZE, 16.0, AppState::Rules)));
    commands.spawn((
        Name::new("RulesPrompt"),
        scene_text("click to play", BODY_FONT_SIZE, -80.0, AppState::Rules),
    ));
}

fn advance_scene(
    input_map: Res<InputMap>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !input_map.just_pressed(ACTION_ADVANCE) {
        return;
    }
    if let Some(next) = state.get().advance() {
        info!(target: "scene", "{:?} -> {:?}", state.get(), next);
        next_state.set(next);
    }
}
