//! Systems for input action evaluation.
use bevy::prelude::*;

use super::types::*;

fn token_pressed(
    token: &RawBindingToken,
    keyboard: Option<&ButtonInput<KeyCode>>,
    mouse: Option<&ButtonInput<MouseButton>>,
) -> bool {
    match token {
        RawBindingToken::Key(k) => keyboard.is_some_and(|kb| kb.pressed(*k)),
        RawBindingToken::MouseBtn(b) => mouse.is_some_and(|m| m.pressed(*b)),
    }
}

/// Recompute every action from the raw button state. Edges are derived from the
/// previous frame's `pressed`, so a held button yields exactly one `just_pressed`.
pub fn system_evaluate_bindings(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut input_map: ResMut<InputMap>,
) {
    let map = &mut *input_map;
    map.frame_counter += 1;
    let mut now_pressed = vec![false; map.states.len()];
    for binding in &map.bindings {
        let active = binding
            .tokens
            .iter()
            .all(|t| token_pressed(t, keyboard.as_deref(), mouse_buttons.as_deref()));
        if active {
            if let Some(slot) = now_pressed.get_mut(binding.action.0 as usize) {
                *slot = true;
            }
        }
    }
    for (state, pressed) in map.states.iter_mut().zip(now_pressed) {
        state.just_pressed = pressed && !state.pressed;
        state.just_released = !pressed && state.pressed;
        state.pressed = pressed;
    }
}
