#![cfg(feature = "debug")]
use bevy::prelude::*;
use bloom::debug::keys::debug_key_input_system;
use bloom::debug::DebugState;
use bloom::interaction::inputmap::systems::system_evaluate_bindings;
use bloom::interaction::inputmap::types::InputMap;

#[test]
fn f1_toggles_overlay() {
    let mut app = App::new();
    app.insert_resource(ButtonInput::<KeyCode>::default());
    app.init_resource::<InputMap>();
    app.init_resource::<DebugState>();
    app.add_systems(Update, (system_evaluate_bindings, debug_key_input_system).chain());

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::F1);
    app.update();
    assert!(app.world().resource::<DebugState>().overlay_visible);

    // Held: no repeat toggle.
    app.update();
    assert!(app.world().resource::<DebugState>().overlay_visible);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::F1);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::F1);
    app.update();
    assert!(!app.world().resource::<DebugState>().overlay_visible);
}
