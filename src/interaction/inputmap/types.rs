use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

use super::parse::parse_input_toml;

pub const ACTION_CUT_BLOOM: &str = "CutBloom";
pub const ACTION_UPROOT_BLOOM: &str = "UprootBloom";
pub const ACTION_ADVANCE: &str = "Advance";
pub const ACTION_TOGGLE_OVERLAY: &str = "ToggleOverlay";

/// Shipped bindings, used when no input file is found on disk.
pub const DEFAULT_INPUT_TOML: &str = include_str!("../../../assets/config/input.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u16); // index into `InputMap::actions`

#[derive(Debug, Clone)]
pub struct ActionMeta {
    pub id: ActionId,
    pub name: String,
    pub description: String,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionState {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawBindingToken {
    Key(KeyCode),
    MouseBtn(MouseButton),
}

/// All tokens must be held for the binding to be active (a chord when more than one).
#[derive(Debug, Clone)]
pub struct Binding {
    pub action: ActionId,
    pub tokens: SmallVec<[RawBindingToken; 2]>,
}

#[derive(Resource, Debug, Clone)]
pub struct InputMap {
    pub actions: Vec<ActionMeta>,
    pub name_to_id: HashMap<String, ActionId>,
    pub bindings: Vec<Binding>,
    pub states: Vec<ActionState>,
    pub frame_counter: u64,
}

impl Default for InputMap {
    fn default() -> Self {
        parse_input_toml(DEFAULT_INPUT_TOML, cfg!(feature = "debug")).input_map
    }
}

impl InputMap {
    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            name_to_id: HashMap::new(),
            bindings: Vec::new(),
            states: Vec::new(),
            frame_counter: 0,
        }
    }

    pub fn state(&self, name: &str) -> Option<&ActionState> {
        self.name_to_id.get(name).and_then(|id| self.states.get(id.0 as usize))
    }
    pub fn pressed(&self, name: &str) -> bool {
        self.state(name).is_some_and(|s| s.pressed)
    }
    pub fn just_pressed(&self, name: &str) -> bool {
        self.state(name).is_some_and(|s| s.just_pressed)
    }
    pub fn just_released(&self, name: &str) -> bool {
        self.state(name).is_some_and(|s| s.just_released)
    }
    pub fn bindings_for(&self, name: &str) -> impl Iterator<Item = &Binding> {
        let id = self.name_to_id.get(name).copied();
        self.bindings.iter().filter(move |b| Some(b.action) == id)
    }
}
