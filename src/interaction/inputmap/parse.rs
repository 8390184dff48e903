use super::types::*;
use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug)]
pub struct ParsedInputConfig {
    pub input_map: InputMap,
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ActionDecl {
    description: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct DebugSection {
    bindings: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, serde::Deserialize)]
struct RootToml {
    actions: Option<BTreeMap<String, ActionDecl>>,
    bindings: Option<BTreeMap<String, Vec<String>>>,
    debug: Option<DebugSection>,
}

/// Parse an action map. Errors are collected; whatever parsed cleanly is kept.
/// `debug_layer` merges the `[debug.bindings]` table on top of `[bindings]`.
pub fn parse_input_toml(raw: &str, debug_layer: bool) -> ParsedInputConfig {
    let mut result = ParsedInputConfig {
        input_map: InputMap::empty(),
        errors: Vec::new(),
    };
    let root: RootToml = match toml::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            result.errors.push(format!("Top-level parse: {e}"));
            return result;
        }
    };

    let mut actions = Vec::new();
    let mut name_to_id = HashMap::new();
    for (name, decl) in root.actions.unwrap_or_default() {
        if !validate_action_name(&name) {
            result
                .errors
                .push(format!("Invalid action name '{name}': must be PascalCase"));
            continue;
        }
        let id = ActionId(actions.len() as u16);
        actions.push(ActionMeta {
            id,
            name: name.clone(),
            description: decl.description.unwrap_or_default(),
        });
        name_to_id.insert(name, id);
    }

    let mut all_bindings: BTreeMap<String, Vec<String>> = root.bindings.unwrap_or_default();
    if debug_layer {
        if let Some(db) = root.debug.and_then(|d| d.bindings) {
            for (k, v) in db {
                all_bindings.entry(k).or_default().extend(v);
            }
        }
    }

    let mut bindings = Vec::new();
    for (action_name, list) in all_bindings {
        let Some(action) = name_to_id.get(&action_name).copied() else {
            result
                .errors
                .push(format!("Binding references unknown action '{action_name}'"));
            continue;
        };
        for spec in &list {
            match parse_binding(spec) {
                Ok(tokens) => bindings.push(Binding { action, tokens }),
                Err(err) => result
                    .errors
                    .push(format!("[binding {action_name} '{spec}'] {err}")),
            }
        }
    }

    result.input_map = InputMap {
        states: vec![ActionState::default(); actions.len()],
        actions,
        name_to_id,
        bindings,
        frame_counter: 0,
    };
    result
}

fn validate_action_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

fn parse_binding(spec: &str) -> Result<SmallVec<[RawBindingToken; 2]>, String> {
    let mut tokens: SmallVec<[RawBindingToken; 2]> = SmallVec::new();
    let mut seen = HashSet::new();
    for part in spec.split('+') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        let token = parse_token(p)?;
        if !seen.insert(token) {
            return Err(format!("Duplicate token in chord: {token:?}"));
        }
        tokens.push(token);
    }
    if tokens.is_empty() {
        return Err("Empty binding".into());
    }
    Ok(tokens)
}

fn parse_token(s: &str) -> Result<RawBindingToken, String> {
    if let Some(rest) = s.strip_prefix("Key:") {
        return parse_keycode(rest).map(RawBindingToken::Key);
    }
    if let Some(rest) = s.strip_prefix("Mouse:") {
        return match rest {
            "Left" => Ok(RawBindingToken::MouseBtn(MouseButton::Left)),
            "Right" => Ok(RawBindingToken::MouseBtn(MouseButton::Right)),
            "Middle" => Ok(RawBindingToken::MouseBtn(MouseButton::Middle)),
            other => Err(format!("Unknown mouse button '{other}'")),
        };
    }
    Err(format!("Unrecognized token '{s}'"))
}

fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    let kc = match name {
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Backspace" => KeyCode::Backspace,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ControlLeft" => KeyCode::ControlLeft,
        "C" | "KeyC" => KeyCode::KeyC,
        "R" | "KeyR" => KeyCode::KeyR,
        "X" | "KeyX" => KeyCode::KeyX,
        "Z" | "KeyZ" => KeyCode::KeyZ,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        other => return Err(format!("Unsupported KeyCode '{other}' (extend parser)")),
    };
    Ok(kc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_map_parses_cleanly() {
        let parsed = parse_input_toml(DEFAULT_INPUT_TOML, true);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let map = parsed.input_map;
        for name in [ACTION_CUT_BLOOM, ACTION_UPROOT_BLOOM, ACTION_ADVANCE, ACTION_TOGGLE_OVERLAY] {
            assert!(map.name_to_id.contains_key(name), "missing {name}");
        }
        assert_eq!(map.bindings_for(ACTION_ADVANCE).count(), 3);
        assert_eq!(map.bindings_for(ACTION_TOGGLE_OVERLAY).count(), 1);
    }

    #[test]
    fn debug_bindings_need_the_debug_layer() {
        let parsed = parse_input_toml(DEFAULT_INPUT_TOML, false);
        assert_eq!(parsed.input_map.bindings_for(ACTION_TOGGLE_OVERLAY).count(), 0);
    }

    #[test]
    fn chords_and_errors() {
        let raw = r#"
            [actions.Cut]
            [actions.lowercase]
            [bindings]
            Cut = ["Key:ShiftLeft + Mouse:Left", "Mouse:Left+Mouse:Left", "Key:Tilde"]
            Missing = ["Key:Space"]
        "#;
        let parsed = parse_input_toml(raw, false);
        let map = &parsed.input_map;
        let cut: Vec<_> = map.bindings_for("Cut").collect();
        assert_eq!(cut.len(), 1);
        assert_eq!(
            cut[0].tokens.as_slice(),
            &[
                RawBindingToken::Key(KeyCode::ShiftLeft),
                RawBindingToken::MouseBtn(MouseButton::Left)
            ]
        );
        let joined = parsed.errors.join("\n");
        assert!(joined.contains("PascalCase"));
        assert!(joined.contains("Duplicate token"));
        assert!(joined.contains("Unsupported KeyCode 'Tilde'"));
        assert!(joined.contains("unknown action 'Missing'"));
    }

    #[test]
    fn broken_toml_reports_and_yields_empty_map() {
        let parsed = parse_input_toml("[actions", false);
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.input_map.actions.is_empty());
    }
}
