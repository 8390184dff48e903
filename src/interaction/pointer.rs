use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::Rng;
use std::collections::HashSet;

use crate::app::state::AppState;
use crate::core::canvas::Canvas;
use crate::core::components::{Bloom, BloomGrowth, CanvasBox};
use crate::core::config::GameConfig;
use crate::core::system::system_order::InputSet;
use crate::gameplay::events::{BloomCut, BloomUprooted};
use crate::gameplay::rules::{click_outcome, cut_reward, ClickOutcome, PointerAction};
use crate::gameplay::spawn::BloomRng;
use crate::interaction::inputmap::types::{InputMap, ACTION_CUT_BLOOM, ACTION_UPROOT_BLOOM};
use crate::rendering::camera::GameCamera;

/// A pointer press inside the canvas, already mapped to canvas coordinates.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerPressed {
    pub action: PointerAction,
    pub canvas_pos: Vec2,
}

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerPressed>().add_systems(
            Update,
            (emit_pointer_presses, resolve_pointer_presses)
                .chain()
                .in_set(InputSet)
                .run_if(in_state(AppState::Playing)),
        );
    }
}

fn screen_to_canvas(
    screen_pos: Vec2,
    cameras: &Query<(&Camera, &GlobalTransform), With<GameCamera>>,
    canvas: &Canvas,
) -> Option<Vec2> {
    let (camera, cam_tf) = cameras.iter().next()?;
    let world = camera.viewport_to_world_2d(cam_tf, screen_pos).ok()?;
    let p = canvas.world_to_point(world);
    // Presses on the letterbox bars hit nothing.
    canvas.contains(p).then_some(p)
}

fn emit_pointer_presses(
    input_map: Res<InputMap>,
    touches: Option<Res<Touches>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<GameCamera>>,
    cfg: Res<GameConfig>,
    mut presses: EventWriter<PointerPressed>,
) {
    let canvas = Canvas::from_config(&cfg);

    // Touch taps always cut; there is no second button on a touch screen.
    if let Some(touches) = touches.as_deref() {
        for touch in touches.iter_just_pressed() {
            if let Some(canvas_pos) = screen_to_canvas(touch.position(), &cameras, &canvas) {
                presses.write(PointerPressed {
                    action: PointerAction::Cut,
                    canvas_pos,
                });
            }
        }
    }

    let mut actions = Vec::with_capacity(2);
    if input_map.just_pressed(ACTION_CUT_BLOOM) {
        actions.push(PointerAction::Cut);
    }
    if input_map.just_pressed(ACTION_UPROOT_BLOOM) {
        actions.push(PointerAction::Uproot);
    }
    if actions.is_empty() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Some(canvas_pos) = screen_to_canvas(cursor, &cameras, &canvas) else {
        return;
    };
    for action in actions {
        presses.write(PointerPressed { action, canvas_pos });
    }
}

/// Topmost (most recently spawned) bloom containing `point`.
pub fn pick_bloom<'a, I>(point: Vec2, candidates: I) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, &'a CanvasBox, &'a Bloom)>,
{
    candidates
        .into_iter()
        .filter(|(_, rect, _)| rect.contains(point))
        .max_by_key(|(_, _, bloom)| bloom.serial)
        .map(|(entity, _, _)| entity)
}

pub fn resolve_pointer_presses(
    mut commands: Commands,
    mut presses: EventReader<PointerPressed>,
    cfg: Res<GameConfig>,
    mut rng: ResMut<BloomRng>,
    mut blooms: Query<(Entity, &CanvasBox, &Bloom, &mut BloomGrowth)>,
    mut cut_events: EventWriter<BloomCut>,
    mut uproot_events: EventWriter<BloomUprooted>,
) {
    // Despawns are deferred; keep later presses this frame from hitting the same bloom.
    let mut removed: HashSet<Entity> = HashSet::new();
    for press in presses.read() {
        let target = pick_bloom(
            press.canvas_pos,
            blooms
                .iter()
                .filter(|(e, ..)| !removed.contains(e))
                .map(|(e, rect, bloom, _)| (e, rect, bloom)),
        );
        let Some(entity) = target else {
            continue;
        };
        let Ok((_, _, _, mut growth)) = blooms.get_mut(entity) else {
            continue;
        };
        let frame = growth.frame;
        match click_outcome(press.action, frame, &cfg.blooms) {
            ClickOutcome::Cut { to_frame } => {
                let range = &cfg.blooms.regrow_delay;
                let delay = if range.max > range.min {
                    rng.gen_range(range.min..=range.max)
                } else {
                    range.min
                };
                growth.cut(to_frame, delay);
                let reward = cut_reward(frame, &cfg.blooms, &cfg.scoring);
                debug!(target: "input", "Cut bloom {:?} at frame {frame}; regrows in {delay:.2}s", entity);
                cut_events.write(BloomCut {
                    entity,
                    frame,
                    reward,
                });
            }
            ClickOutcome::Uproot => {
                debug!(target: "input", "Uprooted bloom {:?} at frame {frame}", entity);
                commands.entity(entity).despawn();
                removed.insert(entity);
                uproot_events.write(BloomUprooted { entity, frame });
            }
        }
    }
}
