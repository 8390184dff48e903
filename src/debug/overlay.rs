#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use bevy::sprite::Anchor;

#[cfg(feature = "debug")]
use super::state::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::canvas::Canvas;
#[cfg(feature = "debug")]
use crate::core::config::GameConfig;

#[cfg(feature = "debug")]
#[derive(Component)]
pub struct DebugOverlayText;

#[cfg(feature = "debug")]
pub fn debug_overlay_spawn(mut commands: Commands, cfg: Res<GameConfig>) {
    let canvas = Canvas::from_config(&cfg);
    let bottom_left = canvas.point_to_world(Vec2::new(4.0, cfg.canvas.height - 4.0));
    commands.spawn((
        Name::new("DebugOverlay"),
        DebugOverlayText,
        Text2d::new(""),
        TextFont {
            font_size: 8.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 0.6, 0.9)),
        Anchor::BottomLeft,
        Transform::from_translation(bottom_left.extend(90.0)),
        Visibility::Hidden,
    ));
}

#[cfg(feature = "debug")]
pub fn debug_overlay_update(
    state: Res<DebugState>,
    stats: Res<DebugStats>,
    mut q: Query<(&mut Text2d, &mut Visibility), With<DebugOverlayText>>,
) {
    let Ok((mut text, mut vis)) = q.single_mut() else {
        return;
    };
    vis.set_if_neq(if state.overlay_visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    });
    if !state.overlay_visible {
        return;
    }
    let hp = stats
        .flower_hp
        .map_or_else(|| "-".to_string(), |h| h.to_string());
    text.0 = format!(
        "fps {:.0}  blooms {} (mature {}, cut {})  hp {}  score {}",
        stats.fps, stats.bloom_count, stats.mature_count, stats.cut_count, hp, stats.score
    );
}
