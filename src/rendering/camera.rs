use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::core::config::GameConfig;

/// Colour of the bars around the letterboxed canvas.
const LETTERBOX: Color = Color::BLACK;
const BACKDROP_Z: f32 = -10.0;

/// Marker for the camera that frames the logical canvas.
#[derive(Component)]
pub struct GameCamera;

/// Solid quad covering exactly the canvas; the window outside it shows the letterbox.
#[derive(Component)]
pub struct CanvasBackdrop;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(LETTERBOX))
            .add_systems(Startup, (setup_camera, spawn_backdrop));
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<GameConfig>) {
    // AutoMin keeps the whole canvas visible at any window aspect, scaled uniformly.
    commands.spawn((
        Name::new("GameCamera"),
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: cfg.canvas.width,
                min_height: cfg.canvas.height,
            },
            ..OrthographicProjection::default_2d()
        }),
        GameCamera,
    ));
}

fn spawn_backdrop(mut commands: Commands, cfg: Res<GameConfig>) {
    let color = cfg.canvas.background_color().unwrap_or_else(|e| {
        warn!(target: "config", "{e}; using default background");
        Color::srgb_u8(0x4a, 0x30, 0x52)
    });
    commands.spawn((
        Name::new("CanvasBackdrop"),
        CanvasBackdrop,
        Sprite::from_color(color, cfg.canvas.size()),
        Transform::from_xyz(0.0, 0.0, BACKDROP_Z),
    ));
}
