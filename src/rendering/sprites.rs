use bevy::prelude::*;

use crate::core::components::{BloomGrowth, Flower, FlowerMood};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PresentationSet;

const ASSET_DIR: &str = "assets";
pub const FLOWER_SHEET: &str = "sprites/flower.png";
pub const BLOOM_SHEET: &str = "sprites/bloom.png";
const FLOWER_FRAMES: u32 = 3;

// Flat colours used when no sprite sheets are loaded (headless runs, missing files).
const BLOOM_FALLBACK: [Color; 7] = [
    Color::srgb(0.45, 0.70, 0.40),
    Color::srgb(0.50, 0.72, 0.38),
    Color::srgb(0.62, 0.74, 0.36),
    Color::srgb(0.80, 0.72, 0.40),
    Color::srgb(0.90, 0.60, 0.55),
    Color::srgb(0.95, 0.45, 0.65),
    Color::srgb(0.85, 0.20, 0.55),
];
const FLOWER_FALLBACK: [Color; 3] = [
    Color::srgb(0.98, 0.85, 0.30),
    Color::srgb(0.80, 0.65, 0.30),
    Color::srgb(0.55, 0.40, 0.30),
];

/// Sprite sheets and their grid layouts.
#[derive(Resource, Clone)]
pub struct SpriteAssets {
    pub flower: Handle<Image>,
    pub flower_layout: Handle<TextureAtlasLayout>,
    pub bloom: Handle<Image>,
    pub bloom_layout: Handle<TextureAtlasLayout>,
}

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_sprite_assets).add_systems(
            Update,
            (sync_bloom_frames, sync_flower_frames).in_set(PresentationSet),
        );
    }
}

fn load_sprite_assets(
    mut commands: Commands,
    server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    cfg: Res<GameConfig>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let missing: Vec<&str> = [FLOWER_SHEET, BLOOM_SHEET]
            .into_iter()
            .filter(|p| !std::path::Path::new(ASSET_DIR).join(p).exists())
            .collect();
        if !missing.is_empty() {
            warn!(target: "assets", "Missing sprite sheets {missing:?}; drawing flat colours");
            return;
        }
    }
    let flower_cell = UVec2::new(cfg.flower.width as u32, cfg.flower.height as u32);
    let bloom_cell = UVec2::new(cfg.blooms.width as u32, cfg.blooms.height as u32);
    commands.insert_resource(SpriteAssets {
        flower: server.load(FLOWER_SHEET),
        flower_layout: layouts.add(TextureAtlasLayout::from_grid(
            flower_cell,
            FLOWER_FRAMES,
            1,
            None,
            None,
        )),
        bloom: server.load(BLOOM_SHEET),
        bloom_layout: layouts.add(TextureAtlasLayout::from_grid(
            bloom_cell,
            cfg.blooms.frame_count.max(1) as u32,
            1,
            None,
            None,
        )),
    });
    info!(target: "assets", "Sprite sheets queued: {FLOWER_SHEET}, {BLOOM_SHEET}");
}

pub fn bloom_sprite(assets: Option<&SpriteAssets>, frame: usize, size: Vec2) -> Sprite {
    match assets {
        Some(a) => Sprite {
            custom_size: Some(size),
            ..Sprite::from_atlas_image(
                a.bloom.clone(),
                TextureAtlas {
                    layout: a.bloom_layout.clone(),
                    index: frame,
                },
            )
        },
        None => Sprite::from_color(bloom_fallback_color(frame), size),
    }
}

pub fn flower_sprite(assets: Option<&SpriteAssets>, mood: FlowerMood, size: Vec2) -> Sprite {
    match assets {
        Some(a) => Sprite {
            custom_size: Some(size),
            ..Sprite::from_atlas_image(
                a.flower.clone(),
                TextureAtlas {
                    layout: a.flower_layout.clone(),
                    index: mood.frame(),
                },
            )
        },
        None => Sprite::from_color(flower_fallback_color(mood), size),
    }
}

pub fn flower_fallback_color(mood: FlowerMood) -> Color {
    FLOWER_FALLBACK[mood.frame().min(FLOWER_FALLBACK.len() - 1)]
}

fn bloom_fallback_color(frame: usize) -> Color {
    BLOOM_FALLBACK[frame.min(BLOOM_FALLBACK.len() - 1)]
}

fn set_frame(sprite: &mut Sprite, index: usize, fallback: Color) {
    match sprite.texture_atlas.as_mut() {
        Some(atlas) => atlas.index = index,
        None => sprite.color = fallback,
    }
}

pub fn sync_bloom_frames(mut q: Query<(&BloomGrowth, &mut Sprite), Changed<BloomGrowth>>) {
    for (growth, mut sprite) in &mut q {
        set_frame(&mut sprite, growth.frame, bloom_fallback_color(growth.frame));
    }
}

pub fn sync_flower_frames(
    mut q: Query<(&FlowerMood, &mut Sprite), (With<Flower>, Changed<FlowerMood>)>,
) {
    for (mood, mut sprite) in &mut q {
        set_frame(&mut sprite, mood.frame(), flower_fallback_color(*mood));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::BloomGrowth;

    #[test]
    fn fallback_sprite_tracks_growth() {
        let mut app = App::new();
        app.add_systems(Update, sync_bloom_frames);
        let mut growth = BloomGrowth::new(1.0);
        let e = app
            .world_mut()
            .spawn((growth.clone(), bloom_sprite(None, 0, Vec2::splat(32.0))))
            .id();
        app.update();
        growth.frame = 4;
        app.world_mut().entity_mut(e).insert(growth);
        app.update();
        let sprite = app.world().get::<Sprite>(e).unwrap();
        assert_eq!(sprite.color, BLOOM_FALLBACK[4]);
        assert_eq!(sprite.custom_size, Some(Vec2::splat(32.0)));
    }
}
