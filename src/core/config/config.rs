use bevy::prelude::*;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,
            title: "Bloom".into(),
            auto_close: 0.0,
        }
    }
}

/// Logical canvas the game is drawn on; scaled and letterboxed into the window.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    /// Hex colour (`#rrggbb`) filling the canvas area.
    pub background: String,
}
impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 240.0,
            background: "#4a3052".into(),
        }
    }
}
impl CanvasConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn background_color(&self) -> Result<Color, String> {
        Srgba::hex(self.background.trim())
            .map(Color::from)
            .map_err(|e| format!("canvas.background '{}': {e}", self.background))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FlowerConfig {
    /// Top-left corner in canvas space.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub max_health: i32,
}
impl Default for FlowerConfig {
    fn default() -> Self {
        Self {
            x: 144.0,
            y: 104.0,
            width: 32.0,
            height: 32.0,
            max_health: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BloomConfig {
    pub width: f32,
    pub height: f32,
    pub spawn_interval: f32,
    pub max_live: usize,
    pub spawn_attempts: u32,
    /// Seconds per frame of the grow animation.
    pub frame_secs: f32,
    /// Frames in the bloom sprite sheet; the last one is the mature frame.
    pub frame_count: usize,
    /// Blooms above this frame can be cut; a cut resets them to it.
    pub cut_min_frame: usize,
    /// Cutting exactly at this frame heals the flower.
    pub ripe_frame: usize,
    pub regrow_delay: SpawnRange<f32>,
}
impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 32.0,
            spawn_interval: 2.0,
            max_live: 50,
            spawn_attempts: 32,
            frame_secs: 1.0,
            frame_count: 7,
            cut_min_frame: 2,
            ripe_frame: 5,
            regrow_delay: SpawnRange { min: 1.0, max: 3.0 },
        }
    }
}
impl BloomConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn mature_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HealthConfig {
    pub tick_secs: f32,
    /// At or below this many live blooms the flower recovers instead of taking damage.
    pub heal_threshold: usize,
    pub heal_amount: i32,
    /// Damage per mature bloom per tick.
    pub mature_damage: i32,
    /// One extra point of damage per this many live blooms.
    pub crowd_divisor: usize,
    pub wilt_below: i32,
    pub dying_below: i32,
}
impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            tick_secs: 1.0,
            heal_threshold: 3,
            heal_amount: 2,
            mature_damage: 2,
            crowd_divisor: 5,
            wilt_below: 50,
            dying_below: 20,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub per_second: u32,
    pub ripe_heal: i32,
}
impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            ripe_heal: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub music: String,
    pub volume: f32,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music: "music/bloom.ogg".into(),
            volume: 0.5,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub canvas: CanvasConfig,
    pub flower: FlowerConfig,
    pub blooms: BloomConfig,
    pub health: HealthConfig,
    pub scoring: ScoringConfig,
    pub audio: AudioConfig,
    /// Fixed seed for bloom placement and regrow delays; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Layer list for a load: `base`, then each optional layer that exists on disk,
    /// then `required` in order. Missing required layers surface as load errors.
    pub fn layer_paths<'a>(
        base: impl Into<PathBuf>,
        optional: impl IntoIterator<Item = &'a PathBuf>,
        required: impl IntoIterator<Item = &'a PathBuf>,
    ) -> Vec<PathBuf> {
        let mut paths = vec![base.into()];
        paths.extend(optional.into_iter().filter(|p| p.exists()).cloned());
        paths.extend(required.into_iter().cloned());
        paths
    }

    /// Merge several RON files (later files win, maps merge key by key).
    /// Returns the config, the paths that were read and any errors met on the way.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                        match existing {
                            Some(ev) => merge_value(ev, v),
                            None => {
                                bm.insert(k, v);
                            }
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            w.push("canvas dimensions must be > 0".into());
        }
        if let Err(e) = self.canvas.background_color() {
            w.push(e);
        }

        let f = &self.flower;
        if f.max_health <= 0 {
            w.push("flower.max_health must be > 0".into());
        }
        if f.x < 0.0
            || f.y < 0.0
            || f.x + f.width > self.canvas.width
            || f.y + f.height > self.canvas.height
        {
            w.push(format!(
                "flower rect ({}, {}, {}x{}) extends past the {}x{} canvas",
                f.x, f.y, f.width, f.height, self.canvas.width, self.canvas.height
            ));
        }

        let b = &self.blooms;
        if b.width <= 0.0 || b.height <= 0.0 {
            w.push("blooms size must be > 0".into());
        }
        if b.width > self.canvas.width || b.height > self.canvas.height {
            w.push("blooms larger than the canvas; nothing can spawn".into());
        }
        if b.spawn_interval <= 0.0 {
            w.push(format!(
                "blooms.spawn_interval {} must be > 0",
                b.spawn_interval
            ));
        }
        if b.max_live == 0 {
            w.push("blooms.max_live is 0; nothing will spawn".into());
        }
        if b.spawn_attempts == 0 {
            w.push("blooms.spawn_attempts is 0; nothing will spawn".into());
        }
        if b.frame_secs <= 0.0 {
            w.push(format!("blooms.frame_secs {} must be > 0", b.frame_secs));
        }
        if b.frame_count < 2 {
            w.push(format!("blooms.frame_count {} must be >= 2", b.frame_count));
        }
        if b.cut_min_frame >= b.mature_frame() {
            w.push(format!(
                "blooms.cut_min_frame {} must be below the mature frame {}",
                b.cut_min_frame,
                b.mature_frame()
            ));
        }
        if b.ripe_frame <= b.cut_min_frame || b.ripe_frame > b.mature_frame() {
            w.push(format!(
                "blooms.ripe_frame {} outside ({}, {}]; ripe cuts never heal",
                b.ripe_frame,
                b.cut_min_frame,
                b.mature_frame()
            ));
        }
        if b.regrow_delay.min < 0.0 {
            w.push("blooms.regrow_delay.min negative".into());
        }
        if b.regrow_delay.min > b.regrow_delay.max {
            w.push(format!(
                "blooms.regrow_delay min ({}) greater than max ({})",
                b.regrow_delay.min, b.regrow_delay.max
            ));
        }

        let h = &self.health;
        if h.tick_secs <= 0.0 {
            w.push(format!("health.tick_secs {} must be > 0", h.tick_secs));
        }
        if h.crowd_divisor == 0 {
            w.push("health.crowd_divisor is 0 -> crowd damage disabled".into());
        }
        if h.heal_amount < 0 || h.mature_damage < 0 {
            w.push("health.heal_amount / health.mature_damage must not be negative".into());
        }
        if h.dying_below > h.wilt_below {
            w.push(format!(
                "health.dying_below {} above health.wilt_below {}; wilt band is empty",
                h.dying_below, h.wilt_below
            ));
        }

        if !(0.0..=1.0).contains(&self.audio.volume) {
            w.push(format!("audio.volume {} outside 0..1", self.audio.volume));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate_clean() {
        let warnings = GameConfig::default().validate();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn mature_frame_is_last_sheet_frame() {
        let b = BloomConfig::default();
        assert_eq!(b.mature_frame(), 6);
    }

    #[test]
    fn background_hex_parses() {
        let c = CanvasConfig::default();
        assert_eq!(
            c.background_color().unwrap(),
            Color::from(Srgba::rgb_u8(0x4a, 0x30, 0x52))
        );
        let bad = CanvasConfig {
            background: "purple-ish".into(),
            ..default()
        };
        assert!(bad.background_color().is_err());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(blooms: (max_live: 60), health: (heal_amount: 4))").unwrap();
        let cfg = GameConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.blooms.max_live, 60);
        assert_eq!(cfg.blooms.spawn_interval, 2.0);
        assert_eq!(cfg.health.heal_amount, 4);
        assert_eq!(cfg.flower, FlowerConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let (cfg, err) = GameConfig::load_or_default("does/not/exist.ron");
        assert_eq!(cfg, GameConfig::default());
        assert!(err.unwrap().contains("read config"));
    }

    #[test]
    fn validate_flags_inverted_ranges_and_bands() {
        let mut cfg = GameConfig::default();
        cfg.blooms.regrow_delay = SpawnRange { min: 4.0, max: 1.0 };
        cfg.health.dying_below = 70;
        cfg.flower.x = 310.0;
        let joined = cfg.validate().join("\n");
        assert!(joined.contains("regrow_delay"));
        assert!(joined.contains("wilt band is empty"));
        assert!(joined.contains("extends past"));
    }

    #[test]
    fn absent_optional_layers_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("game.local.ron");
        let extra = dir.path().join("extra.ron");
        let optional = [local.clone()];
        let required = [extra.clone()];

        let paths = GameConfig::layer_paths("base.ron", &optional, &required);
        assert_eq!(paths, vec![PathBuf::from("base.ron"), extra.clone()]);

        fs::write(&local, "()").unwrap();
        let paths = GameConfig::layer_paths("base.ron", &optional, &required);
        assert_eq!(paths, vec![PathBuf::from("base.ron"), local, extra]);
    }
}
