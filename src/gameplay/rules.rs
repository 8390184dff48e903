//! Pure game rules. Systems gather counts from the world and call into these.
use bevy::prelude::*;
use rand::Rng;

use crate::core::canvas::CanvasRect;
use crate::core::components::FlowerMood;
use crate::core::config::{BloomConfig, HealthConfig, ScoringConfig};

/// What the player asked to do with the bloom under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Cut,
    Uproot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Reset the bloom to `to_frame` and schedule regrowth.
    Cut { to_frame: usize },
    Uproot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CutReward {
    pub score: u32,
    pub heal: i32,
}

/// Health change for one tick given the live and mature bloom counts.
pub fn health_delta(live: usize, mature: usize, cfg: &HealthConfig) -> i32 {
    if live <= cfg.heal_threshold {
        return cfg.heal_amount;
    }
    let crowd = if cfg.crowd_divisor == 0 {
        0
    } else {
        (live / cfg.crowd_divisor) as i32
    };
    -(mature as i32 * cfg.mature_damage + crowd)
}

pub fn mood_for(hp: i32, cfg: &HealthConfig) -> FlowerMood {
    if hp > cfg.wilt_below {
        FlowerMood::Idle
    } else if hp > cfg.dying_below {
        FlowerMood::Wilt
    } else {
        FlowerMood::Dying
    }
}

/// Only grown blooms can be cut; seedlings and uproot requests are destroyed.
pub fn click_outcome(action: PointerAction, frame: usize, cfg: &BloomConfig) -> ClickOutcome {
    match action {
        PointerAction::Cut if frame > cfg.cut_min_frame => ClickOutcome::Cut {
            to_frame: cfg.cut_min_frame,
        },
        _ => ClickOutcome::Uproot,
    }
}

/// Score (and healing) for cutting a bloom that showed `frame` when clicked.
pub fn cut_reward(frame: usize, blooms: &BloomConfig, scoring: &ScoringConfig) -> CutReward {
    CutReward {
        score: frame as u32,
        heal: if frame == blooms.ripe_frame {
            scoring.ripe_heal
        } else {
            0
        },
    }
}

/// Pick a random bloom rectangle inside the canvas that stays clear of `keep_out`.
/// Gives up after `attempts` rejected samples.
pub fn random_spawn_rect<R: Rng + ?Sized>(
    rng: &mut R,
    canvas: Vec2,
    bloom_size: Vec2,
    keep_out: &CanvasRect,
    attempts: u32,
) -> Option<CanvasRect> {
    let span = canvas - bloom_size;
    if span.x < 0.0 || span.y < 0.0 {
        return None;
    }
    for _ in 0..attempts {
        let min = Vec2::new(rng.gen_range(0.0..=span.x), rng.gen_range(0.0..=span.y));
        let rect = CanvasRect::new(min, bloom_size);
        if !rect.overlaps(keep_out) {
            return Some(rect);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn few_blooms_heal() {
        let cfg = HealthConfig::default();
        assert_eq!(health_delta(0, 0, &cfg), 2);
        assert_eq!(health_delta(3, 1, &cfg), 2);
    }

    #[test]
    fn crowd_and_mature_blooms_damage() {
        let cfg = HealthConfig::default();
        // 4 live, none mature: 4 / 5 = 0
        assert_eq!(health_delta(4, 0, &cfg), 0);
        // 12 live, 3 mature: 3 * 2 + 12 / 5
        assert_eq!(health_delta(12, 3, &cfg), -8);
        let no_crowd = HealthConfig {
            crowd_divisor: 0,
            ..HealthConfig::default()
        };
        assert_eq!(health_delta(12, 3, &no_crowd), -6);
    }

    #[test]
    fn mood_bands() {
        let cfg = HealthConfig::default();
        assert_eq!(mood_for(100, &cfg), FlowerMood::Idle);
        assert_eq!(mood_for(51, &cfg), FlowerMood::Idle);
        assert_eq!(mood_for(50, &cfg), FlowerMood::Wilt);
        assert_eq!(mood_for(21, &cfg), FlowerMood::Wilt);
        assert_eq!(mood_for(20, &cfg), FlowerMood::Dying);
        assert_eq!(mood_for(0, &cfg), FlowerMood::Dying);
    }

    #[test]
    fn cut_threshold_is_strict() {
        let cfg = BloomConfig::default();
        assert_eq!(click_outcome(PointerAction::Cut, 2, &cfg), ClickOutcome::Uproot);
        assert_eq!(
            click_outcome(PointerAction::Cut, 3, &cfg),
            ClickOutcome::Cut { to_frame: 2 }
        );
        assert_eq!(click_outcome(PointerAction::Uproot, 6, &cfg), ClickOutcome::Uproot);
    }

    #[test]
    fn ripe_cut_heals() {
        let b = BloomConfig::default();
        let s = ScoringConfig::default();
        assert_eq!(cut_reward(4, &b, &s), CutReward { score: 4, heal: 0 });
        assert_eq!(cut_reward(5, &b, &s), CutReward { score: 5, heal: 5 });
        assert_eq!(cut_reward(6, &b, &s), CutReward { score: 6, heal: 0 });
    }

    #[test]
    fn spawn_rects_avoid_flower_and_stay_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let canvas = Vec2::new(320.0, 240.0);
        let flower = CanvasRect::new(Vec2::new(144.0, 104.0), Vec2::splat(32.0));
        for _ in 0..500 {
            let r = random_spawn_rect(&mut rng, canvas, Vec2::splat(32.0), &flower, 32)
                .expect("open canvas always has room");
            assert!(!r.overlaps(&flower));
            assert!(r.min.x >= 0.0 && r.min.y >= 0.0);
            assert!(r.max().x <= canvas.x && r.max().y <= canvas.y);
        }
    }

    #[test]
    fn spawn_gives_up_when_flower_fills_canvas() {
        let mut rng = StdRng::seed_from_u64(1);
        let canvas = Vec2::new(64.0, 64.0);
        let flower = CanvasRect::new(Vec2::ZERO, canvas);
        assert!(random_spawn_rect(&mut rng, canvas, Vec2::splat(16.0), &flower, 10).is_none());
        assert!(random_spawn_rect(&mut rng, canvas, Vec2::splat(128.0), &flower, 10).is_none());
    }
}
