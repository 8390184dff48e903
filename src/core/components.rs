use bevy::prelude::*;
use std::time::Duration;

use crate::core::canvas::CanvasRect;

/// Marker for the flower the player protects.
#[derive(Component)]
pub struct Flower;

/// Hit points, clamped to `0..=max`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}
impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply a signed change; returns the change actually applied after clamping.
    pub fn apply(&mut self, delta: i32) -> i32 {
        let before = self.current;
        self.current = (self.current + delta).clamp(0, self.max);
        self.current - before
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Sprite state of the flower, one sheet frame each.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowerMood {
    #[default]
    Idle,
    Wilt,
    Dying,
}
impl FlowerMood {
    pub fn frame(self) -> usize {
        match self {
            FlowerMood::Idle => 0,
            FlowerMood::Wilt => 1,
            FlowerMood::Dying => 2,
        }
    }
}

/// Canvas-space rectangle of a static entity (flower or bloom).
#[derive(Component, Debug, Deref, Copy, Clone)]
pub struct CanvasBox(pub CanvasRect);

/// A bloom entity. `serial` is the spawn order; later blooms draw (and pick) on top.
#[derive(Component, Debug, Copy, Clone)]
pub struct Bloom {
    pub serial: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BloomPhase {
    Growing,
    /// Head cut off; growth resumes when the timer finishes.
    Cut { regrow: Timer },
    Mature,
}

/// Grow animation state. The frame index doubles as the bloom's maturity.
#[derive(Component, Debug, Clone)]
pub struct BloomGrowth {
    pub frame: usize,
    pub frame_timer: Timer,
    pub phase: BloomPhase,
}
impl BloomGrowth {
    pub fn new(frame_secs: f32) -> Self {
        Self {
            frame: 0,
            frame_timer: Timer::from_seconds(frame_secs.max(0.001), TimerMode::Repeating),
            phase: BloomPhase::Growing,
        }
    }

    #[inline]
    pub fn is_mature(&self) -> bool {
        self.phase == BloomPhase::Mature
    }

    /// Advance the animation by `delta`. Returns true when the displayed frame changed.
    pub fn tick(&mut self, delta: Duration, mature_frame: usize) -> bool {
        let Self {
            frame,
            frame_timer,
            phase,
        } = self;
        match phase {
            BloomPhase::Growing => {
                frame_timer.tick(delta);
                let steps = frame_timer.times_finished_this_tick() as usize;
                if steps == 0 {
                    return false;
                }
                let before = *frame;
                *frame = (*frame + steps).min(mature_frame);
                if *frame >= mature_frame {
                    *phase = BloomPhase::Mature;
                }
                *frame != before
            }
            BloomPhase::Cut { regrow } => {
                regrow.tick(delta);
                if regrow.finished() {
                    *phase = BloomPhase::Growing;
                    frame_timer.reset();
                }
                false
            }
            BloomPhase::Mature => false,
        }
    }

    /// Reset to `frame` and hold there for `regrow_secs`.
    pub fn cut(&mut self, frame: usize, regrow_secs: f32) {
        self.frame = frame;
        self.frame_timer.reset();
        self.phase = BloomPhase::Cut {
            regrow: Timer::from_seconds(regrow_secs.max(0.0), TimerMode::Once),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_clamps_both_ways() {
        let mut h = Health::full(10);
        assert_eq!(h.apply(5), 0);
        assert_eq!(h.apply(-4), -4);
        assert_eq!(h.apply(-20), -6);
        assert!(h.is_dead());
    }

    #[test]
    fn growth_reaches_mature_and_stops() {
        let mut g = BloomGrowth::new(1.0);
        for _ in 0..6 {
            assert!(g.tick(Duration::from_secs(1), 6));
        }
        assert_eq!(g.frame, 6);
        assert!(g.is_mature());
        assert!(!g.tick(Duration::from_secs(5), 6));
        assert_eq!(g.frame, 6);
    }

    #[test]
    fn large_delta_skips_frames_but_caps() {
        let mut g = BloomGrowth::new(0.5);
        g.tick(Duration::from_millis(1500), 6);
        assert_eq!(g.frame, 3);
        g.tick(Duration::from_secs(10), 6);
        assert_eq!(g.frame, 6);
    }

    #[test]
    fn cut_holds_then_regrows() {
        let mut g = BloomGrowth::new(1.0);
        g.tick(Duration::from_secs(4), 6);
        g.cut(2, 1.5);
        assert_eq!(g.frame, 2);
        g.tick(Duration::from_secs(1), 6);
        assert_eq!(g.frame, 2);
        g.tick(Duration::from_millis(600), 6);
        assert_eq!(g.phase, BloomPhase::Growing);
        g.tick(Duration::from_secs(1), 6);
        assert_eq!(g.frame, 3);
    }
}
