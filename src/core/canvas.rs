//! Logical canvas geometry.
//!
//! Rules work in canvas space: origin at the top-left corner, `y` growing
//! downwards, rectangles named by their top-left corner. Bevy's world space has
//! its origin at the canvas centre with `y` up; the conversion lives here only.
use bevy::prelude::*;

use crate::core::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl CanvasRect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }

    /// True when the interiors intersect; rectangles sharing an edge do not overlap.
    pub fn overlaps(&self, other: &CanvasRect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub size: Vec2,
}

impl Canvas {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }

    pub fn from_config(cfg: &GameConfig) -> Self {
        Self::new(cfg.canvas.size())
    }

    /// World-space centre of a canvas rectangle (sprites are centre anchored).
    pub fn rect_to_world(&self, rect: &CanvasRect) -> Vec2 {
        self.point_to_world(rect.center())
    }

    pub fn point_to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.size.x * 0.5, self.size.y * 0.5 - p.y)
    }

    pub fn world_to_point(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.size.x * 0.5, self.size.y * 0.5 - world.y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        CanvasRect::new(Vec2::ZERO, self.size).contains(p)
    }
}
