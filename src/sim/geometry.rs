//! Axis-aligned box geometry
//!
//! Everything in the world is a top-left-origin box. Screen coordinates:
//! y grows downward, so a box's "top" is its smallest y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos() + self.size() * 0.5
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Inclusive overlap: boxes sharing an edge count as touching
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// True if the horizontal spans overlap (strictly)
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// True if `other` lies entirely inside this box
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Grow the box by `margin` on the left and right
    pub fn widened(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y,
            self.width + 2.0 * margin,
            self.height,
        )
    }
}
