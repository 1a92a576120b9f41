//! Obstacles and the running strip

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::shape::{CollisionMask, Rect, Shape};

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Cactus, sits on the ground
    Ground,
    /// Bird, flies in a fixed band above the ground
    Air,
}

/// An obstacle scrolling leftward across the field
#[derive(Debug, Clone)]
pub struct Hazard {
    /// Unique within a session
    pub id: u32,
    pub kind: HazardKind,
    /// Mid-bottom anchor
    pub pos: Vec2,
    pub vel: Vec2,
    mask: Arc<CollisionMask>,
}

impl Hazard {
    /// Create a hazard whose left edge is at `left` and bottom at `bottom`
    pub fn new(id: u32, kind: HazardKind, left: f32, bottom: f32, mask: Arc<CollisionMask>) -> Self {
        let half_width = mask.width() as f32 / 2.0;
        Self {
            id,
            kind,
            pos: Vec2::new(left + half_width, bottom),
            vel: Vec2::ZERO,
            mask,
        }
    }

    pub fn rect(&self) -> Rect {
        let size = self.mask.size();
        Rect::from_midbottom(self.pos, size.x, size.y)
    }

    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }

    /// Scrolled completely past the left edge of the field
    pub fn has_exited(&self) -> bool {
        self.rect().right() < 0.0
    }
}

impl Entity for Hazard {
    fn kind(&self) -> EntityKind {
        match self.kind {
            HazardKind::Ground => EntityKind::GroundHazard,
            HazardKind::Air => EntityKind::AirHazard,
        }
    }

    fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    fn shape(&self) -> Shape<'_> {
        Shape::masked(self.pos, &self.mask)
    }
}

/// Static horizontal strip the runner stands on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    rect: Rect,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Running surface
    pub fn top(&self) -> f32 {
        self.rect.top()
    }
}

impl Entity for Platform {
    fn kind(&self) -> EntityKind {
        EntityKind::Platform
    }

    fn update(&mut self, _dt: f32) {}

    fn shape(&self) -> Shape<'_> {
        Shape::rect(self.rect)
    }
}
