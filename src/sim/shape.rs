//! Collision geometry: axis-aligned rectangles and per-pixel masks
//!
//! Sprites are not rectangular, so hazard hits are tested mask-vs-mask on the
//! integer pixel grid. Plain rectangles are enough for the ground strip.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle whose bottom edge is centred on `anchor`
    pub fn from_midbottom(anchor: Vec2, w: f32, h: f32) -> Self {
        Self::new(anchor.x - w / 2.0, anchor.y - h, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Top-left corner snapped to the pixel grid
    fn pixel_origin(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Per-pixel solidity mask, row-major, packed into 64-bit words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl CollisionMask {
    /// Empty (all clear) mask
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Fully solid mask
    pub fn filled(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        mask
    }

    /// Build a mask from ASCII art: `#` is solid, anything else is clear.
    /// Rows may be ragged; the mask is as wide as the longest row.
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut mask = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    mask.set(x as u32, y as u32, true);
                }
            }
        }
        mask
    }

    /// Nearest-neighbour upscale by an integer factor
    pub fn scaled(&self, factor: u32) -> Self {
        let factor = factor.max(1);
        let mut out = Self::new(self.width * factor, self.height * factor);
        for y in 0..out.height {
            for x in 0..out.width {
                if self.get(x / factor, y / factor) {
                    out.set(x, y, true);
                }
            }
        }
        out
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Whether pixel (x, y) is solid; out-of-range pixels are clear
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = y as usize * self.words_per_row + x as usize / 64;
        self.bits[word] & (1u64 << (x % 64)) != 0
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let word = y as usize * self.words_per_row + x as usize / 64;
        let bit = 1u64 << (x % 64);
        if solid {
            self.bits[word] |= bit;
        } else {
            self.bits[word] &= !bit;
        }
    }

    /// Number of solid pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// First solid pixel shared with `other` placed at `offset` relative to
    /// this mask's top-left corner (in this mask's coordinates)
    pub fn overlap(&self, other: &CollisionMask, offset: (i32, i32)) -> Option<(u32, u32)> {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i32).min(dx + other.width as i32);
        let y1 = (self.height as i32).min(dy + other.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return Some((x as u32, y as u32));
                }
            }
        }
        None
    }
}

/// A positioned collision shape: bounding rectangle plus optional pixel mask
#[derive(Debug, Clone, Copy)]
pub struct Shape<'a> {
    pub rect: Rect,
    pub mask: Option<&'a CollisionMask>,
}

impl<'a> Shape<'a> {
    /// Rectangle-only shape
    pub fn rect(rect: Rect) -> Self {
        Self { rect, mask: None }
    }

    /// Mask anchored at its mid-bottom point
    pub fn masked(anchor: Vec2, mask: &'a CollisionMask) -> Self {
        let size = mask.size();
        Self {
            rect: Rect::from_midbottom(anchor, size.x, size.y),
            mask: Some(mask),
        }
    }

    /// Pixel-accurate when both shapes carry masks, bounding-box otherwise
    pub fn overlaps(&self, other: &Shape<'_>) -> bool {
        match (self.mask, other.mask) {
            (Some(a), Some(b)) => {
                let (ax, ay) = self.rect.pixel_origin();
                let (bx, by) = other.rect.pixel_origin();
                a.overlap(b, (bx - ax, by - ay)).is_some()
            }
            _ => self.rect.overlaps(&other.rect),
        }
    }
}
