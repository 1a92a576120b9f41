//! The runner and its motion state machine
//!
//! ```text
//!   Running --jump--> Jumping --land--> Running
//!   Running --duck--> Ducking --stand--> Running
//!   Ducking --jump--> Jumping
//! ```
//!
//! Requests that don't apply to the current state are ignored. Floor contact is
//! resolved by the collision pass after movement, never here.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::shape::{CollisionMask, Shape};
use crate::tuning::Tuning;

/// Motion state of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Running,
    Jumping,
    Ducking,
}

/// The player's runner
#[derive(Debug, Clone)]
pub struct Player {
    /// Mid-bottom anchor (feet)
    pub pos: Vec2,
    pub vel: Vec2,
    pub state: MotionState,
    gravity: f32,
    jump_velocity: f32,
    jump_cut_factor: f32,
    max_fall_speed: f32,
    run_mask: Arc<CollisionMask>,
    duck_mask: Arc<CollisionMask>,
}

impl Player {
    /// Create a runner standing on the ground
    pub fn new(tuning: &Tuning, run_mask: Arc<CollisionMask>, duck_mask: Arc<CollisionMask>) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_y),
            vel: Vec2::ZERO,
            state: MotionState::Running,
            gravity: tuning.gravity,
            jump_velocity: tuning.jump_velocity,
            jump_cut_factor: tuning.jump_cut_factor,
            max_fall_speed: tuning.max_fall_speed,
            run_mask,
            duck_mask,
        }
    }

    /// Running or Ducking
    pub fn is_grounded(&self) -> bool {
        self.state != MotionState::Jumping
    }

    /// Launch upward. Returns false (and does nothing) while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vel.y = self.jump_velocity;
        self.state = MotionState::Jumping;
        true
    }

    /// Shorten a rising jump when the jump key is released early
    pub fn jump_cut(&mut self) -> bool {
        if self.state != MotionState::Jumping || self.vel.y >= 0.0 {
            return false;
        }
        self.vel.y *= self.jump_cut_factor;
        true
    }

    /// Switch to the low silhouette; grounded only
    pub fn duck(&mut self) -> bool {
        if self.state != MotionState::Running {
            return false;
        }
        self.state = MotionState::Ducking;
        true
    }

    /// Leave the ducking pose
    pub fn stand(&mut self) -> bool {
        if self.state != MotionState::Ducking {
            return false;
        }
        self.state = MotionState::Running;
        true
    }

    /// Resolve contact with a surface at `top` (screen y).
    /// Returns true when this ended a jump.
    pub fn land(&mut self, top: f32) -> bool {
        self.pos.y = top;
        self.vel.y = 0.0;
        if self.state == MotionState::Jumping {
            self.state = MotionState::Running;
            return true;
        }
        false
    }

    /// Mask for the current pose
    pub fn mask(&self) -> &CollisionMask {
        match self.state {
            MotionState::Ducking => &self.duck_mask,
            MotionState::Running | MotionState::Jumping => &self.run_mask,
        }
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn update(&mut self, dt: f32) {
        self.vel.y = (self.vel.y + self.gravity * dt).min(self.max_fall_speed);
        self.pos += self.vel * dt;
    }

    fn shape(&self) -> Shape<'_> {
        Shape::masked(self.pos, self.mask())
    }
}
