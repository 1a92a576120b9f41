//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a run can be re-tuned from
//! a JSON settings file without recompiling. Defaults come from `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physics, spawning and scoring parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Top surface of the running strip
    pub ground_y: f32,

    // === Player ===
    pub player_x: f32,
    pub gravity: f32,
    /// Negative (upward) vertical velocity set by a jump
    pub jump_velocity: f32,
    /// Fraction of upward velocity kept after an early release, in (0, 1)
    pub jump_cut_factor: f32,
    pub max_fall_speed: f32,

    // === Scrolling ===
    pub base_speed: f32,
    pub speed_per_point: f32,
    pub max_speed: f32,

    // === Spawning ===
    pub air_interval_ms: u64,
    pub min_air_interval_ms: u64,
    pub air_clearance: f32,
    pub min_ground_hazards: usize,
    pub ground_spacing: f32,

    // === Scoring ===
    pub points_per_hazard: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_y: GROUND_Y,

            player_x: PLAYER_X,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            jump_cut_factor: JUMP_CUT_FACTOR,
            max_fall_speed: MAX_FALL_SPEED,

            base_speed: BASE_SPEED,
            speed_per_point: SPEED_PER_POINT,
            max_speed: MAX_SPEED,

            air_interval_ms: AIR_INTERVAL_MS,
            min_air_interval_ms: MIN_AIR_INTERVAL_MS,
            air_clearance: AIR_CLEARANCE,
            min_ground_hazards: MIN_GROUND_HAZARDS,
            ground_spacing: GROUND_SPACING,

            points_per_hazard: POINTS_PER_HAZARD,
        }
    }
}

impl Tuning {
    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(invalid("field_width/field_height", "must be positive"));
        }
        if !(0.0..self.field_height).contains(&self.ground_y) {
            return Err(invalid("ground_y", "must lie inside the field"));
        }
        if self.gravity <= 0.0 {
            return Err(invalid("gravity", "must be positive"));
        }
        if self.jump_velocity >= 0.0 {
            return Err(invalid("jump_velocity", "must be negative (upward)"));
        }
        if !(self.jump_cut_factor > 0.0 && self.jump_cut_factor < 1.0) {
            return Err(invalid("jump_cut_factor", "must be in (0, 1)"));
        }
        // A single tick of falling must not carry the runner through the strip
        let ground_thickness = self.field_height - self.ground_y;
        if self.max_fall_speed <= 0.0 || self.max_fall_speed * SIM_DT >= ground_thickness {
            return Err(invalid(
                "max_fall_speed",
                format!("must be positive and below {} px/s", ground_thickness / SIM_DT),
            ));
        }
        if self.base_speed <= 0.0 || self.max_speed < self.base_speed {
            return Err(invalid("base_speed/max_speed", "need 0 < base_speed <= max_speed"));
        }
        if self.speed_per_point < 0.0 {
            return Err(invalid("speed_per_point", "must not be negative"));
        }
        if self.min_air_interval_ms == 0 {
            return Err(invalid("min_air_interval_ms", "must be at least 1"));
        }
        if self.min_ground_hazards == 0 {
            return Err(invalid("min_ground_hazards", "must be at least 1"));
        }
        if self.ground_spacing <= 0.0 {
            return Err(invalid("ground_spacing", "must be positive"));
        }
        Ok(())
    }
}
