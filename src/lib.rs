//! Dino Dash - a side-scrolling reflex runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions, scoring)
//! - `game`: Fixed-tick orchestrator driving the simulation through platform services
//! - `platform`: Clock, input, renderer and audio abstractions
//! - `assets`: Sprite silhouettes and audio handles, validated at startup
//! - `tuning`: Data-driven game balance
//! - `settings`: Application configuration

pub mod assets;
pub mod error;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use assets::{Assets, AssetProvider, BuiltinAssets};
pub use error::{ConfigError, GameError};
pub use game::{Game, SessionEnd};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the fixed-tick loop
    pub const TARGET_FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TARGET_FPS as f32;

    /// Visible field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 300.0;
    /// Height of the running strip at the bottom of the field
    pub const GROUND_THICKNESS: f32 = 30.0;
    /// Top surface of the running strip
    pub const GROUND_Y: f32 = FIELD_HEIGHT - GROUND_THICKNESS;

    /// Horizontal anchor of the runner (mid-bottom x)
    pub const PLAYER_X: f32 = 80.0;
    /// Downward acceleration, pixels/s²
    pub const GRAVITY: f32 = 2400.0;
    /// Upward impulse on jump, pixels/s (negative is up)
    pub const JUMP_VELOCITY: f32 = -900.0;
    /// Multiplier applied to upward velocity when the jump key is released early
    pub const JUMP_CUT_FACTOR: f32 = 0.5;
    /// Terminal fall speed; keeps a tick's fall shorter than the ground strip
    pub const MAX_FALL_SPEED: f32 = 1200.0;

    /// Hazard scroll speed at score 0, pixels/s
    pub const BASE_SPEED: f32 = 360.0;
    /// Extra scroll speed per point scored
    pub const SPEED_PER_POINT: f32 = 1.5;
    /// Scroll speed ceiling
    pub const MAX_SPEED: f32 = 720.0;

    /// Base time between bird spawns
    pub const AIR_INTERVAL_MS: u64 = 5000;
    /// Floor for the jittered bird interval
    pub const MIN_AIR_INTERVAL_MS: u64 = 1000;
    /// Gap between a bird's underside and the ground top.
    /// Taller than the ducking silhouette, shorter than the running one.
    pub const AIR_CLEARANCE: f32 = 34.0;

    /// Cacti kept alive at all times
    pub const MIN_GROUND_HAZARDS: usize = 3;
    /// Horizontal gap between a new cactus and the rightmost one (or the field edge)
    pub const GROUND_SPACING: f32 = 400.0;

    /// Points awarded per hazard that leaves the field
    pub const POINTS_PER_HAZARD: u64 = 10;
}
