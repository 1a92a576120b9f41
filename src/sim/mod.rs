//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each hazard set)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod hazard;
pub mod player;
pub mod score;
pub mod shape;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{CollisionOutcome, CollisionSystem};
pub use entity::{Entity, EntityKind, EntityView};
pub use hazard::{Hazard, HazardKind, Platform};
pub use player::{MotionState, Player};
pub use score::ScoreTracker;
pub use shape::{CollisionMask, Rect, Shape};
pub use spawner::{JITTER_TABLE_MS, Spawner};
pub use state::{SessionPhase, SessionState, SimEvent, SpriteSet};
pub use tick::{PlayerAction, TickInput, TickOutcome, tick};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::{CollisionMask, SpriteSet};

    /// Solid rectangular silhouettes at the built-in sprite sizes
    pub(crate) fn sprites() -> SpriteSet {
        SpriteSet {
            player_run: Arc::new(CollisionMask::filled(44, 48)),
            player_duck: Arc::new(CollisionMask::filled(60, 28)),
            cactus: Arc::new(CollisionMask::filled(24, 48)),
            bird: Arc::new(CollisionMask::filled(48, 40)),
        }
    }
}
