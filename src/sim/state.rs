//! Session state and core simulation types
//!
//! Everything one play-through mutates lives in `SessionState`; a new session
//! is a fresh value, game over simply stops ticking it.

use std::sync::Arc;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityView};
use super::hazard::{Hazard, HazardKind, Platform};
use super::player::Player;
use super::score::ScoreTracker;
use super::shape::CollisionMask;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Player hit a hazard
    Over,
}

/// Gameplay events emitted by a tick (for logging, audio, effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    Jumped,
    Landed,
    Ducked,
    Stood,
    HazardSpawned { kind: HazardKind, id: u32 },
    HazardCleared { kind: HazardKind, id: u32 },
    SessionOver { kind: HazardKind, id: u32 },
}

/// Collision silhouettes shared by every entity of a kind
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub player_run: Arc<CollisionMask>,
    pub player_duck: Arc<CollisionMask>,
    pub cactus: Arc<CollisionMask>,
    pub bird: Arc<CollisionMask>,
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct SessionState<R = Pcg32> {
    /// Seed the spawner RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Simulation tick counter
    pub tick_count: u64,
    /// Clock time of the last bird spawn (or session start)
    pub air_timer_ms: u64,
    /// Clock time of the last cactus spawn (or session start)
    pub ground_timer_ms: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub ground_hazards: Vec<Hazard>,
    pub air_hazards: Vec<Hazard>,
    pub spawner: Spawner<R>,
    pub tracker: ScoreTracker,
}

impl SessionState<Pcg32> {
    /// Start a session with a seeded spawner at clock time `now_ms`
    pub fn new(tuning: &Tuning, sprites: &SpriteSet, seed: u64, now_ms: u64) -> Self {
        let spawner = Spawner::seeded(tuning, seed, sprites.cactus.clone(), sprites.bird.clone());
        Self::with_spawner(tuning, sprites, spawner, seed, now_ms)
    }
}

impl<R: Rng> SessionState<R> {
    /// Start a session around an existing spawner (custom RNG)
    pub fn with_spawner(
        tuning: &Tuning,
        sprites: &SpriteSet,
        mut spawner: Spawner<R>,
        seed: u64,
        now_ms: u64,
    ) -> Self {
        let player = Player::new(tuning, sprites.player_run.clone(), sprites.player_duck.clone());
        let ground = Platform::new(
            0.0,
            tuning.ground_y,
            tuning.field_width,
            tuning.field_height - tuning.ground_y,
        );
        let speed = spawner.scroll_speed(0);
        let ground_hazards = spawner.maybe_spawn_ground(&[], speed);

        Self {
            seed,
            tuning: tuning.clone(),
            phase: SessionPhase::Playing,
            tick_count: 0,
            air_timer_ms: now_ms,
            ground_timer_ms: now_ms,
            player,
            platforms: vec![ground],
            ground_hazards,
            air_hazards: Vec::new(),
            spawner,
            tracker: ScoreTracker::new(tuning.points_per_hazard),
        }
    }
}

impl<R> SessionState<R> {
    pub fn score(&self) -> u64 {
        self.tracker.score()
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    /// Everything drawable, back to front: ground, hazards, player
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> {
        self.platforms
            .iter()
            .map(|p| EntityView::of(p))
            .chain(self.ground_hazards.iter().map(|h| EntityView::of(h)))
            .chain(self.air_hazards.iter().map(|h| EntityView::of(h)))
            .chain(std::iter::once(EntityView::of(&self.player)))
    }

    /// Highest running surface on the field
    pub fn ground_top(&self) -> f32 {
        self.platforms
            .iter()
            .map(Platform::top)
            .fold(f32::INFINITY, f32::min)
    }

    /// Live hazard count across both sets
    pub fn hazard_count(&self) -> usize {
        self.ground_hazards.len() + self.air_hazards.len()
    }

    /// Advance every hazard by one timestep at `speed` (leftward)
    pub(crate) fn scroll_hazards(&mut self, speed: f32, dt: f32) {
        for hazard in self.ground_hazards.iter_mut().chain(self.air_hazards.iter_mut()) {
            hazard.vel.x = -speed;
            hazard.update(dt);
        }
    }
}
