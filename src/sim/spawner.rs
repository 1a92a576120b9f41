//! Procedural hazard spawning and difficulty scaling
//!
//! Birds arrive on a jittered timer; cacti are topped up so a minimum number is
//! always alive. All randomness flows through the spawner's own RNG so a seeded
//! session replays identically.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::hazard::{Hazard, HazardKind};
use super::shape::CollisionMask;
use crate::tuning::Tuning;

/// Offsets (ms) applied to the base bird interval, chosen uniformly
pub const JITTER_TABLE_MS: [i64; 5] = [-1000, -500, 0, 500, 1000];

/// Creates hazards; the only producer of hazard entities in a session
#[derive(Debug, Clone)]
pub struct Spawner<R = Pcg32> {
    rng: R,
    tuning: Tuning,
    cactus_mask: Arc<CollisionMask>,
    bird_mask: Arc<CollisionMask>,
    /// Jittered interval for the bird currently being waited on
    air_interval_ms: Option<u64>,
    next_id: u32,
}

impl Spawner<Pcg32> {
    /// Spawner driven by a seeded PCG stream
    pub fn seeded(
        tuning: &Tuning,
        seed: u64,
        cactus_mask: Arc<CollisionMask>,
        bird_mask: Arc<CollisionMask>,
    ) -> Self {
        Self::new(tuning, Pcg32::seed_from_u64(seed), cactus_mask, bird_mask)
    }
}

impl<R: Rng> Spawner<R> {
    pub fn new(
        tuning: &Tuning,
        rng: R,
        cactus_mask: Arc<CollisionMask>,
        bird_mask: Arc<CollisionMask>,
    ) -> Self {
        Self {
            rng,
            tuning: tuning.clone(),
            cactus_mask,
            bird_mask,
            air_interval_ms: None,
            next_id: 1,
        }
    }

    /// Leftward speed shared by all hazards.
    /// Linear in score between `base_speed` and `max_speed`, never decreasing.
    pub fn scroll_speed(&self, score: u64) -> f32 {
        let t = &self.tuning;
        (t.base_speed + t.speed_per_point * score as f32)
            .min(t.max_speed)
            .max(t.base_speed)
    }

    /// Draw a bird interval: base plus a table jitter, floored at the minimum
    pub fn roll_air_interval(&mut self) -> u64 {
        let jitter = JITTER_TABLE_MS[self.rng.random_range(0..JITTER_TABLE_MS.len())];
        let interval = self.tuning.air_interval_ms as i64 + jitter;
        interval.max(self.tuning.min_air_interval_ms.max(1) as i64) as u64
    }

    /// Interval the current bird timer is measured against
    pub fn pending_air_interval(&mut self) -> u64 {
        match self.air_interval_ms {
            Some(interval) => interval,
            None => {
                let interval = self.roll_air_interval();
                self.air_interval_ms = Some(interval);
                interval
            }
        }
    }

    /// Spawn a bird once more than the jittered interval has passed since
    /// `last_spawn_ms`. The caller resets its timer to `now_ms` on spawn.
    pub fn maybe_spawn_air(&mut self, now_ms: u64, last_spawn_ms: u64, speed: f32) -> Option<Hazard> {
        let interval = self.pending_air_interval();
        if now_ms.saturating_sub(last_spawn_ms) <= interval {
            return None;
        }
        self.air_interval_ms = None;

        let bottom = self.tuning.ground_y - self.tuning.air_clearance;
        let mut bird = Hazard::new(
            self.allocate_id(),
            HazardKind::Air,
            self.tuning.field_width,
            bottom,
            self.bird_mask.clone(),
        );
        bird.vel.x = -speed;
        Some(bird)
    }

    /// Gap left of a new cactus. `ground_spacing` at base speed, widening in
    /// proportion above it so a jump still fits between neighbours.
    pub fn ground_gap(&self, speed: f32) -> f32 {
        self.tuning.ground_spacing * (speed / self.tuning.base_speed).max(1.0)
    }

    /// Top up cacti to the configured minimum. Each new cactus starts one
    /// gap beyond the rightmost live one, or beyond the field edge.
    pub fn maybe_spawn_ground(&mut self, existing: &[Hazard], speed: f32) -> Vec<Hazard> {
        let needed = self.tuning.min_ground_hazards.saturating_sub(existing.len());
        let mut frontier = existing
            .iter()
            .map(|h| h.rect().right())
            .fold(self.tuning.field_width, f32::max);

        let gap = self.ground_gap(speed);
        let mut spawned = Vec::with_capacity(needed);
        for _ in 0..needed {
            let left = frontier + gap;
            let mut cactus = Hazard::new(
                self.allocate_id(),
                HazardKind::Ground,
                left,
                self.tuning.ground_y,
                self.cactus_mask.clone(),
            );
            cactus.vel.x = -speed;
            frontier = cactus.rect().right();
            spawned.push(cactus);
        }
        spawned
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
