//! Exit scoring: hazards that scroll off the left edge are worth points

use serde::{Deserialize, Serialize};

use super::hazard::Hazard;

/// Session score counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
    points_per_hazard: u64,
    /// Hazards that have left the field this session
    cleared: u32,
}

impl ScoreTracker {
    pub fn new(points_per_hazard: u64) -> Self {
        Self {
            score: 0,
            points_per_hazard,
            cleared: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn cleared(&self) -> u32 {
        self.cleared
    }

    /// Remove every hazard that has fully left the field and award points for
    /// each. Removal is what makes this idempotent per hazard.
    /// Returns the ids of the removed hazards.
    pub fn award_exits(&mut self, hazards: &mut Vec<Hazard>) -> Vec<u32> {
        let mut exited = Vec::new();
        hazards.retain(|h| {
            if h.has_exited() {
                exited.push(h.id);
                false
            } else {
                true
            }
        });

        self.cleared += exited.len() as u32;
        self.score += self.points_per_hazard * exited.len() as u64;
        exited
    }
}
