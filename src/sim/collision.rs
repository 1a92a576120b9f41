//! Per-tick collision pass
//!
//! Fixed order: birds, then cacti (both pixel-accurate, checked against the
//! post-movement pose), then the ground strip (bounding box). A hazard hit ends
//! the session on the spot and skips floor resolution.

use glam::Vec2;

use super::entity::Entity;
use super::hazard::{Hazard, HazardKind, Platform};
use super::player::Player;

/// Result of one collision pass
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionOutcome {
    /// False once the player touched a hazard
    pub alive: bool,
    /// Hazard that ended the session (kind, id)
    pub cause: Option<(HazardKind, u32)>,
    /// A jump ended on the ground this pass
    pub landed: bool,
    /// Player anchor after floor resolution
    pub player_pos: Vec2,
}

/// Collision tests between the player and everything else on the field.
/// Reads hazard and platform sets; only the player is corrected.
pub struct CollisionSystem;

impl CollisionSystem {
    pub fn resolve(
        player: &mut Player,
        air_hazards: &[Hazard],
        ground_hazards: &[Hazard],
        platforms: &[Platform],
    ) -> CollisionOutcome {
        if let Some(hit) = Self::first_hit(player, air_hazards).or_else(|| Self::first_hit(player, ground_hazards)) {
            return CollisionOutcome {
                alive: false,
                cause: Some((hit.kind, hit.id)),
                landed: false,
                player_pos: player.pos,
            };
        }

        let landed = Self::resolve_floor(player, platforms);
        CollisionOutcome {
            alive: true,
            cause: None,
            landed,
            player_pos: player.pos,
        }
    }

    /// First hazard whose mask overlaps the player's
    pub fn first_hit<'a>(player: &Player, hazards: &'a [Hazard]) -> Option<&'a Hazard> {
        let shape = player.shape();
        hazards.iter().find(|h| shape.overlaps(&h.shape()))
    }

    /// Snap a falling (or resting) player onto the first platform it overlaps.
    /// Returns true when this ended a jump.
    fn resolve_floor(player: &mut Player, platforms: &[Platform]) -> bool {
        if player.vel.y < 0.0 {
            return false;
        }
        let rect = player.shape().rect;
        match platforms.iter().find(|p| rect.overlaps(&p.rect())) {
            Some(platform) => player.land(platform.top()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::player::MotionState;
    use crate::sim::shape::CollisionMask;
    use crate::tuning::Tuning;
    use std::sync::Arc;

    fn setup() -> (Tuning, Player, Vec<Platform>) {
        let tuning = Tuning::default();
        let player = Player::new(
            &tuning,
            Arc::new(CollisionMask::filled(44, 48)),
            Arc::new(CollisionMask::filled(60, 28)),
        );
        let ground = Platform::new(
            0.0,
            tuning.ground_y,
            tuning.field_width,
            tuning.field_height - tuning.ground_y,
        );
        (tuning, player, vec![ground])
    }

    fn hazard(kind: HazardKind, left: f32, bottom: f32, w: u32, h: u32) -> Hazard {
        Hazard::new(7, kind, left, bottom, Arc::new(CollisionMask::filled(w, h)))
    }

    #[test]
    fn test_resting_player_snaps_to_ground() {
        let (tuning, mut player, platforms) = setup();
        player.update(SIM_DT);
        assert!(player.pos.y > tuning.ground_y);

        let out = CollisionSystem::resolve(&mut player, &[], &[], &platforms);
        assert!(out.alive);
        assert!(!out.landed, "was not jumping");
        assert_eq!(out.player_pos.y, tuning.ground_y);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_rising_player_not_snapped() {
        let (tuning, mut player, platforms) = setup();
        player.jump();
        player.update(SIM_DT);
        let out = CollisionSystem::resolve(&mut player, &[], &[], &platforms);
        assert!(out.alive);
        assert!(out.player_pos.y < tuning.ground_y);
        assert_eq!(player.state, MotionState::Jumping);
    }

    #[test]
    fn test_landing_ends_jump() {
        let (tuning, mut player, platforms) = setup();
        player.jump();
        let mut landed = false;
        for _ in 0..200 {
            player.update(SIM_DT);
            let out = CollisionSystem::resolve(&mut player, &[], &[], &platforms);
            assert!(player.pos.y <= tuning.ground_y);
            if out.landed {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(player.state, MotionState::Running);
    }

    #[test]
    fn test_ground_hazard_hit_ends_session_without_floor_fix() {
        let (tuning, mut player, platforms) = setup();
        player.update(SIM_DT);
        let sunk = player.pos;
        let cactus = hazard(HazardKind::Ground, tuning.player_x - 5.0, tuning.ground_y, 24, 48);
        let out = CollisionSystem::resolve(&mut player, &[], &[cactus], &platforms);
        assert!(!out.alive);
        assert_eq!(out.cause, Some((HazardKind::Ground, 7)));
        assert_eq!(out.player_pos, sunk, "no mutation after a hit");
    }

    #[test]
    fn test_air_checked_first() {
        let (tuning, mut player, platforms) = setup();
        let bird = hazard(HazardKind::Air, tuning.player_x - 10.0, tuning.ground_y - 10.0, 48, 40);
        let cactus = hazard(HazardKind::Ground, tuning.player_x - 5.0, tuning.ground_y, 24, 48);
        let out = CollisionSystem::resolve(&mut player, &[bird], &[cactus], &platforms);
        assert_eq!(out.cause.map(|c| c.0), Some(HazardKind::Air));
    }

    #[test]
    fn test_ducking_clears_bird_band() {
        let (tuning, mut player, platforms) = setup();
        let bird = hazard(
            HazardKind::Air,
            tuning.player_x - 24.0,
            tuning.ground_y - tuning.air_clearance,
            48,
            40,
        );
        let standing = CollisionSystem::resolve(&mut player, &[bird.clone()], &[], &platforms);
        assert!(!standing.alive);

        player.duck();
        let ducking = CollisionSystem::resolve(&mut player, &[bird], &[], &platforms);
        assert!(ducking.alive);
    }

    #[test]
    fn test_distant_hazards_ignored() {
        let (tuning, mut player, platforms) = setup();
        let cactus = hazard(HazardKind::Ground, tuning.field_width, tuning.ground_y, 24, 48);
        assert!(CollisionSystem::resolve(&mut player, &[], &[cactus], &platforms).alive);
    }
}
