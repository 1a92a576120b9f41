//! Demo-mode AI: jumps cacti and ducks birds
//!
//! Reads the session and proposes actions for the next tick; it never mutates
//! state, so demo runs stay deterministic for a given seed.

use super::entity::Entity;
use super::player::MotionState;
use super::state::SessionState;
use super::tick::PlayerAction;

/// How far ahead (px) of the runner's front edge a cactus triggers a jump
const JUMP_LOOKAHEAD: f32 = 60.0;
/// How far ahead (px) a bird triggers a duck
const DUCK_LOOKAHEAD: f32 = 90.0;

/// Suggest actions for the current state
pub fn autopilot<R>(state: &SessionState<R>) -> Vec<PlayerAction> {
    let player = &state.player;
    let body = player.shape().rect;
    // Look ahead further as the field speeds up
    let speed_scale = state
        .ground_hazards
        .first()
        .map(|h| (-h.vel.x / state.tuning.base_speed).max(1.0))
        .unwrap_or(1.0);

    let cactus_ahead = state.ground_hazards.iter().any(|h| {
        let gap = h.rect().left() - body.right();
        gap > 0.0 && gap <= JUMP_LOOKAHEAD * speed_scale
    });
    let bird_near = state.air_hazards.iter().any(|h| {
        let rect = h.rect();
        rect.left() - body.right() <= DUCK_LOOKAHEAD * speed_scale && rect.right() >= body.left()
    });

    match player.state {
        MotionState::Running | MotionState::Ducking if cactus_ahead => vec![PlayerAction::Jump],
        MotionState::Running if bird_near => vec![PlayerAction::Duck],
        MotionState::Ducking if !bird_near => vec![PlayerAction::Stand],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_support::sprites;
    use crate::sim::hazard::{Hazard, HazardKind};
    use crate::tuning::Tuning;

    #[test]
    fn test_idle_when_clear() {
        let state = SessionState::new(&Tuning::default(), &sprites(), 1, 0);
        assert!(autopilot(&state).is_empty());
    }

    #[test]
    fn test_jumps_close_cactus() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning, &sprites(), 1, 0);
        let front = state.player.shape().rect.right();
        let cactus = &mut state.ground_hazards[0];
        cactus.pos.x = front + 40.0 + cactus.rect().w / 2.0;
        assert_eq!(autopilot(&state), vec![PlayerAction::Jump]);
    }

    #[test]
    fn test_ducks_bird_then_stands() {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning, &sprites(), 1, 0);
        let front = state.player.shape().rect.right();
        state.air_hazards.push(Hazard::new(
            99,
            HazardKind::Air,
            front + 30.0,
            tuning.ground_y - tuning.air_clearance,
            sprites().bird,
        ));
        assert_eq!(autopilot(&state), vec![PlayerAction::Duck]);

        state.player.duck();
        assert!(autopilot(&state).is_empty(), "stay down while the bird passes");

        state.air_hazards.clear();
        assert_eq!(autopilot(&state), vec![PlayerAction::Stand]);
    }
}
