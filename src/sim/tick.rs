//! Fixed timestep simulation tick
//!
//! Phase order is fixed: actions → physics → spawn → collision → score.
//! Rendering happens outside, after the tick returns.

use rand::Rng;

use super::collision::CollisionSystem;
use super::entity::Entity;
use super::hazard::HazardKind;
use super::state::{SessionPhase, SessionState, SimEvent};

/// A player command decoded from input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Jump,
    /// Jump key released early
    JumpCut,
    Duck,
    Stand,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Clock time at this tick boundary
    pub now_ms: u64,
    /// Actions in the order they were received
    pub actions: Vec<PlayerAction>,
}

/// What happened during a tick
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub events: Vec<SimEvent>,
}

impl TickOutcome {
    /// The session ended this tick
    pub fn session_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SimEvent::SessionOver { .. }))
    }
}

/// Advance the session by one fixed timestep
pub fn tick<R: Rng>(state: &mut SessionState<R>, input: &TickInput, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Nothing moves after game over
    if state.phase == SessionPhase::Over {
        return outcome;
    }

    state.tick_count += 1;

    // Actions
    for action in &input.actions {
        let player = &mut state.player;
        let event = match action {
            PlayerAction::Jump => player.jump().then_some(SimEvent::Jumped),
            PlayerAction::JumpCut => {
                player.jump_cut();
                None
            }
            PlayerAction::Duck => player.duck().then_some(SimEvent::Ducked),
            PlayerAction::Stand => player.stand().then_some(SimEvent::Stood),
        };
        outcome.events.extend(event);
    }

    // Physics
    let speed = state.spawner.scroll_speed(state.score());
    state.player.update(dt);
    state.scroll_hazards(speed, dt);

    // Spawning
    if let Some(bird) = state
        .spawner
        .maybe_spawn_air(input.now_ms, state.air_timer_ms, speed)
    {
        state.air_timer_ms = input.now_ms;
        outcome.events.push(SimEvent::HazardSpawned {
            kind: HazardKind::Air,
            id: bird.id,
        });
        state.air_hazards.push(bird);
    }

    let cacti = state.spawner.maybe_spawn_ground(&state.ground_hazards, speed);
    if !cacti.is_empty() {
        state.ground_timer_ms = input.now_ms;
        outcome.events.extend(cacti.iter().map(|c| SimEvent::HazardSpawned {
            kind: HazardKind::Ground,
            id: c.id,
        }));
        state.ground_hazards.extend(cacti);
    }

    // Collisions
    let hits = CollisionSystem::resolve(
        &mut state.player,
        &state.air_hazards,
        &state.ground_hazards,
        &state.platforms,
    );
    if let Some((kind, id)) = hits.cause {
        state.phase = SessionPhase::Over;
        outcome.events.push(SimEvent::SessionOver { kind, id });
        return outcome;
    }
    if hits.landed {
        outcome.events.push(SimEvent::Landed);
    }

    // Scoring
    for (kind, hazards) in [
        (HazardKind::Air, &mut state.air_hazards),
        (HazardKind::Ground, &mut state.ground_hazards),
    ] {
        let cleared = state.tracker.award_exits(hazards);
        outcome
            .events
            .extend(cleared.into_iter().map(|id| SimEvent::HazardCleared { kind, id }));
    }

    outcome
}
