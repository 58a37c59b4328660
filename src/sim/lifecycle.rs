//! Lifecycle and scoring state machine
//!
//! Ready -> Playing <-> Paused -> GameOver, with Reset available from any
//! phase. Score and lives are only mutated through `award` and
//! `damage_player`.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, SimulationState};
use crate::consts::INVINCIBILITY_TICKS;

/// Where a reset leaves the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetMode {
    /// Wait for an explicit start
    #[default]
    Ready,
    /// Resume play immediately
    Playing,
}

/// Ready -> Playing. Returns false if the session was not waiting to start.
pub fn start(state: &mut SimulationState) -> bool {
    if state.phase != GamePhase::Ready {
        return false;
    }
    state.phase = GamePhase::Playing;
    true
}

/// Playing <-> Paused; ignored in every other phase
pub fn toggle_pause(state: &mut SimulationState) -> GamePhase {
    state.phase = match state.phase {
        GamePhase::Playing => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Playing,
        other => other,
    };
    state.phase
}

/// Replace the state with a fresh one built from the same seed and limits.
/// Every entity that existed is reported as detached.
pub fn reset(state: &mut SimulationState, mode: ResetMode) {
    state.registry.clear();
    let detached = state.registry.take_detached();

    *state = SimulationState::with_limits(state.seed, state.starting_lives, state.max_particles);
    state.registry.extend_detached(detached);

    if mode == ResetMode::Playing {
        state.phase = GamePhase::Playing;
    }
}

/// Add points to the score
pub fn award(state: &mut SimulationState, points: u64) {
    state.score = state.score.saturating_add(points);
}

/// Apply one hit to the player. No-op while invincible or not playing, so
/// repeated calls in the same tick cost at most one life.
pub fn damage_player(state: &mut SimulationState) -> Vec<GameEvent> {
    if state.player.is_invincible() || state.phase != GamePhase::Playing {
        return Vec::new();
    }

    state.lives = state.lives.saturating_sub(1);
    state.player.invincibility_ticks = INVINCIBILITY_TICKS;

    let mut events = vec![GameEvent::PlayerHit {
        lives_left: state.lives,
    }];
    if state.lives == 0 {
        events.push(enter_game_over(state));
    }
    events
}

fn enter_game_over(state: &mut SimulationState) -> GameEvent {
    state.phase = GamePhase::GameOver;
    log::info!("Game over: score {} at wave {}", state.score, state.wave);
    GameEvent::GameOver {
        score: state.score,
        wave: state.wave,
    }
}
