//! Frame clock
//!
//! One call per external timing signal. Sequences movement, spawning,
//! collisions and the wave clock against the explicit state value.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, SimulationState};
use super::{collision, movement, spawner};

/// Input sampled once at the top of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Advance the simulation by one tick.
///
/// Returns before touching anything unless the phase is Playing, so a paused,
/// waiting or finished session is left exactly as the renderer last saw it.
pub fn tick(state: &mut SimulationState, input: &TickInput) -> Vec<GameEvent> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    state.time_ticks += 1;

    movement::step(state, input);
    spawner::step(state, input);
    let mut events = collision::resolve(state);

    if state.phase == GamePhase::Playing {
        events.extend(spawner::advance_wave_clock(state));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::lifecycle;
    use crate::sim::spawner::{batch_size, spawn_interval};
    use crate::sim::state::{Enemy, EnemyKind};
    use glam::Vec2;

    fn snapshot(state: &SimulationState) -> String {
        serde_json::to_string(state).unwrap()
    }

    #[test]
    fn test_tick_ready_does_nothing() {
        let mut state = SimulationState::new(12345);
        let before = snapshot(&state);

        let input = TickInput {
            right: true,
            fire: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &input).is_empty());
        assert_eq!(snapshot(&state), before);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = SimulationState::new(12345);
        lifecycle::start(&mut state);

        let input = TickInput {
            up: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input);
        }

        lifecycle::toggle_pause(&mut state);
        let before = snapshot(&state);
        for _ in 0..500 {
            tick(&mut state, &input);
        }
        assert_eq!(snapshot(&state), before);

        lifecycle::toggle_pause(&mut state);
        tick(&mut state, &input);
        assert_ne!(snapshot(&state), before);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = SimulationState::new(99999);
        let mut state2 = SimulationState::new(99999);
        lifecycle::start(&mut state1);
        lifecycle::start(&mut state2);

        let inputs = [
            TickInput {
                up: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                down: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..2000 {
            let input = &inputs[(i / 37) % inputs.len()];
            let e1 = tick(&mut state1, input);
            let e2 = tick(&mut state2, input);
            assert_eq!(e1, e2);
        }

        assert_eq!(snapshot(&state1), snapshot(&state2));
    }

    #[test]
    fn test_wave_advances_every_1800_ticks() {
        let mut state = SimulationState::new(2024);
        lifecycle::start(&mut state);
        // Keep the player out of harm's way
        state.player.invincibility_ticks = u32::MAX;

        let mut advances = Vec::new();
        for t in 1..=(WAVE_DURATION_TICKS * 3) {
            for event in tick(&mut state, &TickInput::default()) {
                if let GameEvent::WaveAdvanced { wave } = event {
                    advances.push((t, wave));
                }
            }
        }
        assert_eq!(advances, vec![(1800, 2), (3600, 3), (5400, 4)]);
    }

    #[test]
    fn test_new_wave_cadence_applies_next_tick() {
        let mut state = SimulationState::new(77);
        lifecycle::start(&mut state);
        state.player.invincibility_ticks = u32::MAX;
        state.wave = 9;
        state.wave_ticks = WAVE_DURATION_TICKS - 1;
        state.spawn_ticks = 0;

        let existing = state.registry.insert_enemy(Enemy::new(
            EnemyKind::Fighter,
            Vec2::new(600.0, 300.0),
            Vec2::new(-2.5, 0.0),
            None,
        ));

        // This tick spawns nothing and rolls the wave over at its end
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::WaveAdvanced { wave: 10 }]);
        assert_eq!(state.registry.enemy_count(), 1);
        assert_eq!(state.registry.enemy(existing).map(|e| e.vel.x), Some(-2.5));

        // Wave 10: a batch of 4 every 70 ticks
        assert_eq!(spawn_interval(10), 70);
        assert_eq!(batch_size(10), 4);
        for _ in 0..68 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.registry.enemy_count(), 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.registry.enemy_count(), 5);
    }

    #[test]
    fn test_removed_entities_detached_same_tick() {
        let mut state = SimulationState::new(5);
        lifecycle::start(&mut state);
        state.registry.insert_enemy(Enemy::new(
            EnemyKind::Fighter,
            Vec2::new(-49.0, 300.0),
            Vec2::new(-2.0, 0.0),
            None,
        ));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.registry.detached().len(), 1);
        assert_eq!(state.registry.enemy_count(), 0);

        state.registry.clear_detached();
        tick(&mut state, &TickInput::default());
        assert!(state.registry.detached().is_empty());
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = SimulationState::new(8);
        lifecycle::start(&mut state);
        state.lives = 1;
        state.registry.insert_enemy(Enemy::new(
            EnemyKind::Fighter,
            state.player.pos,
            Vec2::ZERO,
            None,
        ));

        let events = tick(&mut state, &TickInput::default());
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert_eq!(state.phase, GamePhase::GameOver);

        let before = snapshot(&state);
        tick(&mut state, &TickInput { fire: true, ..Default::default() });
        assert_eq!(snapshot(&state), before);
    }
}
