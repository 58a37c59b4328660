//! Session controller
//!
//! Owns the one `SimulationState`, the key-state table and the best-score
//! store. The host calls `advance` once per timing signal and draws the
//! returned `Frame`.

use crate::input::KeyState;
use crate::persistence::{self, BestScoreStore};
use crate::render::Frame;
use crate::settings::{Settings, SettingsError};
use crate::sim::{self, GameEvent, GamePhase, ResetMode, SimulationState, lifecycle};

/// A running game
pub struct Session<S: BestScoreStore> {
    state: SimulationState,
    keys: KeyState,
    store: S,
    /// Best score as last read from or written to the store
    best_score: u64,
    /// Events from the most recent tick
    events: Vec<GameEvent>,
    /// Set by `teardown`; the session no longer ticks
    torn_down: bool,
}

impl<S: BestScoreStore> Session<S> {
    /// Create a session in the Ready phase
    pub fn new(settings: &Settings, store: S) -> Result<Self, SettingsError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        let best_score = match store.read_best_score() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                0
            }
        };
        log::info!("Session initialized with seed: {} (best {})", seed, best_score);

        Ok(Self {
            state: SimulationState::with_limits(seed, settings.starting_lives, settings.max_particles),
            keys: KeyState::new(),
            store,
            best_score,
            events: Vec::new(),
            torn_down: false,
        })
    }

    /// Ready -> Playing
    pub fn start(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let started = lifecycle::start(&mut self.state);
        if started {
            log::info!("Session started");
        }
        started
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) -> GamePhase {
        if self.torn_down {
            return self.state.phase;
        }
        let phase = lifecycle::toggle_pause(&mut self.state);
        log::debug!("Phase now {:?}", phase);
        phase
    }

    /// Back to defaults, optionally straight into play
    pub fn reset(&mut self, mode: ResetMode) {
        if self.torn_down {
            return;
        }
        lifecycle::reset(&mut self.state, mode);
        self.keys.release_all();
        self.events.clear();
        log::info!("Session reset ({:?})", mode);
    }

    /// Run one tick with the currently held keys and return the frame to draw.
    /// After teardown this only returns the final (empty) frame.
    pub fn advance(&mut self) -> Frame {
        if self.torn_down {
            self.events.clear();
            return self.frame();
        }
        let input = self.keys.sample();
        self.events = sim::tick(&mut self.state, &input);

        let final_score = self.events.iter().find_map(|e| match e {
            GameEvent::GameOver { score, .. } => Some(*score),
            _ => None,
        });
        if let Some(score) = final_score {
            self.persist_score(score);
        }

        let frame = Frame::capture(&self.state, self.best_score);
        self.state.registry.clear_detached();
        frame
    }

    /// Compare against the stored best and write if greater. Failures only
    /// leave the displayed record stale.
    fn persist_score(&mut self, score: u64) {
        match persistence::record_if_best(&mut self.store, score) {
            Ok(best) => self.best_score = best,
            Err(e) => log::warn!("Could not save best score {}: {}", score, e),
        }
    }

    /// The last committed frame, without advancing
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state, self.best_score)
    }

    /// Release every entity and stop listening for input.
    /// Returns the final frame so the renderer can drop what it still holds.
    /// The session is inert afterwards.
    pub fn teardown(&mut self) -> Frame {
        self.state.registry.clear();
        self.keys.detach();
        self.events.clear();
        self.torn_down = true;
        log::info!("Session torn down");

        let frame = Frame::capture(&self.state, self.best_score);
        self.state.registry.clear_detached();
        frame
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct state access for host tooling (debug overlays, scripted tests)
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Key-state table for the host's input listener
    pub fn keys_mut(&mut self) -> &mut KeyState {
        &mut self.keys
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::persistence::{MemoryStore, PersistenceError};

    fn settings(seed: u64) -> Settings {
        Settings {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Store whose writes always fail
    struct ReadOnlyStore(u64);

    impl BestScoreStore for ReadOnlyStore {
        fn read_best_score(&self) -> Result<u64, PersistenceError> {
            Ok(self.0)
        }

        fn write_best_score(&mut self, _score: u64) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("read-only".into()))
        }
    }

    #[test]
    fn test_ready_until_started() {
        let mut session = Session::new(&settings(1), MemoryStore::new()).unwrap();
        session.keys_mut().press(Key::Right);

        let frame = session.advance();
        assert_eq!(frame.phase, GamePhase::Ready);
        assert_eq!(session.state().time_ticks, 0);

        assert!(session.start());
        session.advance();
        assert_eq!(session.state().time_ticks, 1);
        assert!(session.state().player.vel.x > 0.0);
    }

    #[test]
    fn test_best_score_read_at_start() {
        let session = Session::new(&settings(1), MemoryStore::with_best(300)).unwrap();
        assert_eq!(session.best_score(), 300);
        assert_eq!(session.frame().hud.best_score, 300);
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        let mut session = Session::new(&settings(1), ReadOnlyStore(10)).unwrap();
        session.start();
        session.state.score = 50;
        session.state.lives = 1;
        session.state.player.pos = glam::Vec2::new(400.0, 300.0);
        session.state.registry.insert_projectile(crate::sim::Projectile::enemy(
            glam::Vec2::new(406.0, 300.0),
        ));

        let frame = session.advance();
        assert_eq!(frame.phase, GamePhase::GameOver);
        // The displayed record stays stale
        assert_eq!(session.best_score(), 10);
        assert_eq!(frame.hud.best_score, 10);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut session = Session::new(&settings(4), MemoryStore::new()).unwrap();
        session.start();
        session.keys_mut().press(Key::Fire);
        for _ in 0..30 {
            session.advance();
        }
        assert!(!session.state().registry.is_empty());

        let frame = session.teardown();
        assert!(session.state().registry.is_empty());
        assert!(!frame.detached.is_empty());
        assert!(!session.keys_mut().is_attached());
        assert!(!session.keys_mut().sample().fire);
    }

    #[test]
    fn test_advance_after_teardown_stays_empty() {
        let mut session = Session::new(&settings(4), MemoryStore::new()).unwrap();
        session.start();
        session.advance();
        session.teardown();
        assert!(session.is_torn_down());

        for _ in 0..300 {
            let frame = session.advance();
            assert!(frame.detached.is_empty());
        }
        assert!(session.state().registry.is_empty());
        assert_eq!(session.state().time_ticks, 1);

        // Lifecycle calls are ignored once torn down
        assert!(!session.start());
        session.reset(ResetMode::Playing);
        session.advance();
        assert!(session.state().registry.is_empty());
        assert_eq!(session.state().time_ticks, 1);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let bad = Settings {
            starting_lives: 0,
            ..settings(1)
        };
        assert!(matches!(
            Session::new(&bad, MemoryStore::new()),
            Err(SettingsError::Invalid(_))
        ));

        let too_many = Settings {
            starting_lives: Settings::MAX_STARTING_LIVES + 1,
            ..settings(1)
        };
        assert!(Session::new(&too_many, MemoryStore::new()).is_err());
    }
}
