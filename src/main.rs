//! Wave Blaster entry point
//!
//! Headless native host: runs one session with an autopilot at the input
//! seam until the game ends, then reports the result.

#[cfg(not(target_arch = "wasm32"))]
use wave_blaster::sim::{GameEvent, GamePhase, SimulationState, TickInput};

/// Safety stop for the demo run (one hour at 60 ticks per second)
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_TICKS: u64 = 60 * 60 * 60;

/// Autopilot: line up with the nearest enemy and keep firing
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &SimulationState) -> TickInput {
    let player = state.player.pos;
    let target = state
        .registry
        .enemies()
        .filter(|(_, e)| e.pos.x > player.x)
        .min_by(|(_, a), (_, b)| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(_, e)| e.pos.y);

    let (up, down) = match target {
        Some(y) if y < player.y - 4.0 => (true, false),
        Some(y) if y > player.y + 4.0 => (false, true),
        _ => (false, false),
    };
    TickInput {
        up,
        down,
        fire: true,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use wave_blaster::input::Key;
    use wave_blaster::persistence::JsonFileStore;
    use wave_blaster::{Session, Settings};

    env_logger::init();
    log::info!("Wave Blaster (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let store = JsonFileStore::new(&settings.best_score_path);
    let mut session = match Session::new(&settings, store) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            std::process::exit(1);
        }
    };
    session.start();

    let mut ticks = 0u64;
    while session.phase() != GamePhase::GameOver && ticks < MAX_DEMO_TICKS {
        // Stand in for the host's key listener
        let wanted = autopilot(session.state());
        let keys = session.keys_mut();
        keys.set(Key::Up, wanted.up);
        keys.set(Key::Down, wanted.down);
        keys.set(Key::Fire, wanted.fire);

        session.advance();
        ticks += 1;

        for event in session.events() {
            match event {
                GameEvent::WaveAdvanced { wave } => log::info!("Wave {}", wave),
                GameEvent::PlayerHit { lives_left } => log::info!("Hit! {} lives left", lives_left),
                _ => {}
            }
        }
    }

    let frame = session.teardown();
    println!(
        "Score {} | wave {} | best {} | {} ticks",
        frame.hud.score, frame.hud.wave, frame.hud.best_score, ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Session` directly; nothing to do here
}
