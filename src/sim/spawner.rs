//! Enemy spawning, fire gating and the wave clock
//!
//! Cadence and batch size are pure functions of the current wave, so a wave
//! change takes effect on the next tick without any restart.

use glam::Vec2;
use rand::Rng;

use super::registry::EnemyKey;
use super::state::{Enemy, EnemyKind, GameEvent, Projectile, ProjectileOwner, SimulationState};
use super::tick::TickInput;
use crate::consts::*;

/// Ticks between spawn batches for a wave
pub fn spawn_interval(wave: u32) -> u32 {
    SPAWN_INTERVAL_BASE
        .saturating_sub(SPAWN_INTERVAL_STEP.saturating_mul(wave))
        .max(SPAWN_INTERVAL_FLOOR)
}

/// Enemies per spawn batch for a wave
pub fn batch_size(wave: u32) -> u32 {
    (1 + wave / WAVES_PER_EXTRA_SPAWN).min(MAX_BATCH_SIZE)
}

/// Roll a fresh Scout fire cooldown
fn roll_fire_cooldown(rng: &mut impl Rng) -> u32 {
    rng.random_range(SCOUT_FIRE_COOLDOWN_MIN..=SCOUT_FIRE_COOLDOWN_MAX)
}

/// Build one enemy just past the right edge
pub fn roll_enemy(rng: &mut impl Rng) -> Enemy {
    let kind = if rng.random_bool(SCOUT_CHANCE) {
        EnemyKind::Scout
    } else {
        EnemyKind::Fighter
    };

    let y = rng.random_range(FIELD_MARGIN..=FIELD_HEIGHT - FIELD_MARGIN);
    let drift = ENEMY_BASE_DRIFT + rng.random_range(0.0..ENEMY_DRIFT_JITTER);
    let pos = Vec2::new(ENEMY_SPAWN_X, y);

    match kind {
        EnemyKind::Fighter => Enemy::new(kind, pos, Vec2::new(-drift, 0.0), None),
        EnemyKind::Scout => {
            let speed = rng.random_range(SCOUT_MIN_VERTICAL_SPEED..SCOUT_MAX_VERTICAL_SPEED);
            let vy = if rng.random_bool(0.5) { speed } else { -speed };
            let cooldown = SCOUT_INITIAL_FIRE_DELAY + roll_fire_cooldown(rng);
            Enemy::new(kind, pos, Vec2::new(-drift, vy), Some(cooldown))
        }
    }
}

/// Accumulate the spawn timer and emit a batch when it reaches the cadence.
/// Returns the number of enemies spawned.
pub fn spawn_enemies(state: &mut SimulationState) -> u32 {
    state.spawn_ticks += 1;
    if state.spawn_ticks < spawn_interval(state.wave) {
        return 0;
    }
    state.spawn_ticks = 0;

    let count = batch_size(state.wave);
    for _ in 0..count {
        let enemy = roll_enemy(&mut state.rng);
        state.registry.insert_enemy(enemy);
    }
    log::debug!("Spawned {} enemies (wave {})", count, state.wave);
    count
}

/// Count down Scout cooldowns and fire from those inside the field
pub fn enemy_fire(state: &mut SimulationState) {
    let mut shooters: Vec<(EnemyKey, Vec2)> = Vec::new();

    for (key, enemy) in state.registry.enemies_mut() {
        if let Some(cooldown) = enemy.fire_cooldown.as_mut() {
            *cooldown = cooldown.saturating_sub(1);
            if *cooldown == 0 && enemy.in_field() {
                shooters.push((key, enemy.pos));
            }
        }
    }

    for (key, pos) in shooters {
        // A full pool holds the shot; the Scout retries next tick
        if state.registry.projectile_count(ProjectileOwner::Enemy) >= MAX_ENEMY_PROJECTILES {
            break;
        }
        state.registry.insert_projectile(Projectile::enemy(pos));
        let next = roll_fire_cooldown(&mut state.rng);
        if let Some(enemy) = state.registry.enemy_mut(key) {
            enemy.fire_cooldown = Some(next);
        }
    }
}

/// Spawn a player shot if fire is held and the weapon is ready
pub fn player_fire(state: &mut SimulationState, input: &TickInput) -> bool {
    if !input.fire || state.player.fire_cooldown > 0 {
        return false;
    }
    if state.registry.projectile_count(ProjectileOwner::Player) >= MAX_PLAYER_PROJECTILES {
        return false;
    }
    state.registry.insert_projectile(Projectile::player(state.player.pos));
    state.player.fire_cooldown = PLAYER_FIRE_COOLDOWN_TICKS;
    true
}

/// Advance the wave clock by one Playing tick
pub fn advance_wave_clock(state: &mut SimulationState) -> Option<GameEvent> {
    state.wave_ticks += 1;
    if state.wave_ticks < WAVE_DURATION_TICKS {
        return None;
    }
    state.wave_ticks = 0;
    state.wave += 1;
    log::debug!(
        "Wave {} (interval {}, batch {})",
        state.wave,
        spawn_interval(state.wave),
        batch_size(state.wave)
    );
    Some(GameEvent::WaveAdvanced { wave: state.wave })
}

/// Run the spawner for one tick
pub fn step(state: &mut SimulationState, input: &TickInput) {
    player_fire(state, input);
    spawn_enemies(state);
    enemy_fire(state);
}
