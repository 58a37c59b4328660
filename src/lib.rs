//! Wave Blaster - A side-scrolling wave shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (registry, movement, spawning, collisions, lifecycle)
//! - `session`: Controller owning the simulation, input table and best-score gateway
//! - `input`: Key-state side table sampled once per tick
//! - `render`: Per-tick output read by the host renderer
//! - `visuals`: Pure visual mappings the host applies
//! - `persistence`: Best-score storage
//! - `settings`: Session configuration

pub mod input;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod visuals;

pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (all rates are per tick)
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Player movement margin from each field edge
    pub const FIELD_MARGIN: f32 = 50.0;
    /// Distance beyond the field at which entities are culled
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Fraction of the gap to the target velocity closed each tick
    pub const PLAYER_DAMPING: f32 = 0.2;
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_FIRE_COOLDOWN_TICKS: u32 = 10;
    pub const INVINCIBILITY_TICKS: u32 = 60;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 10.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 12.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 6.0;
    pub const MAX_PLAYER_PROJECTILES: usize = 16;
    pub const MAX_ENEMY_PROJECTILES: usize = 32;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 15.0;
    pub const ENEMY_BASE_DRIFT: f32 = 2.0;
    pub const ENEMY_DRIFT_JITTER: f32 = 2.0;
    /// Spawn x, just past the right edge
    pub const ENEMY_SPAWN_X: f32 = FIELD_WIDTH + 30.0;
    pub const FIGHTER_HP: u8 = 1;
    pub const SCOUT_HP: u8 = 2;
    pub const FIGHTER_POINTS: u64 = 10;
    pub const SCOUT_POINTS: u64 = 20;
    /// Probability that a spawned enemy is a Scout
    pub const SCOUT_CHANCE: f64 = 0.3;
    pub const SCOUT_MIN_VERTICAL_SPEED: f32 = 1.0;
    pub const SCOUT_MAX_VERTICAL_SPEED: f32 = 2.0;
    pub const SCOUT_INITIAL_FIRE_DELAY: u32 = 60;
    pub const SCOUT_FIRE_COOLDOWN_MIN: u32 = 90;
    pub const SCOUT_FIRE_COOLDOWN_MAX: u32 = 150;

    /// Spawn cadence: `max(SPAWN_INTERVAL_FLOOR, SPAWN_INTERVAL_BASE - SPAWN_INTERVAL_STEP * wave)`
    pub const SPAWN_INTERVAL_BASE: u32 = 120;
    pub const SPAWN_INTERVAL_STEP: u32 = 5;
    pub const SPAWN_INTERVAL_FLOOR: u32 = 30;
    /// Batch size: `min(MAX_BATCH_SIZE, 1 + wave / WAVES_PER_EXTRA_SPAWN)`
    pub const MAX_BATCH_SIZE: u32 = 4;
    pub const WAVES_PER_EXTRA_SPAWN: u32 = 3;
    /// Playing ticks per wave
    pub const WAVE_DURATION_TICKS: u32 = 1800;

    /// Explosion particles
    pub const EXPLOSION_PARTICLES: usize = 10;
    pub const PARTICLE_LIFETIME_TICKS: u32 = 30;
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;
    pub const MAX_PARTICLES: usize = 256;
}

/// Centre of the playable field
#[inline]
pub fn field_center() -> Vec2 {
    Vec2::new(consts::FIELD_WIDTH / 2.0, consts::FIELD_HEIGHT / 2.0)
}

/// Clamp a position to the player's movement rectangle
#[inline]
pub fn clamp_to_margins(pos: Vec2) -> Vec2 {
    use consts::*;
    Vec2::new(
        pos.x.clamp(FIELD_MARGIN, FIELD_WIDTH - FIELD_MARGIN),
        pos.y.clamp(FIELD_MARGIN, FIELD_HEIGHT - FIELD_MARGIN),
    )
}

/// True once a position has left the field plus the cull margin on any side
#[inline]
pub fn is_offscreen(pos: Vec2) -> bool {
    use consts::*;
    pos.x < -OFFSCREEN_MARGIN
        || pos.x > FIELD_WIDTH + OFFSCREEN_MARGIN
        || pos.y < -OFFSCREEN_MARGIN
        || pos.y > FIELD_HEIGHT + OFFSCREEN_MARGIN
}
