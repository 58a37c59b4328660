//! Game state and core simulation types
//!
//! Everything a session mutates lives in one `SimulationState` value.
//! Reset replaces the value wholesale.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::registry::Registry;
use crate::consts::*;
use crate::field_center;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for an explicit start; nothing advances
    Ready,
    /// Active gameplay
    Playing,
    /// Frozen; only render reads are allowed
    Paused,
    /// Lives exhausted, terminal until reset
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks of damage immunity left after a hit
    pub invincibility_ticks: u32,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_MARGIN * 2.0, field_center().y),
            vel: Vec2::ZERO,
            invincibility_ticks: 0,
            fire_cooldown: 0,
        }
    }
}

impl Player {
    pub fn is_invincible(&self) -> bool {
        self.invincibility_ticks > 0
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    /// Player shot heading +x
    pub fn player(pos: Vec2) -> Self {
        Self {
            owner: ProjectileOwner::Player,
            pos,
            vel: Vec2::new(PLAYER_PROJECTILE_SPEED, 0.0),
            radius: PROJECTILE_RADIUS,
        }
    }

    /// Enemy shot heading -x
    pub fn enemy(pos: Vec2) -> Self {
        Self {
            owner: ProjectileOwner::Enemy,
            pos,
            vel: Vec2::new(-ENEMY_PROJECTILE_SPEED, 0.0),
            radius: PROJECTILE_RADIUS,
        }
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// One hit, never fires
    Fighter,
    /// Two hits, oscillates vertically and fires back
    Scout,
}

impl EnemyKind {
    pub fn max_hp(&self) -> u8 {
        match self {
            EnemyKind::Fighter => FIGHTER_HP,
            EnemyKind::Scout => SCOUT_HP,
        }
    }

    /// Score awarded for a kill
    pub fn points(&self) -> u64 {
        match self {
            EnemyKind::Fighter => FIGHTER_POINTS,
            EnemyKind::Scout => SCOUT_POINTS,
        }
    }
}

/// An enemy ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: u8,
    pub radius: f32,
    /// Ticks until the next shot (`None` for kinds that never fire)
    pub fire_cooldown: Option<u32>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, vel: Vec2, fire_cooldown: Option<u32>) -> Self {
        Self {
            kind,
            pos,
            vel,
            hp: kind.max_hp(),
            radius: ENEMY_RADIUS,
            fire_cooldown,
        }
    }

    /// Whether the enemy has crossed into the visible field
    pub fn in_field(&self) -> bool {
        self.pos.x < FIELD_WIDTH
    }
}

/// A particle for visual effects (never collides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before removal
    pub life_ticks: u32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life_ticks: u32) -> Self {
        Self {
            pos,
            vel,
            life_ticks,
        }
    }
}

/// Something that happened during a tick, for the host (audio, persistence, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyDestroyed {
        kind: EnemyKind,
        points: u64,
        pos: Vec2,
    },
    PlayerHit {
        lives_left: u8,
    },
    WaveAdvanced {
        wave: u32,
    },
    GameOver {
        score: u64,
        wave: u32,
    },
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Session seed, reused on reset
    pub seed: u64,
    /// Injected generator for spawn and fire timing
    pub rng: Pcg32,
    pub starting_lives: u8,
    pub max_particles: usize,
    pub score: u64,
    pub lives: u8,
    /// Current wave (1-based)
    pub wave: u32,
    pub phase: GamePhase,
    /// Playing ticks since the last wave advance
    pub wave_ticks: u32,
    /// Ticks accumulated toward the next spawn batch
    pub spawn_ticks: u32,
    /// Playing ticks elapsed this session
    pub time_ticks: u64,
    pub player: Player,
    pub registry: Registry,
}

impl SimulationState {
    /// Create a new state with default lives and particle budget
    pub fn new(seed: u64) -> Self {
        Self::with_limits(seed, STARTING_LIVES, MAX_PARTICLES)
    }

    pub fn with_limits(seed: u64, starting_lives: u8, max_particles: usize) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            starting_lives,
            max_particles,
            score: 0,
            lives: starting_lives,
            wave: 1,
            phase: GamePhase::Ready,
            wave_ticks: 0,
            spawn_ticks: 0,
            time_ticks: 0,
            player: Player::default(),
            registry: Registry::new(),
        }
    }

    /// Whether sub-systems run this tick
    pub fn is_advancing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = SimulationState::new(7);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert!(state.registry.is_empty());
        assert!(!state.player.is_invincible());
        assert!(!state.is_advancing());
    }

    #[test]
    fn test_enemy_kinds() {
        let scout = Enemy::new(EnemyKind::Scout, Vec2::new(820.0, 100.0), Vec2::ZERO, Some(90));
        assert_eq!(scout.hp, 2);
        assert!(!scout.in_field());
        assert_eq!(EnemyKind::Scout.points(), 20);
        assert_eq!(EnemyKind::Fighter.points(), 10);
        assert_eq!(EnemyKind::Fighter.max_hp(), 1);
    }

    #[test]
    fn test_projectile_directions() {
        assert!(Projectile::player(Vec2::ZERO).vel.x > 0.0);
        assert!(Projectile::enemy(Vec2::ZERO).vel.x < 0.0);
    }
}
