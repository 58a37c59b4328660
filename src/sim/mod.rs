//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only (all rates are per tick)
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (slot order within each registry map)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lifecycle;
pub mod movement;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::circles_overlap;
pub use lifecycle::ResetMode;
pub use registry::{Entity, EntityHandle, EntityKind, Registry};
pub use spawner::{batch_size, spawn_interval};
pub use state::{
    Enemy, EnemyKind, GameEvent, GamePhase, Particle, Player, Projectile, ProjectileOwner,
    SimulationState,
};
pub use tick::{TickInput, tick};
