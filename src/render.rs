//! Render-facing output
//!
//! A `Frame` is everything the host renderer reads after a tick: entities in
//! draw order, HUD scalars, the phase, and the handles it must drop.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{EnemyKind, EntityHandle, GamePhase, ProjectileOwner, SimulationState};

/// Variant tag for a renderable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RenderKind {
    Player { invincibility_ticks: u32 },
    Projectile(ProjectileOwner),
    Enemy { kind: EnemyKind, hp: u8 },
    Particle { life_ticks: u32 },
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    /// Registry handle (`None` for the player)
    pub handle: Option<EntityHandle>,
    pub kind: RenderKind,
    pub pos: Vec2,
}

/// HUD scalars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub wave: u32,
    pub best_score: u64,
}

/// Output of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Player, projectiles, enemies, particles, in that order
    pub renderables: Vec<Renderable>,
    pub hud: Hud,
    pub phase: GamePhase,
    /// Entities removed this tick whose render objects must be dropped
    pub detached: Vec<EntityHandle>,
}

impl Frame {
    /// Capture the committed state
    pub fn capture(state: &SimulationState, best_score: u64) -> Self {
        let registry = &state.registry;
        let mut renderables = Vec::with_capacity(
            1 + registry.enemy_count() + registry.particle_count() + registry.projectiles().count(),
        );

        renderables.push(Renderable {
            handle: None,
            kind: RenderKind::Player {
                invincibility_ticks: state.player.invincibility_ticks,
            },
            pos: state.player.pos,
        });
        renderables.extend(registry.projectiles().map(|(key, p)| Renderable {
            handle: Some(EntityHandle::Projectile(key)),
            kind: RenderKind::Projectile(p.owner),
            pos: p.pos,
        }));
        renderables.extend(registry.enemies().map(|(key, e)| Renderable {
            handle: Some(EntityHandle::Enemy(key)),
            kind: RenderKind::Enemy {
                kind: e.kind,
                hp: e.hp,
            },
            pos: e.pos,
        }));
        renderables.extend(registry.particles().map(|(key, p)| Renderable {
            handle: Some(EntityHandle::Particle(key)),
            kind: RenderKind::Particle {
                life_ticks: p.life_ticks,
            },
            pos: p.pos,
        }));

        Self {
            renderables,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                wave: state.wave,
                best_score,
            },
            phase: state.phase,
            detached: registry.detached().to_vec(),
        }
    }
}
