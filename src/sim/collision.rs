//! Collision detection and response
//!
//! Every test is circle-circle proximity. Player shots are resolved before
//! anything that can hurt the player, so a tick that both kills an enemy and
//! costs a life still credits the kill.

use glam::Vec2;
use rand::Rng;

use super::lifecycle;
use super::registry::{EnemyKey, EntityHandle, ProjectileKey};
use super::state::{GameEvent, Particle, ProjectileOwner, SimulationState};
use crate::consts::*;

/// True when two circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance_squared(b) < (radius_a + radius_b) * (radius_a + radius_b)
}

/// Spawn an explosion burst, respecting the particle budget
pub fn spawn_explosion(state: &mut SimulationState, at: Vec2) {
    for _ in 0..EXPLOSION_PARTICLES {
        if state.registry.particle_count() >= state.max_particles {
            break;
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        let vel = Vec2::from_angle(angle) * speed;
        state
            .registry
            .insert_particle(Particle::new(at, vel, PARTICLE_LIFETIME_TICKS));
    }
}

/// Player projectiles against enemies
fn resolve_player_shots(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let shots: Vec<(ProjectileKey, Vec2, f32)> = state
        .registry
        .projectiles()
        .filter(|(_, p)| p.owner == ProjectileOwner::Player)
        .map(|(key, p)| (key, p.pos, p.radius))
        .collect();
    let targets: Vec<EnemyKey> = state.registry.enemies().map(|(key, _)| key).collect();

    for (shot_key, shot_pos, shot_radius) in shots {
        for &enemy_key in &targets {
            // Dead enemies are gone from the registry and take no further hits
            let Some(enemy) = state.registry.enemy_mut(enemy_key) else {
                continue;
            };
            if !circles_overlap(shot_pos, shot_radius, enemy.pos, enemy.radius) {
                continue;
            }

            enemy.hp = enemy.hp.saturating_sub(1);
            let (kind, pos, dead) = (enemy.kind, enemy.pos, enemy.hp == 0);
            state.registry.remove(EntityHandle::Projectile(shot_key));

            if dead {
                let points = kind.points();
                lifecycle::award(state, points);
                spawn_explosion(state, pos);
                state.registry.remove(EntityHandle::Enemy(enemy_key));
                events.push(GameEvent::EnemyDestroyed { kind, points, pos });
            }
            // A shot is consumed by the first enemy it touches
            break;
        }
    }
}

/// Enemy bodies and enemy projectiles against the player
fn resolve_player_damage(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let bodies: Vec<(EntityHandle, Vec2, f32)> = state
        .registry
        .enemies()
        .map(|(key, e)| (EntityHandle::Enemy(key), e.pos, e.radius))
        .collect();
    let shots = state
        .registry
        .projectiles()
        .filter(|(_, p)| p.owner == ProjectileOwner::Enemy)
        .map(|(key, p)| (EntityHandle::Projectile(key), p.pos, p.radius));
    let hazards: Vec<(EntityHandle, Vec2, f32)> = bodies.into_iter().chain(shots).collect();

    for (handle, pos, radius) in hazards {
        if state.player.is_invincible() || !state.is_advancing() {
            break;
        }
        if !state.registry.contains(handle)
            || !circles_overlap(state.player.pos, PLAYER_RADIUS, pos, radius)
        {
            continue;
        }

        let contact = (state.player.pos + pos) * 0.5;
        spawn_explosion(state, contact);
        state.registry.remove(handle);
        events.extend(lifecycle::damage_player(state));
    }
}

/// Resolve all collisions for this tick
pub fn resolve(state: &mut SimulationState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    resolve_player_shots(state, &mut events);
    resolve_player_damage(state, &mut events);
    events
}
