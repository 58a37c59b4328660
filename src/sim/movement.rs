//! Movement and physics step
//!
//! Integrates velocity into position for every entity kind and culls
//! anything that has left the field.

use glam::Vec2;

use super::registry::EntityHandle;
use super::state::{Enemy, EnemyKind, Player, SimulationState};
use super::tick::TickInput;
use crate::consts::*;
use crate::{clamp_to_margins, is_offscreen};

/// Velocity the player is steering toward for this input
pub fn player_target_velocity(input: &TickInput) -> Vec2 {
    let axis = |neg: bool, pos: bool| match (neg, pos) {
        (true, false) => -PLAYER_SPEED,
        (false, true) => PLAYER_SPEED,
        _ => 0.0,
    };
    Vec2::new(axis(input.left, input.right), axis(input.up, input.down))
}

/// Ease the player's velocity toward the input target and move within the margins
pub fn step_player(player: &mut Player, input: &TickInput) {
    let target = player_target_velocity(input);
    player.vel += (target - player.vel) * PLAYER_DAMPING;
    player.pos = clamp_to_margins(player.pos + player.vel);

    player.invincibility_ticks = player.invincibility_ticks.saturating_sub(1);
    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);
}

/// Move one enemy; Scouts bounce between the top and bottom margins
pub fn step_enemy(enemy: &mut Enemy) {
    enemy.pos += enemy.vel;

    if enemy.kind == EnemyKind::Scout {
        let top = FIELD_MARGIN;
        let bottom = FIELD_HEIGHT - FIELD_MARGIN;
        if (enemy.pos.y <= top && enemy.vel.y < 0.0) || (enemy.pos.y >= bottom && enemy.vel.y > 0.0) {
            enemy.vel.y *= -1.0;
        }
        enemy.pos.y = enemy.pos.y.clamp(top, bottom);
    }
}

/// Advance every entity by one tick
pub fn step(state: &mut SimulationState, input: &TickInput) {
    step_player(&mut state.player, input);

    let mut culled: Vec<EntityHandle> = Vec::new();

    for (key, enemy) in state.registry.enemies_mut() {
        step_enemy(enemy);
        if enemy.pos.x < -OFFSCREEN_MARGIN {
            culled.push(EntityHandle::Enemy(key));
        }
    }

    for (key, projectile) in state.registry.projectiles_mut() {
        projectile.pos += projectile.vel;
        if is_offscreen(projectile.pos) {
            culled.push(EntityHandle::Projectile(key));
        }
    }

    for (key, particle) in state.registry.particles_mut() {
        particle.pos += particle.vel;
        particle.life_ticks = particle.life_ticks.saturating_sub(1);
        if particle.life_ticks == 0 {
            culled.push(EntityHandle::Particle(key));
        }
    }

    for handle in culled {
        state.registry.remove(handle);
    }
}
