//! Visual mappings applied by the host
//!
//! The simulation owns timers; how they look is decided here, as pure
//! functions of simulation data.

use crate::consts::{INVINCIBILITY_TICKS, PARTICLE_LIFETIME_TICKS};
use crate::sim::{EnemyKind, ProjectileOwner};

/// Lowest opacity reached while the invincibility pulse is dimmed
pub const MIN_PULSE_OPACITY: f32 = 0.3;
/// Ticks per full pulse cycle
pub const PULSE_PERIOD_TICKS: u32 = 10;

/// Player opacity for the remaining invincibility ticks
pub fn player_opacity(invincibility_ticks: u32) -> f32 {
    if invincibility_ticks == 0 {
        return 1.0;
    }
    let phase = (invincibility_ticks % PULSE_PERIOD_TICKS) as f32 / PULSE_PERIOD_TICKS as f32;
    let wave = 0.5 + 0.5 * (phase * std::f32::consts::TAU).cos();
    MIN_PULSE_OPACITY + (1.0 - MIN_PULSE_OPACITY) * wave
}

/// Fraction of the invincibility window still left (0-1)
pub fn invincibility_fraction(invincibility_ticks: u32) -> f32 {
    (invincibility_ticks as f32 / INVINCIBILITY_TICKS as f32).min(1.0)
}

/// Particle alpha, fading linearly with remaining life
pub fn particle_alpha(life_ticks: u32) -> f32 {
    (life_ticks as f32 / PARTICLE_LIFETIME_TICKS as f32).clamp(0.0, 1.0)
}

/// Particle colour (0xRRGGBB), shifting from white-hot to orange as it fades
pub fn particle_color(life_ticks: u32) -> u32 {
    let t = particle_alpha(life_ticks);
    let g = (0x60 as f32 + (0xFF - 0x60) as f32 * t) as u32;
    let b = (0xFF as f32 * t * t) as u32;
    0xFF_00_00 | (g << 8) | b
}

/// Base colour for an enemy kind
pub fn enemy_color(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Fighter => 0xFF4040,
        EnemyKind::Scout => 0xFFB000,
    }
}

/// Base colour for a projectile
pub fn projectile_color(owner: ProjectileOwner) -> u32 {
    match owner {
        ProjectileOwner::Player => 0x40E0FF,
        ProjectileOwner::Enemy => 0xFF60C0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opacity() {
        assert_eq!(player_opacity(0), 1.0);
        for ticks in 1..=INVINCIBILITY_TICKS {
            let opacity = player_opacity(ticks);
            assert!((MIN_PULSE_OPACITY - 1e-4..=1.0 + 1e-4).contains(&opacity));
        }
        // Dims halfway through a cycle
        assert!((player_opacity(5) - MIN_PULSE_OPACITY).abs() < 1e-4);
    }

    #[test]
    fn test_particle_fade() {
        assert_eq!(particle_alpha(PARTICLE_LIFETIME_TICKS), 1.0);
        assert_eq!(particle_alpha(0), 0.0);
        assert!((particle_alpha(15) - 0.5).abs() < 1e-6);

        assert_eq!(particle_color(PARTICLE_LIFETIME_TICKS), 0xFFFFFF);
        assert_eq!(particle_color(0), 0xFF6000);
    }

    #[test]
    fn test_invincibility_fraction() {
        assert_eq!(invincibility_fraction(0), 0.0);
        assert_eq!(invincibility_fraction(60), 1.0);
        assert_eq!(invincibility_fraction(30), 0.5);
    }
}
