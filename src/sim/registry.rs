//! Entity registry
//!
//! Pure storage for every non-player entity. Each kind lives in its own
//! generation-checked slot map, so a handle to a removed entity can never alias
//! a slot that was reused later in the same tick.

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use super::state::{Enemy, Particle, Projectile, ProjectileOwner};

new_key_type! {
    /// Handle to a live projectile
    pub struct ProjectileKey;
    /// Handle to a live enemy
    pub struct EnemyKey;
    /// Handle to a live particle
    pub struct ParticleKey;
}

/// Entity categories held by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Projectile,
    Enemy,
    Particle,
}

/// Kind-tagged handle (slot index + generation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityHandle {
    Projectile(ProjectileKey),
    Enemy(EnemyKey),
    Particle(ParticleKey),
}

impl EntityHandle {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityHandle::Projectile(_) => EntityKind::Projectile,
            EntityHandle::Enemy(_) => EntityKind::Enemy,
            EntityHandle::Particle(_) => EntityKind::Particle,
        }
    }
}

/// Attributes for a new entity
#[derive(Debug, Clone)]
pub enum Entity {
    Projectile(Projectile),
    Enemy(Enemy),
    Particle(Particle),
}

/// Owns all projectiles, enemies and particles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    projectiles: SlotMap<ProjectileKey, Projectile>,
    enemies: SlotMap<EnemyKey, Enemy>,
    particles: SlotMap<ParticleKey, Particle>,
    /// Handles removed since the renderer last collected them
    #[serde(skip)]
    detached: Vec<EntityHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity and return its handle
    pub fn create(&mut self, entity: Entity) -> EntityHandle {
        match entity {
            Entity::Projectile(p) => EntityHandle::Projectile(self.projectiles.insert(p)),
            Entity::Enemy(e) => EntityHandle::Enemy(self.enemies.insert(e)),
            Entity::Particle(p) => EntityHandle::Particle(self.particles.insert(p)),
        }
    }

    pub fn insert_projectile(&mut self, projectile: Projectile) -> ProjectileKey {
        self.projectiles.insert(projectile)
    }

    pub fn insert_enemy(&mut self, enemy: Enemy) -> EnemyKey {
        self.enemies.insert(enemy)
    }

    pub fn insert_particle(&mut self, particle: Particle) -> ParticleKey {
        self.particles.insert(particle)
    }

    /// Remove an entity. Returns false if the handle was already dead, in
    /// which case nothing is recorded.
    pub fn remove(&mut self, handle: EntityHandle) -> bool {
        let removed = match handle {
            EntityHandle::Projectile(k) => self.projectiles.remove(k).is_some(),
            EntityHandle::Enemy(k) => self.enemies.remove(k).is_some(),
            EntityHandle::Particle(k) => self.particles.remove(k).is_some(),
        };
        if removed {
            self.detached.push(handle);
        }
        removed
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        match handle {
            EntityHandle::Projectile(k) => self.projectiles.contains_key(k),
            EntityHandle::Enemy(k) => self.enemies.contains_key(k),
            EntityHandle::Particle(k) => self.particles.contains_key(k),
        }
    }

    /// Handles of every live entity of a kind, in slot order
    pub fn handles(&self, kind: EntityKind) -> Vec<EntityHandle> {
        match kind {
            EntityKind::Projectile => self.projectiles.keys().map(EntityHandle::Projectile).collect(),
            EntityKind::Enemy => self.enemies.keys().map(EntityHandle::Enemy).collect(),
            EntityKind::Particle => self.particles.keys().map(EntityHandle::Particle).collect(),
        }
    }

    pub fn projectile(&self, key: ProjectileKey) -> Option<&Projectile> {
        self.projectiles.get(key)
    }

    pub fn enemy(&self, key: EnemyKey) -> Option<&Enemy> {
        self.enemies.get(key)
    }

    pub fn enemy_mut(&mut self, key: EnemyKey) -> Option<&mut Enemy> {
        self.enemies.get_mut(key)
    }

    pub fn particle(&self, key: ParticleKey) -> Option<&Particle> {
        self.particles.get(key)
    }

    pub fn projectiles(&self) -> impl Iterator<Item = (ProjectileKey, &Projectile)> {
        self.projectiles.iter()
    }

    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = (ProjectileKey, &mut Projectile)> {
        self.projectiles.iter_mut()
    }

    pub fn enemies(&self) -> impl Iterator<Item = (EnemyKey, &Enemy)> {
        self.enemies.iter()
    }

    pub fn enemies_mut(&mut self) -> impl Iterator<Item = (EnemyKey, &mut Enemy)> {
        self.enemies.iter_mut()
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleKey, &Particle)> {
        self.particles.iter()
    }

    pub fn particles_mut(&mut self) -> impl Iterator<Item = (ParticleKey, &mut Particle)> {
        self.particles.iter_mut()
    }

    /// Number of live projectiles fired by `owner`
    pub fn projectile_count(&self, owner: ProjectileOwner) -> usize {
        self.projectiles.values().filter(|p| p.owner == owner).count()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.enemies.is_empty() && self.particles.is_empty()
    }

    /// Remove everything, recording each handle as detached
    pub fn clear(&mut self) {
        for kind in [EntityKind::Projectile, EntityKind::Enemy, EntityKind::Particle] {
            for handle in self.handles(kind) {
                self.remove(handle);
            }
        }
    }

    /// Handles removed since the last `clear_detached`
    pub fn detached(&self) -> &[EntityHandle] {
        &self.detached
    }

    /// Forget reported handles once the renderer has dropped them
    pub fn clear_detached(&mut self) {
        self.detached.clear();
    }

    /// Take the detach list (used when carrying it across a state replacement)
    pub(crate) fn take_detached(&mut self) -> Vec<EntityHandle> {
        std::mem::take(&mut self.detached)
    }

    pub(crate) fn extend_detached(&mut self, handles: Vec<EntityHandle>) {
        self.detached.extend(handles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyKind;
    use glam::Vec2;

    fn fighter() -> Enemy {
        Enemy::new(EnemyKind::Fighter, Vec2::new(500.0, 300.0), Vec2::new(-2.0, 0.0), None)
    }

    #[test]
    fn test_create_and_iterate() {
        let mut registry = Registry::new();
        let a = registry.create(Entity::Enemy(fighter()));
        let b = registry.create(Entity::Projectile(Projectile::player(Vec2::new(100.0, 300.0))));

        assert_eq!(a.kind(), EntityKind::Enemy);
        assert_eq!(b.kind(), EntityKind::Projectile);
        assert_eq!(registry.enemy_count(), 1);
        assert_eq!(registry.handles(EntityKind::Projectile), vec![b]);
        assert_eq!(registry.projectile_count(ProjectileOwner::Player), 1);
        assert_eq!(registry.projectile_count(ProjectileOwner::Enemy), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = Registry::new();
        let handle = registry.create(Entity::Enemy(fighter()));

        assert!(registry.remove(handle));
        assert!(!registry.remove(handle));
        assert!(!registry.contains(handle));
        // Only the first removal is reported to the renderer
        assert_eq!(registry.detached(), &[handle]);
    }

    #[test]
    fn test_stale_handle_does_not_alias_reused_slot() {
        let mut registry = Registry::new();
        let old = registry.insert_enemy(fighter());
        registry.remove(EntityHandle::Enemy(old));

        let new = registry.insert_enemy(fighter());
        assert_ne!(old, new);
        assert!(registry.enemy(old).is_none());
        assert!(registry.enemy(new).is_some());
        assert!(!registry.remove(EntityHandle::Enemy(old)));
        assert!(registry.contains(EntityHandle::Enemy(new)));
    }

    #[test]
    fn test_clear_detaches_everything() {
        let mut registry = Registry::new();
        registry.insert_enemy(fighter());
        registry.insert_projectile(Projectile::enemy(Vec2::new(400.0, 200.0)));
        registry.insert_particle(Particle::new(Vec2::ZERO, Vec2::X, 30));
        registry.clear_detached();

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.detached().len(), 3);

        registry.clear_detached();
        assert!(registry.detached().is_empty());
    }
}
