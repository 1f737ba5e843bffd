use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Marker registry: a flat Vec in spawn order.
/// Entities are never removed during a run, so iteration order is stable.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Move an entity. Returns false if the ID is unknown.
    pub fn set_position(&mut self, id: EntityId, pos: Vec3) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(0.1, 0.2, 0.3)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn set_position_moves_entity() {
        let mut scene = Scene::new();
        let id = EntityId(7);
        scene.spawn(Entity::new(id));
        assert!(scene.set_position(id, Vec3::X));
        assert_eq!(scene.get(id).unwrap().pos, Vec3::X);
        assert!(!scene.set_position(EntityId(99), Vec3::Y));
    }

    #[test]
    fn iteration_follows_spawn_order() {
        let mut scene = Scene::new();
        for i in [3, 1, 2] {
            scene.spawn(Entity::new(EntityId(i)));
        }
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("Atira"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("Moon"));
        let moon = scene.find_by_tag("Moon").unwrap();
        assert_eq!(moon.id, EntityId(2));
        assert!(scene.find_by_tag("Eros").is_none());
    }
}
