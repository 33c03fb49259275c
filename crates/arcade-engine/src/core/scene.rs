use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Flat entity storage. Insertion order is render order.
/// Entities sharing a tag form a group (stars, bombs, platforms).
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID, keeping the order of the rest.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// IDs of every entity in a group, in spawn order.
    pub fn ids_by_tag(&self, tag: &str) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.id)
            .collect()
    }

    /// Number of active entities in a group.
    pub fn count_active(&self, tag: &str) -> usize {
        self.entities
            .iter()
            .filter(|e| e.active && e.tag == tag)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

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
    use glam::Vec2;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(10.0, 20.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn despawn_keeps_order() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        scene.despawn(EntityId(1));
        let ids: Vec<_> = scene.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(2), EntityId(3)]);
        assert!(scene.despawn(EntityId(9)).is_none());
    }

    #[test]
    fn groups_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("star"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("bomb"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("star"));
        scene.get_mut(EntityId(3)).unwrap().active = false;

        assert_eq!(scene.ids_by_tag("star"), vec![EntityId(1), EntityId(3)]);
        assert_eq!(scene.count_active("star"), 1);
        assert_eq!(scene.count_active("bomb"), 1);
        assert_eq!(scene.find_by_tag("bomb").unwrap().id, EntityId(2));
    }
}
