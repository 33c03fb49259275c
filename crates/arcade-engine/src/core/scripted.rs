//! Deterministic arcade world.
//!
//! Integrates velocity and gravity with no shape tests. Ground contact and
//! contacts between bodies are whatever the caller says they are, which makes
//! gameplay scenarios reproducible step for step.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::arcade::{
    bind_roles, ArcadeWorld, BodyDesc, BodyType, Contact, RelationDesc, RelationId,
};

#[derive(Debug, Clone)]
struct ScriptedBody {
    desc: BodyDesc,
    pos: Vec2,
    vel: Vec2,
    enabled: bool,
}

/// An [`ArcadeWorld`] driven by script instead of shape tests.
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    gravity: Vec2,
    bounds: Option<Vec2>,
    bodies: HashMap<EntityId, ScriptedBody>,
    relations: Vec<RelationDesc>,
    grounded: HashSet<EntityId>,
    queued: Vec<(EntityId, EntityId)>,
    paused: bool,
    steps: u64,
}

impl ScriptedWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare whether `id` is resting on something.
    pub fn set_touching_down(&mut self, id: EntityId, touching: bool) {
        if touching {
            self.grounded.insert(id);
        } else {
            self.grounded.remove(&id);
        }
    }

    /// Queue a contact between two bodies, reported by the next unpaused step.
    /// Dropped if either body is disabled by then or no notifying relation covers the pair.
    pub fn queue_contact(&mut self, a: EntityId, b: EntityId) {
        self.queued.push((a, b));
    }

    /// Move a body directly.
    pub fn teleport(&mut self, id: EntityId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = pos;
        }
    }

    /// Number of steps that actually advanced the simulation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn contact_for(&self, a: EntityId, b: EntityId) -> Option<Contact> {
        let body_a = self.bodies.get(&a).filter(|body| body.enabled)?;
        let body_b = self.bodies.get(&b).filter(|body| body.enabled)?;
        let (group_a, group_b) = (body_a.desc.group, body_b.desc.group);

        self.relations
            .iter()
            .enumerate()
            .find(|(_, rel)| rel.notify && rel.matches(group_a, group_b))
            .map(|(index, rel)| {
                let (first, second) = bind_roles(rel, (a, group_a), (b, group_b));
                Contact {
                    relation: RelationId(index as u32),
                    first,
                    second,
                }
            })
    }

    fn keep_in_bounds(bounds: Vec2, body: &mut ScriptedBody) {
        let half = body.desc.size / 2.0;
        let bounce = body.desc.bounce;

        if body.pos.x - half.x < 0.0 {
            body.pos.x = half.x;
            body.vel.x = -body.vel.x * bounce;
        } else if body.pos.x + half.x > bounds.x {
            body.pos.x = bounds.x - half.x;
            body.vel.x = -body.vel.x * bounce;
        }

        if body.pos.y - half.y < 0.0 {
            body.pos.y = half.y;
            body.vel.y = -body.vel.y * bounce;
        } else if body.pos.y + half.y > bounds.y {
            body.pos.y = bounds.y - half.y;
            body.vel.y = -body.vel.y * bounce;
        }
    }
}

impl ArcadeWorld for ScriptedWorld {
    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn set_bounds(&mut self, size: Vec2) {
        self.bounds = Some(size);
    }

    fn create_body(&mut self, id: EntityId, desc: &BodyDesc) {
        self.bodies.insert(
            id,
            ScriptedBody {
                desc: desc.clone(),
                pos: desc.position,
                vel: desc.velocity,
                enabled: true,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) {
        self.bodies.remove(&id);
        self.grounded.remove(&id);
    }

    fn add_relation(&mut self, relation: RelationDesc) -> RelationId {
        self.relations.push(relation);
        RelationId(self.relations.len() as u32 - 1)
    }

    fn relation(&self, id: RelationId) -> Option<&RelationDesc> {
        self.relations.get(id.0 as usize)
    }

    fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            if body.desc.body_type == BodyType::Dynamic {
                body.vel = vel;
            }
        }
    }

    fn velocity(&self, id: EntityId) -> Vec2 {
        self.bodies.get(&id).map(|body| body.vel).unwrap_or(Vec2::ZERO)
    }

    fn position(&self, id: EntityId) -> Option<Vec2> {
        self.bodies.get(&id).map(|body| body.pos)
    }

    fn touching_down(&self, id: EntityId) -> bool {
        self.grounded.contains(&id)
            && self.bodies.get(&id).is_some_and(|body| body.enabled)
    }

    fn disable_body(&mut self, id: EntityId) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.enabled = false;
        }
    }

    fn enable_body(&mut self, id: EntityId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.enabled = true;
            body.pos = pos;
            body.vel = Vec2::ZERO;
        }
    }

    fn is_body_enabled(&self, id: EntityId) -> bool {
        self.bodies.get(&id).is_some_and(|body| body.enabled)
    }

    fn step(&mut self, dt: f32, contacts: &mut Vec<Contact>) {
        if self.paused {
            return;
        }

        let gravity = self.gravity;
        let bounds = self.bounds;
        for body in self.bodies.values_mut() {
            if !body.enabled || body.desc.body_type == BodyType::Static {
                continue;
            }
            body.vel += gravity * body.desc.gravity_scale * dt;
            body.pos += body.vel * dt;
            if let (Some(bounds), true) = (bounds, body.desc.collide_world_bounds) {
                Self::keep_in_bounds(bounds, body);
            }
        }

        for (a, b) in std::mem::take(&mut self.queued) {
            if let Some(contact) = self.contact_for(a, b) {
                contacts.push(contact);
            }
        }

        self.steps += 1;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arcade::BodyGroup;

    const HERO: BodyGroup = BodyGroup::new(0);
    const COIN: BodyGroup = BodyGroup::new(1);

    fn world_with_pair() -> (ScriptedWorld, RelationId) {
        let mut world = ScriptedWorld::new();
        world.create_body(EntityId(1), &BodyDesc::dynamic(HERO, Vec2::splat(10.0)));
        world.create_body(EntityId(2), &BodyDesc::dynamic(COIN, Vec2::splat(10.0)));
        let rel = world.add_relation(RelationDesc::overlap(HERO, COIN).notifying());
        (world, rel)
    }

    #[test]
    fn gravity_integrates_dynamic_bodies() {
        let mut world = ScriptedWorld::new();
        world.set_gravity(Vec2::new(0.0, 100.0));
        world.create_body(EntityId(1), &BodyDesc::dynamic(HERO, Vec2::ONE));
        world.create_body(EntityId(2), &BodyDesc::fixed(COIN, Vec2::ONE));

        let mut contacts = Vec::new();
        for _ in 0..10 {
            world.step(0.1, &mut contacts);
        }

        assert!(world.position(EntityId(1)).unwrap().y > 0.0);
        assert_eq!(world.position(EntityId(2)), Some(Vec2::ZERO));
    }

    #[test]
    fn queued_contact_binds_roles() {
        let (mut world, rel) = world_with_pair();
        world.queue_contact(EntityId(2), EntityId(1));

        let mut contacts = Vec::new();
        world.step(1.0 / 60.0, &mut contacts);

        assert_eq!(
            contacts,
            vec![Contact { relation: rel, first: EntityId(1), second: EntityId(2) }]
        );
    }

    #[test]
    fn disabled_body_never_reports() {
        let (mut world, _) = world_with_pair();
        world.disable_body(EntityId(2));
        world.queue_contact(EntityId(1), EntityId(2));

        let mut contacts = Vec::new();
        world.step(1.0 / 60.0, &mut contacts);
        assert!(contacts.is_empty());
    }

    #[test]
    fn paused_world_holds_contacts_and_positions() {
        let (mut world, _) = world_with_pair();
        world.set_velocity(EntityId(1), Vec2::new(50.0, 0.0));
        world.pause();
        world.queue_contact(EntityId(1), EntityId(2));

        let mut contacts = Vec::new();
        world.step(1.0, &mut contacts);
        assert!(contacts.is_empty());
        assert_eq!(world.position(EntityId(1)), Some(Vec2::ZERO));
        assert_eq!(world.steps(), 0);

        world.resume();
        world.step(1.0, &mut contacts);
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn world_bounds_reflect_with_bounce() {
        let mut world = ScriptedWorld::new();
        world.set_bounds(Vec2::new(100.0, 100.0));
        world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(HERO, Vec2::splat(10.0))
                .with_position(Vec2::new(90.0, 50.0))
                .with_velocity(Vec2::new(100.0, 0.0))
                .with_gravity_scale(0.0)
                .with_bounce(1.0)
                .with_world_bounds(true),
        );

        let mut contacts = Vec::new();
        world.step(0.1, &mut contacts);

        assert_eq!(world.position(EntityId(1)).unwrap().x, 95.0);
        assert_eq!(world.velocity(EntityId(1)).x, -100.0);
    }

    #[test]
    fn enable_resets_position_and_velocity() {
        let (mut world, _) = world_with_pair();
        world.set_velocity(EntityId(2), Vec2::new(3.0, 4.0));
        world.disable_body(EntityId(2));
        assert!(!world.is_body_enabled(EntityId(2)));

        world.enable_body(EntityId(2), Vec2::new(12.0, 0.0));
        assert!(world.is_body_enabled(EntityId(2)));
        assert_eq!(world.position(EntityId(2)), Some(Vec2::new(12.0, 0.0)));
        assert_eq!(world.velocity(EntityId(2)), Vec2::ZERO);
    }
}
