//! Arcade physics port.
//!
//! Games talk to physics only through [`ArcadeWorld`]. Two backends implement it:
//! the Rapier-backed `PhysicsWorld` (feature `physics`) and the deterministic
//! [`ScriptedWorld`](crate::core::scripted::ScriptedWorld) used for headless runs and tests.

use glam::Vec2;

use crate::api::types::EntityId;

/// Number of distinct body groups a world can tell apart.
pub const MAX_GROUPS: u8 = 15;

/// Collision group a body belongs to. Relations are registered between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyGroup(u8);

impl BodyGroup {
    pub const fn new(index: u8) -> Self {
        assert!(index < MAX_GROUPS, "body group index out of range");
        Self(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Moved by velocity and gravity, pushed out of whatever it collides with.
    Dynamic,
    /// Immovable. Collision only.
    Static,
}

/// Builder for describing an axis-aligned arcade body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub group: BodyGroup,
    /// Center of the body in world space.
    pub position: Vec2,
    /// Full width and height of the box.
    pub size: Vec2,
    pub velocity: Vec2,
    /// Restitution used for every rebound of this body (0 = dead stop, 1 = elastic).
    pub bounce: f32,
    pub gravity_scale: f32,
    /// Keep the body inside the world rectangle.
    pub collide_world_bounds: bool,
}

impl BodyDesc {
    /// Create a dynamic body description with the given box size.
    pub fn dynamic(group: BodyGroup, size: Vec2) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            group,
            position: Vec2::ZERO,
            size,
            velocity: Vec2::ZERO,
            bounce: 0.0,
            gravity_scale: 1.0,
            collide_world_bounds: false,
        }
    }

    /// Create a static body description with the given box size.
    pub fn fixed(group: BodyGroup, size: Vec2) -> Self {
        Self {
            body_type: BodyType::Static,
            group,
            position: Vec2::ZERO,
            size,
            velocity: Vec2::ZERO,
            bounce: 0.0,
            gravity_scale: 0.0,
            collide_world_bounds: false,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_world_bounds(mut self, enabled: bool) -> Self {
        self.collide_world_bounds = enabled;
        self
    }
}

/// How two groups interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Bodies are separated on contact.
    Collider,
    /// Bodies pass through each other; only the contact is reported.
    Overlap,
}

/// Identifies a registered relation in reported contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationId(pub u32);

/// A relationship between two body groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDesc {
    pub kind: RelationKind,
    pub first: BodyGroup,
    pub second: BodyGroup,
    /// Report contacts for this relation from `step`.
    pub notify: bool,
}

impl RelationDesc {
    pub fn collider(first: BodyGroup, second: BodyGroup) -> Self {
        Self {
            kind: RelationKind::Collider,
            first,
            second,
            notify: false,
        }
    }

    pub fn overlap(first: BodyGroup, second: BodyGroup) -> Self {
        Self {
            kind: RelationKind::Overlap,
            first,
            second,
            notify: false,
        }
    }

    /// Report every contact that starts under this relation.
    pub fn notifying(mut self) -> Self {
        self.notify = true;
        self
    }

    /// Whether a pair of groups (in any order) falls under this relation.
    pub fn matches(&self, a: BodyGroup, b: BodyGroup) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

/// A contact that started during the last step, bound by role:
/// `first` belongs to the relation's first group, `second` to its second group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub relation: RelationId,
    pub first: EntityId,
    pub second: EntityId,
}

/// Orders a pair of `(entity, group)` by the roles of `relation`.
pub(crate) fn bind_roles(
    relation: &RelationDesc,
    a: (EntityId, BodyGroup),
    b: (EntityId, BodyGroup),
) -> (EntityId, EntityId) {
    if a.1 == relation.first && b.1 == relation.second {
        (a.0, b.0)
    } else {
        (b.0, a.0)
    }
}

/// The capabilities gameplay code needs from a physics world.
///
/// Operations on an unknown entity are no-ops; reads return a zero value.
pub trait ArcadeWorld {
    fn set_gravity(&mut self, gravity: Vec2);

    /// Set the rectangle `(0, 0)..size` that world-bounded bodies stay inside.
    fn set_bounds(&mut self, size: Vec2);

    fn create_body(&mut self, id: EntityId, desc: &BodyDesc);

    fn remove_body(&mut self, id: EntityId);

    fn add_relation(&mut self, relation: RelationDesc) -> RelationId;

    fn relation(&self, id: RelationId) -> Option<&RelationDesc>;

    fn set_velocity(&mut self, id: EntityId, vel: Vec2);

    fn velocity(&self, id: EntityId) -> Vec2;

    fn position(&self, id: EntityId) -> Option<Vec2>;

    /// Whether the body rests on another body underneath it, as of the last step.
    fn touching_down(&self, id: EntityId) -> bool;

    /// Take the body out of the simulation. It stops moving, colliding and overlapping.
    fn disable_body(&mut self, id: EntityId);

    /// Put a disabled body back at `pos` with zero velocity.
    fn enable_body(&mut self, id: EntityId, pos: Vec2);

    fn is_body_enabled(&self, id: EntityId) -> bool;

    /// Advance the simulation by `dt` seconds and append the contacts that started.
    /// Does nothing while paused.
    fn step(&mut self, dt: f32, contacts: &mut Vec<Contact>);

    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    fn body_count(&self) -> usize;

    fn set_velocity_x(&mut self, id: EntityId, vx: f32) {
        let vel = self.velocity(id);
        self.set_velocity(id, Vec2::new(vx, vel.y));
    }

    fn set_velocity_y(&mut self, id: EntityId, vy: f32) {
        let vel = self.velocity(id);
        self.set_velocity(id, Vec2::new(vel.x, vy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: BodyGroup = BodyGroup::new(0);
    const B: BodyGroup = BodyGroup::new(1);

    #[test]
    fn relation_matches_either_order() {
        let rel = RelationDesc::overlap(A, B);
        assert!(rel.matches(A, B));
        assert!(rel.matches(B, A));
        assert!(!rel.matches(A, A));
    }

    #[test]
    fn roles_follow_relation_order() {
        let rel = RelationDesc::collider(A, B).notifying();
        let (first, second) = bind_roles(&rel, (EntityId(7), B), (EntityId(3), A));
        assert_eq!(first, EntityId(3));
        assert_eq!(second, EntityId(7));
    }

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(A, Vec2::new(32.0, 48.0))
            .with_position(Vec2::new(100.0, 450.0))
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_bounce(0.2)
            .with_world_bounds(true);

        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec2::new(100.0, 450.0));
        assert_eq!(desc.velocity, Vec2::new(1.0, 2.0));
        assert!((desc.bounce - 0.2).abs() < 0.001);
        assert!(desc.collide_world_bounds);
        assert_eq!(BodyDesc::fixed(B, Vec2::ONE).gravity_scale, 0.0);
    }
}
