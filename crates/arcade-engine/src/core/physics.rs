use std::collections::HashMap;
use std::sync::Mutex;

use glam::Vec2;
use rapier2d::na;
use rapier2d::prelude::*;

use crate::api::types::EntityId;
use crate::core::arcade::{
    bind_roles, ArcadeWorld, BodyDesc, BodyGroup, BodyType, Contact, RelationDesc, RelationId,
    RelationKind,
};

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> na::Vector2<f32> {
    na::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &na::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Interaction bits
// ---------------------------------------------------------------------------
//
// Bits 0..14 hold solid colliders (one per body group), bit 15 the world
// bounds, bits 16..31 the overlap sensors.

const BOUNDS_BIT: u32 = 1 << 15;
const ALL_SOLID_BITS: u32 = BOUNDS_BIT - 1;
const WALL_THICKNESS: f32 = 100.0;
const NO_ENTITY: u128 = u128::MAX;

fn solid_bit(group: BodyGroup) -> u32 {
    1 << group.index()
}

fn sensor_bit(group: BodyGroup) -> u32 {
    1 << (16 + group.index() as u32)
}

fn interaction(memberships: u32, filter: u32) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(memberships),
        Group::from_bits_truncate(filter),
    )
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Handles backing one arcade body: a solid box and an overlap sensor of the same size.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub solid: ColliderHandle,
    pub sensor: ColliderHandle,
    pub group: BodyGroup,
    pub world_bounds: bool,
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        let mut guard = self.collisions.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.collisions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Arcade physics on top of Rapier2D.
///
/// Bodies never rotate and have no friction. Restitution is combined with the
/// `Max` rule, so each body's own bounce decides how it rebounds off static
/// geometry and the world bounds.
pub struct PhysicsWorld {
    gravity: na::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
    handles: HashMap<EntityId, PhysicsBody>,
    relations: Vec<RelationDesc>,
    bounds: Option<RigidBodyHandle>,
    paused: bool,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Y points down, so positive Y gravity pulls bodies toward the bottom of the screen.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
            handles: HashMap::new(),
            relations: Vec::new(),
            bounds: None,
            paused: false,
        }
    }

    /// Rapier handles for an entity's body.
    pub fn body(&self, id: EntityId) -> Option<&PhysicsBody> {
        self.handles.get(&id)
    }

    fn solid_groups(&self, group: BodyGroup, world_bounds: bool) -> InteractionGroups {
        let mut filter = if world_bounds { BOUNDS_BIT } else { 0 };
        for rel in &self.relations {
            match rel.kind {
                RelationKind::Collider => {
                    if rel.first == group {
                        filter |= solid_bit(rel.second);
                    }
                    if rel.second == group {
                        filter |= solid_bit(rel.first);
                    }
                }
                RelationKind::Overlap => {
                    if rel.first == group {
                        filter |= sensor_bit(rel.second);
                    }
                }
            }
        }
        interaction(solid_bit(group), filter)
    }

    fn sensor_groups(&self, group: BodyGroup) -> InteractionGroups {
        let filter = self
            .relations
            .iter()
            .filter(|rel| rel.kind == RelationKind::Overlap && rel.second == group)
            .fold(0, |acc, rel| acc | solid_bit(rel.first));
        interaction(sensor_bit(group), filter)
    }

    /// Re-derive every collider's interaction groups from the registered relations.
    fn refresh_groups(&mut self) {
        let updates: Vec<_> = self
            .handles
            .values()
            .map(|body| {
                (
                    body.solid,
                    self.solid_groups(body.group, body.world_bounds),
                    body.sensor,
                    self.sensor_groups(body.group),
                )
            })
            .collect();

        for (solid, solid_groups, sensor, sensor_groups) in updates {
            if let Some(collider) = self.colliders.get_mut(solid) {
                collider.set_collision_groups(solid_groups);
            }
            if let Some(collider) = self.colliders.get_mut(sensor) {
                collider.set_collision_groups(sensor_groups);
            }
        }
    }

    fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Resolve a collider to its entity, group and whether it is the overlap sensor.
    fn collider_info(&self, handle: ColliderHandle) -> Option<(EntityId, BodyGroup, bool)> {
        let collider = self.colliders.get(handle)?;
        let body = self.bodies.get(collider.parent()?)?;
        if body.user_data == NO_ENTITY {
            return None;
        }
        let id = EntityId(body.user_data as u32);
        let group = self.handles.get(&id)?.group;
        Some((id, group, collider.is_sensor()))
    }

    fn contact_for(
        &self,
        a: (EntityId, BodyGroup, bool),
        b: (EntityId, BodyGroup, bool),
    ) -> Option<Contact> {
        let kind = if a.2 || b.2 {
            RelationKind::Overlap
        } else {
            RelationKind::Collider
        };

        self.relations
            .iter()
            .enumerate()
            .find(|(_, rel)| rel.notify && rel.kind == kind && rel.matches(a.1, b.1))
            .map(|(index, rel)| {
                let (first, second) = bind_roles(rel, (a.0, a.1), (b.0, b.1));
                Contact {
                    relation: RelationId(index as u32),
                    first,
                    second,
                }
            })
    }

    fn is_bounds_collider(&self, handle: ColliderHandle) -> bool {
        self.colliders
            .get(handle)
            .and_then(|collider| collider.parent())
            .is_some_and(|parent| Some(parent) == self.bounds)
    }
}

impl ArcadeWorld for PhysicsWorld {
    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = vec2_to_na(gravity);
    }

    /// Surround `(0, 0)..size` with four fixed walls.
    fn set_bounds(&mut self, size: Vec2) {
        if let Some(old) = self.bounds.take() {
            self.remove_rigid_body(old);
        }

        let handle = self.bodies.insert(
            RigidBodyBuilder::fixed().user_data(NO_ENTITY).build(),
        );

        let half = WALL_THICKNESS / 2.0;
        let walls = [
            (Vec2::new(-half, size.y / 2.0), Vec2::new(half, size.y / 2.0 + WALL_THICKNESS)),
            (Vec2::new(size.x + half, size.y / 2.0), Vec2::new(half, size.y / 2.0 + WALL_THICKNESS)),
            (Vec2::new(size.x / 2.0, -half), Vec2::new(size.x / 2.0 + WALL_THICKNESS, half)),
            (Vec2::new(size.x / 2.0, size.y + half), Vec2::new(size.x / 2.0 + WALL_THICKNESS, half)),
        ];

        for (center, half_extents) in walls {
            let wall = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
                .translation(vec2_to_na(center))
                .restitution(0.0)
                .restitution_combine_rule(CoefficientCombineRule::Max)
                .friction(0.0)
                .friction_combine_rule(CoefficientCombineRule::Min)
                .collision_groups(interaction(BOUNDS_BIT, ALL_SOLID_BITS))
                .build();
            self.colliders.insert_with_parent(wall, handle, &mut self.bodies);
        }

        self.bounds = Some(handle);
    }

    /// Create a rigid body with a solid box and an overlap sensor.
    /// The EntityId is stored in the body's `user_data` for contact lookups.
    fn create_body(&mut self, id: EntityId, desc: &BodyDesc) {
        self.remove_body(id);

        let body_type = match desc.body_type {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Static => RigidBodyType::Fixed,
        };
        let rb = RigidBodyBuilder::new(body_type)
            .translation(vec2_to_na(desc.position))
            .linvel(vec2_to_na(desc.velocity))
            .gravity_scale(desc.gravity_scale)
            .locked_axes(LockedAxes::ROTATION_LOCKED)
            .can_sleep(false)
            .user_data(id.0 as u128)
            .build();
        let body_handle = self.bodies.insert(rb);

        let half = desc.size / 2.0;
        let solid = ColliderBuilder::cuboid(half.x, half.y)
            .restitution(desc.bounce)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .collision_groups(self.solid_groups(desc.group, desc.collide_world_bounds))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let solid = self
            .colliders
            .insert_with_parent(solid, body_handle, &mut self.bodies);

        let sensor = ColliderBuilder::cuboid(half.x, half.y)
            .sensor(true)
            .density(0.0)
            .collision_groups(self.sensor_groups(desc.group))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let sensor = self
            .colliders
            .insert_with_parent(sensor, body_handle, &mut self.bodies);

        self.handles.insert(
            id,
            PhysicsBody {
                body_handle,
                solid,
                sensor,
                group: desc.group,
                world_bounds: desc.collide_world_bounds,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) {
        if let Some(body) = self.handles.remove(&id) {
            self.remove_rigid_body(body.body_handle);
        }
    }

    fn add_relation(&mut self, relation: RelationDesc) -> RelationId {
        self.relations.push(relation);
        self.refresh_groups();
        RelationId(self.relations.len() as u32 - 1)
    }

    fn relation(&self, id: RelationId) -> Option<&RelationDesc> {
        self.relations.get(id.0 as usize)
    }

    fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        let Some(body) = self.handles.get(&id) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    fn velocity(&self, id: EntityId) -> Vec2 {
        self.handles
            .get(&id)
            .and_then(|body| self.bodies.get(body.body_handle))
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    fn position(&self, id: EntityId) -> Option<Vec2> {
        self.handles
            .get(&id)
            .and_then(|body| self.bodies.get(body.body_handle))
            .map(|rb| na_to_vec2(rb.translation()))
    }

    /// True when a solid contact pushes up on the body from below.
    /// World bounds do not count.
    fn touching_down(&self, id: EntityId) -> bool {
        let Some(body) = self.handles.get(&id) else {
            return false;
        };
        if !self.is_body_enabled(id) {
            return false;
        }

        self.narrow_phase
            .contact_pairs_with(body.solid)
            .filter(|pair| pair.has_any_active_contact)
            .any(|pair| {
                let (other, sign) = if pair.collider1 == body.solid {
                    (pair.collider2, 1.0)
                } else {
                    (pair.collider1, -1.0)
                };
                if self.is_bounds_collider(other) {
                    return false;
                }
                // Manifold normals point from collider1 toward collider2.
                pair.manifolds
                    .iter()
                    .any(|m| !m.points.is_empty() && m.data.normal.y * sign > 0.5)
            })
    }

    fn disable_body(&mut self, id: EntityId) {
        let Some(body) = self.handles.get(&id) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_enabled(false);
        }
    }

    fn enable_body(&mut self, id: EntityId, pos: Vec2) {
        let Some(body) = self.handles.get(&id) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
            rb.set_linvel(na::Vector2::zeros(), true);
            rb.set_enabled(true);
        }
    }

    fn is_body_enabled(&self, id: EntityId) -> bool {
        self.handles
            .get(&id)
            .and_then(|body| self.bodies.get(body.body_handle))
            .is_some_and(|rb| rb.is_enabled())
    }

    fn step(&mut self, dt: f32, contacts: &mut Vec<Contact>) {
        if self.paused {
            return;
        }

        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain_collisions() {
            let CollisionEvent::Started(h1, h2, _) = event else {
                continue;
            };
            let (Some(a), Some(b)) = (self.collider_info(h1), self.collider_info(h2)) else {
                continue;
            };
            if let Some(contact) = self.contact_for(a, b) {
                contacts.push(contact);
            }
        }
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
        self.handles.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const HERO: BodyGroup = BodyGroup::new(0);
    const LEDGE: BodyGroup = BodyGroup::new(1);
    const COIN: BodyGroup = BodyGroup::new(2);

    fn run(world: &mut PhysicsWorld, steps: usize) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for _ in 0..steps {
            world.step(DT, &mut contacts);
        }
        contacts
    }

    fn floating(group: BodyGroup, pos: Vec2, vel: Vec2) -> BodyDesc {
        BodyDesc::dynamic(group, Vec2::splat(10.0))
            .with_position(pos)
            .with_velocity(vel)
            .with_gravity_scale(0.0)
    }

    #[test]
    fn create_and_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.create_body(EntityId(1), &BodyDesc::dynamic(HERO, Vec2::splat(10.0)));
        assert_eq!(world.body_count(), 1);
        world.remove_body(EntityId(1));
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.position(EntityId(1)), None);
    }

    #[test]
    fn gravity_affects_dynamic_body() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 300.0));
        world.create_body(EntityId(1), &BodyDesc::dynamic(HERO, Vec2::splat(10.0)));

        run(&mut world, 10);

        let pos = world.position(EntityId(1)).unwrap();
        assert!(pos.y > 0.0, "Body should fall: y={}", pos.y);
    }

    #[test]
    fn static_body_does_not_move() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 300.0));
        world.create_body(
            EntityId(1),
            &BodyDesc::fixed(LEDGE, Vec2::new(200.0, 20.0)).with_position(Vec2::new(0.0, 500.0)),
        );

        run(&mut world, 10);

        let pos = world.position(EntityId(1)).unwrap();
        assert!((pos.y - 500.0).abs() < 0.001, "Static body moved: y={}", pos.y);
    }

    #[test]
    fn resting_body_touches_down() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 300.0));
        world.create_body(
            EntityId(1),
            &BodyDesc::fixed(LEDGE, Vec2::new(200.0, 20.0)).with_position(Vec2::new(100.0, 500.0)),
        );
        world.create_body(
            EntityId(2),
            &BodyDesc::dynamic(HERO, Vec2::new(20.0, 20.0)).with_position(Vec2::new(100.0, 460.0)),
        );
        world.add_relation(RelationDesc::collider(HERO, LEDGE));

        assert!(!world.touching_down(EntityId(2)));
        run(&mut world, 120);

        let pos = world.position(EntityId(2)).unwrap();
        assert!((pos.y - 480.0).abs() < 1.0, "Should rest on the ledge: y={}", pos.y);
        assert!(world.touching_down(EntityId(2)));
    }

    #[test]
    fn unrelated_groups_pass_through() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.create_body(EntityId(1), &floating(HERO, Vec2::ZERO, Vec2::new(120.0, 0.0)));
        world.create_body(EntityId(2), &floating(COIN, Vec2::new(30.0, 0.0), Vec2::ZERO));

        let contacts = run(&mut world, 60);

        assert!(contacts.is_empty());
        assert!(world.position(EntityId(1)).unwrap().x > 60.0);
    }

    #[test]
    fn overlap_reports_without_separating() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.create_body(EntityId(1), &floating(HERO, Vec2::ZERO, Vec2::new(120.0, 0.0)));
        world.create_body(EntityId(2), &floating(COIN, Vec2::new(30.0, 0.0), Vec2::ZERO));
        let rel = world.add_relation(RelationDesc::overlap(HERO, COIN).notifying());

        let contacts = run(&mut world, 60);

        assert_eq!(
            contacts,
            vec![Contact { relation: rel, first: EntityId(1), second: EntityId(2) }]
        );
        assert!(world.position(EntityId(1)).unwrap().x > 60.0, "Overlap must not block");
        assert!((world.position(EntityId(2)).unwrap().x - 30.0).abs() < 0.001);
    }

    #[test]
    fn collider_relation_separates_and_reports() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.create_body(EntityId(1), &floating(HERO, Vec2::ZERO, Vec2::new(120.0, 0.0)));
        world.create_body(EntityId(2), &floating(COIN, Vec2::new(30.0, 0.0), Vec2::ZERO));
        let rel = world.add_relation(RelationDesc::collider(COIN, HERO).notifying());

        let contacts = run(&mut world, 60);

        let started: Vec<_> = contacts.iter().filter(|c| c.relation == rel).collect();
        assert!(!started.is_empty(), "Should report the collision");
        assert_eq!(started[0].first, EntityId(2));
        assert_eq!(started[0].second, EntityId(1));
        let a = world.position(EntityId(1)).unwrap().x;
        let b = world.position(EntityId(2)).unwrap().x;
        assert!(a < b, "Bodies should not pass through: a={}, b={}", a, b);
    }

    #[test]
    fn silent_relation_reports_nothing() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.create_body(EntityId(1), &floating(HERO, Vec2::ZERO, Vec2::new(120.0, 0.0)));
        world.create_body(EntityId(2), &floating(COIN, Vec2::new(30.0, 0.0), Vec2::ZERO));
        world.add_relation(RelationDesc::collider(HERO, COIN));

        assert!(run(&mut world, 60).is_empty());
    }

    #[test]
    fn disabled_body_is_out_of_the_simulation() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 300.0));
        world.create_body(EntityId(1), &floating(HERO, Vec2::ZERO, Vec2::new(120.0, 0.0)));
        world.create_body(
            EntityId(2),
            &BodyDesc::dynamic(COIN, Vec2::splat(10.0)).with_position(Vec2::new(30.0, 0.0)),
        );
        world.add_relation(RelationDesc::overlap(HERO, COIN).notifying());
        world.disable_body(EntityId(2));

        let contacts = run(&mut world, 60);

        assert!(contacts.is_empty());
        assert!(!world.is_body_enabled(EntityId(2)));
        assert_eq!(world.position(EntityId(2)), Some(Vec2::new(30.0, 0.0)));

        world.enable_body(EntityId(2), Vec2::new(500.0, 0.0));
        assert!(world.is_body_enabled(EntityId(2)));
        assert_eq!(world.velocity(EntityId(2)), Vec2::ZERO);
        run(&mut world, 10);
        assert!(world.position(EntityId(2)).unwrap().y > 0.0, "Re-enabled body falls again");
    }

    #[test]
    fn pause_freezes_everything() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 300.0));
        world.create_body(EntityId(1), &BodyDesc::dynamic(HERO, Vec2::splat(10.0)));
        run(&mut world, 5);
        let before = world.position(EntityId(1)).unwrap();

        world.pause();
        run(&mut world, 30);
        assert_eq!(world.position(EntityId(1)).unwrap(), before);

        world.resume();
        run(&mut world, 5);
        assert!(world.position(EntityId(1)).unwrap().y > before.y);
    }

    #[test]
    fn world_bounds_contain_flagged_bodies() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_bounds(Vec2::new(100.0, 100.0));
        world.create_body(
            EntityId(1),
            &floating(HERO, Vec2::new(50.0, 50.0), Vec2::new(-300.0, 0.0)).with_world_bounds(true),
        );
        world.create_body(
            EntityId(2),
            &floating(COIN, Vec2::new(50.0, 20.0), Vec2::new(-300.0, 0.0)),
        );

        run(&mut world, 60);

        assert!(world.position(EntityId(1)).unwrap().x > 0.0);
        assert!(world.position(EntityId(2)).unwrap().x < -100.0, "Unflagged body leaves the world");
    }

    #[test]
    fn elastic_bounce_off_bounds() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_bounds(Vec2::new(100.0, 100.0));
        world.create_body(
            EntityId(1),
            &floating(HERO, Vec2::new(50.0, 50.0), Vec2::new(-200.0, 0.0))
                .with_bounce(1.0)
                .with_world_bounds(true),
        );

        run(&mut world, 30);

        let vel = world.velocity(EntityId(1));
        assert!(vel.x > 150.0, "Should rebound at nearly full speed: {:?}", vel);
    }
}
