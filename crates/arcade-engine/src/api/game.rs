use glam::Vec2;

use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::AssetRegistry;
use crate::components::entity::Entity;
use crate::components::sprite::Tint;
use crate::core::arcade::{ArcadeWorld, BodyDesc, Contact};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::systems::animation::tick_animations;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Gravity vector. Y points down, so positive Y pulls bodies toward the floor.
    pub gravity: Vec2,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum fixed steps a single browser frame may run (default: 10).
    pub max_steps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            gravity: Vec2::ZERO,
            max_instances: 512,
            max_events: 32,
            max_steps: 10,
        }
    }
}

impl GameConfig {
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}

/// The core contract every game must fulfill.
///
/// Methods are generic over the physics backend so the same game runs on the
/// Rapier world in the browser and on a scripted world in tests.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, register physics relations.
    fn init<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>);

    /// The game loop tick. Read input, set velocities, switch animations.
    fn update<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>, input: &InputQueue);

    /// Called once per contact reported by the physics step that just ran.
    fn on_contact<W: ArcadeWorld>(&mut self, _ctx: &mut EngineContext<W>, _contact: &Contact) {}
}

/// Mutable access to engine state, passed to every `Game` callback.
pub struct EngineContext<W: ArcadeWorld> {
    pub scene: Scene,
    pub physics: W,
    pub assets: AssetRegistry,
    pub events: Vec<GameEvent>,
    next_id: u32,
    contacts: Vec<Contact>,
}

impl<W: ArcadeWorld> EngineContext<W> {
    pub fn new(physics: W) -> Self {
        Self {
            scene: Scene::new(),
            physics,
            assets: AssetRegistry::new(),
            events: Vec::new(),
            next_id: 1,
            contacts: Vec::new(),
        }
    }

    /// Apply the world-level settings of a config: gravity and bounds.
    pub fn configure(&mut self, config: &GameConfig) {
        self.physics.set_gravity(config.gravity);
        self.physics.set_bounds(config.world_size());
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (events, undelivered contacts).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.contacts.clear();
    }

    /// Spawn an entity with no physics body.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position is set from the BodyDesc.
    pub fn spawn_with_body(&mut self, entity: Entity, desc: BodyDesc) -> EntityId {
        let id = entity.id;
        self.physics.create_body(id, &desc);
        self.scene.spawn(entity.with_pos(desc.position));
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) {
        if self.scene.despawn(id).is_some() {
            self.physics.remove_body(id);
        }
    }

    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        self.physics.set_velocity(id, vel);
    }

    pub fn set_velocity_x(&mut self, id: EntityId, vx: f32) {
        self.physics.set_velocity_x(id, vx);
    }

    pub fn set_velocity_y(&mut self, id: EntityId, vy: f32) {
        self.physics.set_velocity_y(id, vy);
    }

    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.physics.velocity(id)
    }

    pub fn touching_down(&self, id: EntityId) -> bool {
        self.physics.touching_down(id)
    }

    /// Take an entity's body out of the simulation, optionally hiding the entity too.
    /// Hidden entities no longer count as active members of their group.
    pub fn disable_body(&mut self, id: EntityId, hide: bool) {
        self.physics.disable_body(id);
        if hide {
            if let Some(entity) = self.scene.get_mut(id) {
                entity.active = false;
            }
        }
    }

    /// Put a disabled body back at `pos`, optionally showing the entity again.
    pub fn enable_body(&mut self, id: EntityId, pos: Vec2, show: bool) {
        self.physics.enable_body(id, pos);
        if let Some(entity) = self.scene.get_mut(id) {
            entity.pos = pos;
            if show {
                entity.active = true;
            }
        }
    }

    /// Number of active entities carrying `tag`.
    pub fn count_active(&self, tag: &str) -> usize {
        self.scene.count_active(tag)
    }

    /// Start a named animation. With `ignore_if_playing`, a running animation
    /// of the same name keeps its current frame.
    pub fn play_animation(&mut self, id: EntityId, name: &str, ignore_if_playing: bool) {
        let Some(anim) = self.scene.get_mut(id).and_then(|e| e.animation.as_mut()) else {
            return;
        };
        if ignore_if_playing {
            anim.play_if_different(name);
        } else {
            anim.play(name);
        }
    }

    pub fn set_tint(&mut self, id: EntityId, tint: Tint) {
        if let Some(sprite) = self.scene.get_mut(id).and_then(|e| e.sprite.as_mut()) {
            sprite.tint = tint;
        }
    }

    pub fn set_text(&mut self, id: EntityId, text: impl Into<String>) {
        if let Some(label) = self.scene.get_mut(id).and_then(|e| e.label.as_mut()) {
            label.set_text(text);
        }
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called automatically by [`run_frame`] after `Game::update()`.
    pub fn step_physics(&mut self, dt: f32) {
        self.physics.step(dt, &mut self.contacts);

        for entity in self.scene.iter_mut() {
            if let Some(pos) = self.physics.position(entity.id) {
                entity.pos = pos;
            }
        }
    }

    /// Contacts reported since the last call, in report order.
    pub fn take_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.contacts)
    }
}

/// Run one fixed step: update, physics, contact dispatch, animation.
///
/// Dispatch stops once the world is paused, and contacts naming a body that
/// an earlier callback disabled are skipped.
pub fn run_frame<G: Game, W: ArcadeWorld>(
    game: &mut G,
    ctx: &mut EngineContext<W>,
    input: &InputQueue,
    dt: f32,
) {
    game.update(ctx, input);
    ctx.step_physics(dt);

    for contact in ctx.take_contacts() {
        if ctx.physics.is_paused() {
            break;
        }
        if !ctx.physics.is_body_enabled(contact.first) || !ctx.physics.is_body_enabled(contact.second) {
            continue;
        }
        game.on_contact(ctx, &contact);
    }

    tick_animations(&mut ctx.scene, dt);
}
