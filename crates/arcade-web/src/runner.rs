use arcade_engine::{
    build_render_buffer, run_frame, ArcadeWorld, AssetError, AssetRegistry, EngineContext,
    FixedTimestep, FontConfig, Game, GameConfig, GameEvent, InputEvent, InputQueue, PhysicsWorld,
    RenderBuffer,
};
use glam::Vec2;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game, W: ArcadeWorld = PhysicsWorld> {
    game: G,
    ctx: EngineContext<W>,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    font: FontConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let gravity = game.config().gravity;
        Self::with_world(game, PhysicsWorld::new(gravity))
    }
}

impl<G: Game, W: ArcadeWorld> GameRunner<G, W> {
    pub fn with_world(game: G, physics: W) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::new(physics),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            config,
            font: FontConfig::default(),
            initialized: false,
        }
    }

    /// Initialize the game. Runs at most once; `tick` calls it if the host did not.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.config = self.game.config();
        self.ctx.configure(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Register the game's assets. Load before the first tick so `init` can see them.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), AssetError> {
        let registry = AssetRegistry::from_json(json)?;
        log::info!("loaded {} assets", registry.len());
        // A "font" image, if present, backs the text labels.
        if let Ok(font) = registry.sprite("font") {
            self.font.atlas = font.atlas;
        }
        self.ctx.assets = registry;
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one browser frame: as many fixed steps as `dt` covers, then rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        self.init();

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        let fixed_dt = self.timestep.dt();
        for _ in 0..steps {
            run_frame(&mut self.game, &mut self.ctx, &self.input, fixed_dt);
        }

        // Drain input after update; held keys persist
        self.input.drain();
        self.ctx.events.truncate(self.config.max_events);

        build_render_buffer(self.ctx.scene.iter(), &self.font, &mut self.render_buffer);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable game access for game-specific exports. Changes that affect `config()`
    /// take effect only if made before the first tick.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext<W> {
        &self.ctx
    }

    /// Text of the label on the first entity tagged `tag`.
    pub fn label_text(&self, tag: &str) -> Option<&str> {
        self.ctx
            .scene
            .find_by_tag(tag)
            .and_then(|e| e.label.as_ref())
            .map(|label| label.text.as_str())
    }

    // ---- Pointer accessors for the host's buffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<GameEvent, f32>(&self.ctx.events).as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_size(&self) -> Vec2 {
        self.config.world_size()
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::{
        keys, AtlasId, BodyDesc, BodyGroup, Entity, EntityId, ScriptedWorld, TextLabel,
    };

    const BALL: BodyGroup = BodyGroup::new(0);

    /// Ball that moves right while the right arrow is held.
    #[derive(Default)]
    struct Roller {
        ball: Option<EntityId>,
        wide: bool,
        inits: u32,
        updates: u32,
    }

    impl Game for Roller {
        fn config(&self) -> GameConfig {
            GameConfig {
                world_width: if self.wide { 640.0 } else { 320.0 },
                world_height: 240.0,
                ..Default::default()
            }
        }

        fn init<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>) {
            self.inits += 1;
            let sprite = ctx.assets.sprite("ball").unwrap_or_default();
            let id = ctx.next_id();
            let ball = Entity::new(id).with_tag("ball").with_sprite(sprite);
            self.ball = Some(ctx.spawn_with_body(
                ball,
                BodyDesc::dynamic(BALL, Vec2::splat(8.0)).with_position(Vec2::new(20.0, 20.0)),
            ));
            let id = ctx.next_id();
            ctx.spawn(Entity::new(id).with_tag("hud").with_label(TextLabel::new("hi", 16.0, 0)));
        }

        fn update<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>, input: &InputQueue) {
            self.updates += 1;
            if let Some(ball) = self.ball {
                let vx = if input.cursor_keys().right { 60.0 } else { 0.0 };
                ctx.set_velocity_x(ball, vx);
            }
        }
    }

    fn runner() -> GameRunner<Roller, ScriptedWorld> {
        GameRunner::with_world(Roller::default(), ScriptedWorld::new())
    }

    #[test]
    fn tick_initializes_once_and_runs_fixed_steps() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        r.tick(2.0 / 60.0 + 0.001);

        assert_eq!(r.game().inits, 1);
        assert_eq!(r.game().updates, 3);
        assert_eq!(r.world_size(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn held_key_survives_frames() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: keys::RIGHT });
        for _ in 0..10 {
            r.tick(1.0 / 60.0);
        }
        let ball = r.game().ball.unwrap();
        assert!(r.context().scene.get(ball).unwrap().pos.x > 20.0);
    }

    #[test]
    fn manifest_feeds_init_sprites() {
        let mut r = runner();
        r.load_manifest(r#"{ "images": [ { "key": "bg", "path": "bg.png" }, { "key": "ball", "path": "ball.png" } ] }"#)
            .unwrap();
        r.tick(1.0 / 60.0);

        let ball = r.game().ball.unwrap();
        let sprite = r.context().scene.get(ball).unwrap().sprite.clone().unwrap();
        assert_eq!(sprite.atlas, AtlasId(1));
    }

    #[test]
    fn bad_manifest_keeps_previous_registry() {
        let mut r = runner();
        assert!(r.load_manifest("not json").is_err());
        assert!(r.context().assets.is_empty());
    }

    #[test]
    fn render_buffer_holds_sprites_and_glyphs() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        // one ball sprite plus two glyphs
        assert_eq!(r.instance_count(), 3);
        assert_eq!(r.label_text("hud"), Some("hi"));
        assert_eq!(r.label_text("ball"), None);
    }

    #[test]
    fn game_changes_before_first_tick_reach_init() {
        let mut r = runner();
        r.game_mut().wide = true;
        r.tick(1.0 / 60.0);
        assert_eq!(r.world_size(), Vec2::new(640.0, 240.0));
    }
}
