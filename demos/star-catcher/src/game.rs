use arcade_engine::*;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, StarCatcherConfig};
use crate::session::Session;

const PLAYER: BodyGroup = BodyGroup::new(0);
const PLATFORM: BodyGroup = BodyGroup::new(1);
const STAR: BodyGroup = BodyGroup::new(2);
const BOMB: BodyGroup = BodyGroup::new(3);

/// Ground plus three ledges: (center, size).
const PLATFORMS: [([f32; 2], [f32; 2]); 4] = [
    ([400.0, 568.0], [800.0, 64.0]),
    ([600.0, 400.0], [400.0, 32.0]),
    ([50.0, 250.0], [400.0, 32.0]),
    ([750.0, 220.0], [400.0, 32.0]),
];

/// Dude sheet layout when the manifest does not provide one.
const DEFAULT_SHEET_COLUMNS: u32 = 9;

const LABEL_POS: Vec2 = Vec2::new(16.0, 16.0);
const LABEL_SIZE: f32 = 32.0;

/// Game event kinds to the host page
pub const EVENT_SCORE: f32 = 1.0;
pub const EVENT_GAME_OVER: f32 = 2.0;

#[derive(Debug, Clone, Copy)]
struct Star {
    id: EntityId,
    home_x: f32,
    bounce: f32,
}

/// Relations whose contacts the game reacts to.
#[derive(Debug, Clone, Copy)]
struct Callbacks {
    pickup: RelationId,
    failure: RelationId,
}

pub struct StarCatcher {
    config: StarCatcherConfig,
    session: Session,
    rng: SmallRng,
    player: Option<EntityId>,
    score_label: Option<EntityId>,
    stars: Vec<Star>,
    bombs: Vec<EntityId>,
    callbacks: Option<Callbacks>,
}

impl StarCatcher {
    pub fn new() -> Self {
        Self::with_config(StarCatcherConfig::default())
    }

    pub fn with_config(config: StarCatcherConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            config,
            session: Session::new(),
            rng,
            player: None,
            score_label: None,
            stars: Vec::new(),
            bombs: Vec::new(),
            callbacks: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn bombs(&self) -> &[EntityId] {
        &self.bombs
    }

    /// Replace the tunables. Only allowed before `init` has built the level.
    pub fn set_config(&mut self, config: StarCatcherConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if self.player.is_some() {
            return Err(ConfigError::AlreadyStarted);
        }
        *self = Self::with_config(config);
        Ok(())
    }

    /// Sprite for `key`, or the default sprite when the key is not registered.
    fn sprite<W: ArcadeWorld>(ctx: &EngineContext<W>, key: &str) -> SpriteComponent {
        ctx.assets.sprite(key).unwrap_or_else(|err| {
            log::warn!("{err}; drawing `{key}` with the default sprite");
            SpriteComponent::default()
        })
    }

    fn build_platforms<W: ArcadeWorld>(ctx: &mut EngineContext<W>) {
        let sprite = Self::sprite(ctx, "ground");
        for (pos, size) in PLATFORMS {
            let (pos, size) = (Vec2::from(pos), Vec2::from(size));
            let id = ctx.next_id();
            let entity = Entity::new(id)
                .with_tag("platform")
                .with_scale(size)
                .with_sprite(sprite.clone());
            ctx.spawn_with_body(entity, BodyDesc::fixed(PLATFORM, size).with_position(pos));
        }
    }

    fn player_animations<W: ArcadeWorld>(ctx: &EngineContext<W>) -> AnimationComponent {
        let columns = match ctx.assets.sheet("dude") {
            Ok(sheet) => sheet.columns,
            Err(err) => {
                log::warn!("{err}; assuming a {DEFAULT_SHEET_COLUMNS}-frame strip");
                DEFAULT_SHEET_COLUMNS
            }
        };

        let mut anim = AnimationComponent::new();
        anim.add("left", AnimationDef::sheet_range(columns, 0, 3, 10.0).with_repeat(Repeat::Forever));
        anim.add("turn", AnimationDef::sheet_range(columns, 4, 4, 20.0));
        anim.add("right", AnimationDef::sheet_range(columns, 5, 8, 10.0).with_repeat(Repeat::Forever));
        anim
    }

    fn spawn_player<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>) {
        let size = self.config.player_size();
        let id = ctx.next_id();
        let entity = Entity::new(id)
            .with_tag("player")
            .with_scale(size)
            .with_sprite(Self::sprite(ctx, "dude"))
            .with_animation(Self::player_animations(ctx));
        let desc = BodyDesc::dynamic(PLAYER, size)
            .with_position(self.config.player_start())
            .with_bounce(self.config.player_bounce)
            .with_world_bounds(true);
        self.player = Some(ctx.spawn_with_body(entity, desc));
    }

    fn spawn_stars<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>) {
        let size = self.config.star_size();
        let sprite = Self::sprite(ctx, "star");
        for i in 0..self.config.star_count {
            let home_x = self.config.star_x(i);
            let bounce = self
                .rng
                .gen_range(self.config.star_bounce_min..=self.config.star_bounce_max);
            let id = ctx.next_id();
            let entity = Entity::new(id)
                .with_tag("star")
                .with_scale(size)
                .with_sprite(sprite.clone());
            let desc = BodyDesc::dynamic(STAR, size)
                .with_position(Vec2::new(home_x, 0.0))
                .with_bounce(bounce);
            ctx.spawn_with_body(entity, desc);
            self.stars.push(Star { id, home_x, bounce });
        }
    }

    fn collect_star<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>, star: EntityId) {
        if !ctx.scene.get(star).is_some_and(|e| e.active && e.tag == "star") {
            return;
        }
        ctx.disable_body(star, true);

        let score = self.session.add_score(self.config.score_per_star);
        if let Some(label) = self.score_label {
            ctx.set_text(label, self.session.score_text());
        }
        ctx.emit_event(GameEvent::with_value(EVENT_SCORE, score as f32));

        if ctx.count_active("star") == 0 {
            self.reset_wave(ctx);
            self.spawn_bomb(ctx);
        }
    }

    fn reset_wave<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>) {
        for star in &self.stars {
            ctx.enable_body(star.id, Vec2::new(star.home_x, 0.0), true);
        }
        log::info!("star-catcher: wave cleared at score {}", self.session.score());
    }

    /// Drop a bomb over the half of the world the player is not in.
    fn spawn_bomb<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>) {
        let half = (self.config.world_width / 2.0) as i32;
        let player_x = self
            .player
            .and_then(|id| ctx.scene.get(id))
            .map_or(0.0, |e| e.pos.x);
        let x = if player_x < half as f32 {
            self.rng.gen_range(half..=half * 2)
        } else {
            self.rng.gen_range(0..=half)
        };
        let max_speed = self.config.bomb_max_speed;
        let vx = self.rng.gen_range(-max_speed..=max_speed);

        let size = self.config.bomb_size();
        let id = ctx.next_id();
        let entity = Entity::new(id)
            .with_tag("bomb")
            .with_scale(size)
            .with_sprite(Self::sprite(ctx, "bomb"));
        let desc = BodyDesc::dynamic(BOMB, size)
            .with_position(Vec2::new(x as f32, self.config.bomb_y))
            .with_velocity(Vec2::new(vx as f32, self.config.bomb_fall_speed))
            .with_bounce(self.config.bomb_bounce)
            .with_world_bounds(true);
        self.bombs.push(ctx.spawn_with_body(entity, desc));
    }

    fn hit_bomb<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>, player: EntityId) {
        ctx.physics.pause();
        ctx.set_tint(player, Tint(self.config.failure_tint));
        ctx.play_animation(player, "turn", false);
        if self.session.end() {
            ctx.emit_event(GameEvent::with_value(EVENT_GAME_OVER, self.session.score() as f32));
            log::info!("star-catcher: game over with score {}", self.session.score());
        }
    }
}

impl Default for StarCatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for StarCatcher {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: self.config.world_width,
            world_height: self.config.world_height,
            gravity: Vec2::new(0.0, self.config.gravity),
            ..Default::default()
        }
    }

    fn init<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>) {
        let id = ctx.next_id();
        let world = Vec2::new(self.config.world_width, self.config.world_height);
        ctx.spawn(
            Entity::new(id)
                .with_tag("sky")
                .with_pos(world / 2.0)
                .with_scale(world)
                .with_sprite(Self::sprite(ctx, "sky")),
        );

        Self::build_platforms(ctx);
        self.spawn_player(ctx);
        self.spawn_stars(ctx);

        let id = ctx.next_id();
        let label = TextLabel::new("score: 0", LABEL_SIZE, 0x000000);
        self.score_label = Some(ctx.spawn(
            Entity::new(id).with_tag("score").with_pos(LABEL_POS).with_label(label),
        ));

        ctx.physics.add_relation(RelationDesc::collider(PLAYER, PLATFORM));
        ctx.physics.add_relation(RelationDesc::collider(STAR, PLATFORM));
        ctx.physics.add_relation(RelationDesc::collider(BOMB, PLATFORM));
        self.callbacks = Some(Callbacks {
            pickup: ctx.physics.add_relation(RelationDesc::overlap(PLAYER, STAR).notifying()),
            failure: ctx.physics.add_relation(RelationDesc::collider(PLAYER, BOMB).notifying()),
        });

        log::info!("star-catcher: session started with {} stars", self.stars.len());
    }

    fn update<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>, input: &InputQueue) {
        if self.session.is_over() {
            return;
        }
        let Some(player) = self.player else {
            return;
        };

        let keys = input.cursor_keys();
        if keys.left {
            ctx.set_velocity_x(player, -self.config.run_speed);
            ctx.play_animation(player, "left", true);
        } else if keys.right {
            ctx.set_velocity_x(player, self.config.run_speed);
            ctx.play_animation(player, "right", true);
        } else {
            ctx.set_velocity_x(player, 0.0);
            ctx.play_animation(player, "turn", false);
        }

        if keys.up && ctx.touching_down(player) {
            ctx.set_velocity_y(player, -self.config.jump_speed);
        }
    }

    fn on_contact<W: ArcadeWorld>(&mut self, ctx: &mut EngineContext<W>, contact: &Contact) {
        if self.session.is_over() {
            return;
        }
        let Some(callbacks) = self.callbacks else {
            return;
        };

        if contact.relation == callbacks.pickup {
            self.collect_star(ctx, contact.second);
        } else if contact.relation == callbacks.failure {
            self.hit_bomb(ctx, contact.first);
        }
    }
}
