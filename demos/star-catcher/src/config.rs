use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config")]
    Parse(#[from] serde_json::Error),

    #[error("world size must be positive, got {width}x{height}")]
    WorldSize { width: f32, height: f32 },

    #[error("star bounce range {min}..={max} is empty or not finite")]
    StarBounce { min: f32, max: f32 },

    #[error("bomb_max_speed must not be negative, got {0}")]
    BombSpeed(i32),

    #[error("star_count must be at least 1")]
    NoStars,

    #[error("config cannot change once the game has started")]
    AlreadyStarted,
}

/// Every tunable of a Star Catcher session. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarCatcherConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Downward acceleration in units/s².
    pub gravity: f32,

    pub player_start: [f32; 2],
    pub player_size: [f32; 2],
    pub player_bounce: f32,
    pub run_speed: f32,
    /// Upward speed applied when jumping from the ground.
    pub jump_speed: f32,

    pub score_per_star: u32,
    pub star_count: usize,
    pub star_start_x: f32,
    pub star_spacing: f32,
    pub star_size: [f32; 2],
    pub star_bounce_min: f32,
    pub star_bounce_max: f32,

    pub bomb_y: f32,
    pub bomb_size: [f32; 2],
    /// Horizontal launch speed is drawn from `-bomb_max_speed..=bomb_max_speed`.
    pub bomb_max_speed: i32,
    pub bomb_fall_speed: f32,
    pub bomb_bounce: f32,

    /// Packed `0xRRGGBB` applied to the player on game over.
    pub failure_tint: u32,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for StarCatcherConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            gravity: 300.0,
            player_start: [100.0, 450.0],
            player_size: [32.0, 48.0],
            player_bounce: 0.2,
            run_speed: 160.0,
            jump_speed: 330.0,
            score_per_star: 10,
            star_count: 12,
            star_start_x: 12.0,
            star_spacing: 70.0,
            star_size: [24.0, 22.0],
            star_bounce_min: 0.4,
            star_bounce_max: 0.8,
            bomb_y: 16.0,
            bomb_size: [14.0, 14.0],
            bomb_max_speed: 200,
            bomb_fall_speed: 20.0,
            bomb_bounce: 1.0,
            failure_tint: 0xff0000,
            seed: None,
        }
    }
}

impl StarCatcherConfig {
    /// Parse and validate. Rejected configs never reach the game.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the level build and hazard spawn sample from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0)
            || !self.world_width.is_finite()
            || !self.world_height.is_finite()
        {
            return Err(ConfigError::WorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        let (min, max) = (self.star_bounce_min, self.star_bounce_max);
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(ConfigError::StarBounce { min, max });
        }
        if self.bomb_max_speed < 0 {
            return Err(ConfigError::BombSpeed(self.bomb_max_speed));
        }
        if self.star_count == 0 {
            return Err(ConfigError::NoStars);
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Home x of star `index`; every wave restarts from here.
    pub fn star_x(&self, index: usize) -> f32 {
        self.star_start_x + self.star_spacing * index as f32
    }

    pub fn player_start(&self) -> Vec2 {
        Vec2::from(self.player_start)
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::from(self.player_size)
    }

    pub fn star_size(&self) -> Vec2 {
        Vec2::from(self.star_size)
    }

    pub fn bomb_size(&self) -> Vec2 {
        Vec2::from(self.bomb_size)
    }
}
