use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::animation::AnimationComponent;
use crate::components::label::TextLabel;
use crate::components::sprite::SpriteComponent;

/// Fat Entity: one struct with optional components.
/// Physics bodies live in the `ArcadeWorld`, keyed by the same `EntityId`.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// Group name (e.g. "star"). Entities sharing a tag are counted together.
    pub tag: String,
    /// Inactive entities are neither drawn nor counted as active group members.
    pub active: bool,
    /// Center in world space (top-left anchor for text labels).
    pub pos: Vec2,
    /// Rendered size in world units.
    pub scale: Vec2,
    pub sprite: Option<SpriteComponent>,
    pub animation: Option<AnimationComponent>,
    pub label: Option<TextLabel>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            scale: Vec2::ONE,
            sprite: None,
            animation: None,
            label: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_animation(mut self, animation: AnimationComponent) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_label(mut self, label: TextLabel) -> Self {
        self.label = Some(label);
        self
    }
}
