use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::systems::text::{layout_label, FontConfig};

/// Rebuild the render buffer from the scene: sprites in scene order, then labels on top.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity> + Clone,
    font: &FontConfig,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    for entity in entities.clone().filter(|e| e.active) {
        let Some(sprite) = &entity.sprite else {
            continue;
        };
        let [tint_r, tint_g, tint_b] = sprite.tint.rgb();
        buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            width: entity.scale.x,
            height: entity.scale.y,
            atlas: sprite.atlas.0 as f32,
            col: sprite.col,
            row: sprite.row,
            alpha: sprite.alpha,
            tint_r,
            tint_g,
            tint_b,
            _pad: 0.0,
        });
    }

    for entity in entities.filter(|e| e.active) {
        if let Some(label) = &entity.label {
            for glyph in layout_label(label, entity.pos, font) {
                buffer.push(glyph);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::label::TextLabel;
    use crate::components::sprite::{AtlasId, SpriteComponent, Tint};
    use glam::Vec2;

    #[test]
    fn sprites_then_labels() {
        let entities = vec![
            Entity::new(EntityId(1)).with_label(TextLabel::new("ok", 32.0, 0)),
            Entity::new(EntityId(2))
                .with_pos(Vec2::new(10.0, 20.0))
                .with_scale(Vec2::new(32.0, 48.0))
                .with_sprite(SpriteComponent {
                    atlas: AtlasId(2),
                    tint: Tint(0xff0000),
                    ..Default::default()
                }),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &FontConfig::default(), &mut buffer);

        assert_eq!(buffer.instance_count(), 3);
        let sprite = buffer.instances[0];
        assert_eq!((sprite.width, sprite.height), (32.0, 48.0));
        assert_eq!(sprite.atlas, 2.0);
        assert_eq!((sprite.tint_r, sprite.tint_g), (1.0, 0.0));
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut entity = Entity::new(EntityId(1)).with_sprite(SpriteComponent::default());
        entity.active = false;

        let entities = vec![entity];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &FontConfig::default(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }
}
