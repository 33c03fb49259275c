//! Ticks animations and copies the current frame onto sprites.

use crate::core::scene::Scene;

/// Tick every active entity's animation and copy its current frame onto the sprite.
pub fn tick_animations(scene: &mut Scene, dt: f32) {
    for entity in scene.iter_mut().filter(|e| e.active) {
        let Some(anim) = entity.animation.as_mut() else {
            continue;
        };
        anim.tick(dt);

        if let (Some((col, row)), Some(sprite)) = (anim.current_frame(), entity.sprite.as_mut()) {
            sprite.col = col;
            sprite.row = row;
        }
    }
}
