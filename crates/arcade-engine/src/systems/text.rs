//! Bitmap font text layout.
//!
//! Labels are drawn with a font atlas whose glyphs are laid out in ASCII
//! order, typically 16 columns × 6 rows for printable ASCII (32-127).

use glam::Vec2;

use crate::components::label::TextLabel;
use crate::components::sprite::{AtlasId, Tint};
use crate::renderer::instance::RenderInstance;

/// Configuration for a bitmap font atlas.
#[derive(Debug, Clone)]
pub struct FontConfig {
    /// Which atlas contains the font glyphs.
    pub atlas: AtlasId,
    pub cols: u32,
    pub rows: u32,
    /// First ASCII code in the atlas (typically 32 = space).
    pub start_char: u8,
    /// Horizontal advance as a fraction of glyph height.
    pub spacing: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            cols: 16,
            rows: 6,
            start_char: 32,
            spacing: 0.55,
        }
    }
}

impl FontConfig {
    pub fn new(atlas: AtlasId) -> Self {
        Self {
            atlas,
            ..Default::default()
        }
    }
}

/// Convert a character to grid coordinates (col, row) in the font atlas.
///
/// Returns `None` if the character is outside the font's range.
pub fn char_to_grid(c: char, font: &FontConfig) -> Option<(f32, f32)> {
    let index = (c as u32).checked_sub(font.start_char as u32)?;
    if index >= font.cols * font.rows {
        return None;
    }
    Some(((index % font.cols) as f32, (index / font.cols) as f32))
}

/// Glyph instances for a label whose top-left corner sits at `pos`.
/// Characters outside the font are skipped but still advance the cursor.
pub fn layout_label(label: &TextLabel, pos: Vec2, font: &FontConfig) -> Vec<RenderInstance> {
    let size = label.size;
    let advance = size * font.spacing;
    let [tint_r, tint_g, tint_b] = Tint(label.color).rgb();

    label
        .text
        .chars()
        .enumerate()
        .filter_map(|(i, c)| {
            let (col, row) = char_to_grid(c, font)?;
            Some(RenderInstance {
                x: pos.x + i as f32 * advance + advance / 2.0,
                y: pos.y + size / 2.0,
                width: advance,
                height: size,
                atlas: font.atlas.0 as f32,
                col,
                row,
                alpha: 1.0,
                tint_r,
                tint_g,
                tint_b,
                _pad: 0.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_to_grid_basic() {
        let font = FontConfig::default();
        // 'S' is ASCII 83, index 51 → col 3, row 3
        assert_eq!(char_to_grid('S', &font), Some((3.0, 3.0)));
        assert_eq!(char_to_grid(' ', &font), Some((0.0, 0.0)));
    }

    #[test]
    fn char_to_grid_out_of_range() {
        let font = FontConfig::default();
        assert!(char_to_grid('\t', &font).is_none());
        assert!(char_to_grid('\u{80}', &font).is_none());
        assert!(char_to_grid('\x7F', &font).is_some());
    }

    #[test]
    fn layout_skips_unprintable_but_advances() {
        let font = FontConfig::new(AtlasId(3));
        let label = TextLabel::new("A\tB", 20.0, 0x000000);

        let glyphs = layout_label(&label, Vec2::new(16.0, 16.0), &font);

        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].atlas, 3.0);
        assert_eq!(glyphs[0].tint_r, 0.0);
        let advance = 20.0 * font.spacing;
        assert!((glyphs[1].x - glyphs[0].x - 2.0 * advance).abs() < 0.001);
        assert_eq!(glyphs[0].y, 26.0);
    }
}
