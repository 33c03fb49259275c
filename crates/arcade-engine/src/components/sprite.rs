/// Identifies which texture atlas a sprite belongs to.
/// Index into the asset manifest's atlas list (images first, then sheets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Multiplicative color applied to a sprite, packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint(pub u32);

impl Tint {
    /// No recoloring.
    pub const NONE: Tint = Tint(0xffffff);

    /// Red, green and blue in `0.0..=1.0`.
    pub fn rgb(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::NONE
    }
}

/// How an entity appears on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    pub atlas: AtlasId,
    /// Frame column in the atlas grid.
    pub col: f32,
    /// Frame row in the atlas grid.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub tint: Tint,
}

impl SpriteComponent {
    pub fn new(atlas: AtlasId) -> Self {
        Self {
            atlas,
            ..Default::default()
        }
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            col: 0.0,
            row: 0.0,
            alpha: 1.0,
            tint: Tint::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_unpacks_channels() {
        assert_eq!(Tint(0xff0000).rgb(), [1.0, 0.0, 0.0]);
        assert_eq!(Tint::NONE.rgb(), [1.0, 1.0, 1.0]);
        assert_eq!(SpriteComponent::default().tint, Tint::NONE);
    }
}
