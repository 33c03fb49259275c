/// A mutable line of text drawn with the bitmap font.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Glyph height in world units.
    pub size: f32,
    /// Packed `0xRRGGBB`.
    pub color: u32,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, size: f32, color: u32) -> Self {
        Self {
            text: text.into(),
            size,
            color,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
