use serde::{Deserialize, Serialize};

use crate::assets::error::AssetError;

/// Asset manifest describing every image and sprite sheet a game uses.
/// Loaded from a JSON file at runtime.
///
/// Atlas indices are assigned in order: images first, then sprite sheets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
    #[serde(default)]
    pub spritesheets: Vec<SheetDescriptor>,
}

/// A single-frame image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Lookup key used by game code (e.g. "sky").
    pub key: String,
    /// Relative path to the PNG file.
    pub path: String,
}

/// A grid of equally sized animation frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    pub key: String,
    pub path: String,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Total number of frames.
    pub frames: u32,
    /// Frames per row. Defaults to `frames` (a single strip).
    #[serde(default)]
    pub columns: Option<u32>,
}

impl SheetDescriptor {
    pub fn columns(&self) -> u32 {
        self.columns.unwrap_or(self.frames)
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn atlas_count(&self) -> usize {
        self.images.len() + self.spritesheets.len()
    }
}
