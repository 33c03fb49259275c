use std::collections::HashMap;

use crate::assets::error::AssetError;
use crate::assets::manifest::{AssetManifest, SheetDescriptor};
use crate::components::sprite::{AtlasId, SpriteComponent};

/// Geometry of a registered sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetInfo {
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: u32,
    pub columns: u32,
}

#[derive(Debug, Clone)]
struct AssetEntry {
    atlas: AtlasId,
    sheet: Option<SheetInfo>,
}

/// Registry of keyed assets, built from an AssetManifest.
/// Provides key-based sprite lookup for game code.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    entries: HashMap<String, AssetEntry>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest, validating every sheet.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let mut registry = Self::new();
        let mut atlas = 0u32;

        for image in &manifest.images {
            registry.insert(&image.key, AtlasId(atlas), None)?;
            atlas += 1;
        }
        for sheet in &manifest.spritesheets {
            let info = validate_sheet(sheet)?;
            registry.insert(&sheet.key, AtlasId(atlas), Some(info))?;
            atlas += 1;
        }

        Ok(registry)
    }

    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let manifest = AssetManifest::from_json(json)?;
        Self::from_manifest(&manifest)
    }

    fn insert(&mut self, key: &str, atlas: AtlasId, sheet: Option<SheetInfo>) -> Result<(), AssetError> {
        if self.entries.contains_key(key) {
            return Err(AssetError::DuplicateKey(key.to_string()));
        }
        self.entries.insert(key.to_string(), AssetEntry { atlas, sheet });
        Ok(())
    }

    /// A sprite showing the first frame of `key`.
    pub fn sprite(&self, key: &str) -> Result<SpriteComponent, AssetError> {
        self.entries
            .get(key)
            .map(|entry| SpriteComponent::new(entry.atlas))
            .ok_or_else(|| AssetError::UnknownKey(key.to_string()))
    }

    /// Sheet geometry for `key`. Plain images are not sheets.
    pub fn sheet(&self, key: &str) -> Result<SheetInfo, AssetError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| AssetError::UnknownKey(key.to_string()))?;
        entry.sheet.ok_or(AssetError::InvalidSheet {
            key: key.to_string(),
            reason: "registered as a plain image",
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_sheet(sheet: &SheetDescriptor) -> Result<SheetInfo, AssetError> {
    let invalid = |reason| AssetError::InvalidSheet {
        key: sheet.key.clone(),
        reason,
    };
    if sheet.frame_width == 0 || sheet.frame_height == 0 {
        return Err(invalid("frame size must be non-zero"));
    }
    if sheet.frames == 0 {
        return Err(invalid("sheet has no frames"));
    }
    if sheet.columns() == 0 {
        return Err(invalid("sheet has no columns"));
    }
    Ok(SheetInfo {
        frame_width: sheet.frame_width,
        frame_height: sheet.frame_height,
        frames: sheet.frames,
        columns: sheet.columns(),
    })
}
