// =============================================================================
// TEXTURE.RS: Keyed textures and frame sequences
//
// Key convention for a resource directory:
//   textures/sky.png                  → "textures/sky"
//   sprites/npc/soldier/walk/0.png …  → sequence "sprites/npc/soldier/walk"
//   textures/walls/1.png …            → sequence "textures/walls"
//
// Files with a purely numeric stem form a sequence keyed by their directory
// (relative to the root), ordered by number. Every other file is keyed by its
// relative path without extension.
// =============================================================================

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use image::RgbaImage;

use crate::error::AssetError;
use crate::npc::{NpcAnim, NpcKind};
use crate::sprite::SpriteKind;
use crate::weapon::Weapon;

use super::frame::Rgba;

pub const SKY: &str = "textures/sky";
pub const WALLS: &str = "textures/walls";
pub const DIGITS: &str = "textures/digits";
pub const GAME_OVER: &str = "textures/game_over";
pub const WIN: &str = "textures/win";
pub const BLOOD: &str = "textures/blood_screen";

/// Decoded RGBA image sampled with nearest-neighbour lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Rgba>,
}

impl Texture {
    /// Build from row-major pixels. `pixels.len()` must equal `width * height`;
    /// a mismatch yields a 1×1 magenta texture.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Self {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return Self::solid([255, 0, 255, 255]);
        }
        Self { width, height, pixels }
    }

    pub fn solid(color: Rgba) -> Self {
        Self { width: 1, height: 1, pixels: vec![color] }
    }

    pub fn from_image(img: &RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        Self::from_pixels(w, h, img.pixels().map(|p| p.0).collect())
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y.min(self.height - 1) * self.width + x.min(self.width - 1)) as usize]
    }

    /// Nearest-neighbour sample at normalised `(u, v)`, clamped to the edges.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let x = (u.clamp(0.0, 1.0) * self.width as f32) as u32;
        let y = (v.clamp(0.0, 1.0) * self.height as f32) as u32;
        self.pixel(x, y)
    }
}

/// Every texture the game needs, by key.
#[derive(Debug, Default)]
pub struct TextureStore {
    singles: HashMap<String, Texture>,
    sequences: HashMap<String, Vec<Texture>>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture) {
        self.singles.insert(key.into(), texture);
    }

    pub fn insert_sequence(&mut self, key: impl Into<String>, frames: Vec<Texture>) {
        self.sequences.insert(key.into(), frames);
    }

    /// Load every PNG under `root` following the key convention above.
    pub fn load_dir<P: AsRef<Path>>(root: P) -> Result<Self, AssetError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(AssetError::MissingRoot(root.to_path_buf()));
        }

        let mut store = Self::new();
        let mut numbered: HashMap<String, BTreeMap<u32, Texture>> = HashMap::new();

        for entry in walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("png") {
                continue;
            }
            let Ok(rel) = path.strip_prefix(root) else { continue };
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };

            let img = image::open(path)
                .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })?
                .to_rgba8();
            let texture = Texture::from_image(&img);

            match stem.parse::<u32>() {
                Ok(index) => {
                    let dir = rel.parent().map(key_of).unwrap_or_default();
                    numbered.entry(dir).or_default().insert(index, texture);
                }
                Err(_) => store.insert(key_of(&rel.with_extension("")), texture),
            }
        }

        for (key, frames) in numbered {
            store.insert_sequence(key, frames.into_values().collect());
        }
        tracing::info!(
            root = %root.display(),
            textures = store.singles.len(),
            sequences = store.sequences.len(),
            "textures loaded"
        );
        Ok(store)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.singles.contains_key(key) || self.sequences.get(key).is_some_and(|s| !s.is_empty())
    }

    /// Frame `index` of `key`, wrapping around the sequence. A single texture
    /// behaves as a one-frame sequence.
    pub fn frame(&self, key: &str, index: usize) -> Option<&Texture> {
        if let Some(frames) = self.sequences.get(key).filter(|s| !s.is_empty()) {
            return frames.get(index % frames.len());
        }
        self.singles.get(key)
    }

    pub fn get(&self, key: &str) -> Option<&Texture> {
        self.frame(key, 0)
    }

    /// Number of frames under `key` (0 when absent).
    pub fn frame_count(&self, key: &str) -> usize {
        match self.sequences.get(key) {
            Some(frames) => frames.len(),
            None => usize::from(self.singles.contains_key(key)),
        }
    }

    /// Fail on the first key in [`required_keys`] that is missing.
    pub fn validate(&self) -> Result<(), AssetError> {
        match required_keys().into_iter().find(|k| !self.contains(k)) {
            Some(missing) => Err(AssetError::MissingKey(missing)),
            None => Ok(()),
        }
    }
}

/// Forward-slash key for a relative path.
fn key_of(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Sequence key of one NPC animation.
pub fn npc_key(kind: NpcKind, anim: NpcAnim) -> String {
    format!("{}/{}", kind.texture_dir(), anim.name())
}

/// Every key the renderer reads.
pub fn required_keys() -> Vec<String> {
    let mut keys: Vec<String> = [SKY, WALLS, DIGITS, GAME_OVER, WIN, BLOOD, Weapon::TEXTURE_KEY]
        .iter()
        .map(|k| k.to_string())
        .collect();
    for kind in [SpriteKind::GreenLight, SpriteKind::RedLight, SpriteKind::Candelabra] {
        keys.push(kind.texture_key().to_string());
    }
    for kind in NpcKind::ALL {
        for anim in NpcAnim::ALL {
            keys.push(npc_key(kind, anim));
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_wraps_sequence() {
        let mut store = TextureStore::new();
        store.insert_sequence("a", vec![Texture::solid([1, 0, 0, 255]), Texture::solid([2, 0, 0, 255])]);
        assert_eq!(store.frame("a", 3).map(|t| t.pixel(0, 0)[0]), Some(2));
        assert_eq!(store.frame_count("a"), 2);
    }

    #[test]
    fn missing_key_fails_validation() {
        let store = TextureStore::new();
        assert!(matches!(store.validate(), Err(AssetError::MissingKey(_))));
    }

    #[test]
    fn mismatched_pixels_fall_back_to_solid() {
        let t = Texture::from_pixels(4, 4, vec![[0; 4]; 3]);
        assert_eq!((t.width, t.height), (1, 1));
    }
}
