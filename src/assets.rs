//! Optional asset loading
//!
//! Fixed-named files are looked up in the working directory. Every asset is
//! optional: a missing or unreadable file logs a warning and the game falls
//! back to primitive shapes, silence, or the title-bar HUD.

use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings};
use image::RgbaImage;

pub const PLAYER_IMAGE: &str = "player.png";
pub const ENEMY_IMAGE: &str = "enemy.png";
pub const BACKGROUND_IMAGE: &str = "bg.png";
pub const HIT_SOUND: &str = "beep.wav";
pub const FONT_FILE: &str = "PressStart2P-Regular.ttf";

/// Decoded optional assets
pub struct Assets {
    pub player: Option<RgbaImage>,
    pub enemy: Option<RgbaImage>,
    pub background: Option<RgbaImage>,
    /// Raw encoded sound bytes; decoded by rodio at playback time
    pub hit_sound: Option<Vec<u8>>,
    pub font: Option<Font>,
}

impl Assets {
    /// Load all optional assets from `dir`
    pub fn load(dir: &Path) -> Self {
        Self {
            player: load_image(&dir.join(PLAYER_IMAGE)),
            enemy: load_image(&dir.join(ENEMY_IMAGE)),
            background: load_image(&dir.join(BACKGROUND_IMAGE)),
            hit_sound: load_bytes(&dir.join(HIT_SOUND), "collision sound disabled"),
            font: load_font(&dir.join(FONT_FILE)),
        }
    }
}

fn load_image(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => {
            log::info!("Loaded {}", path.display());
            Some(img.to_rgba8())
        }
        Err(e) => {
            log::warn!(
                "Could not load {} ({e}); falling back to primitive shape",
                path.display()
            );
            None
        }
    }
}

fn load_bytes(path: &Path, fallback_note: &str) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => {
            log::info!("Loaded {}", path.display());
            Some(bytes)
        }
        Err(e) => {
            log::warn!("Could not load {} ({e}); {fallback_note}", path.display());
            None
        }
    }
}

fn load_font(path: &Path) -> Option<Font> {
    let bytes = load_bytes(path, "HUD text disabled")?;
    match Font::from_bytes(bytes, FontSettings::default()) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("Could not parse {} ({e}); HUD text disabled", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_assets_fall_back_to_none() {
        let assets = Assets::load(Path::new("/nonexistent-asset-dir"));
        assert!(assets.player.is_none());
        assert!(assets.enemy.is_none());
        assert!(assets.background.is_none());
        assert!(assets.hit_sound.is_none());
        assert!(assets.font.is_none());
    }
}
