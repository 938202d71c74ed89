//! Dodgefall - a falling-object dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, score)
//! - `renderer`: WebGPU rendering pipelines (solid shapes, sprites, text)
//! - `assets`: Optional asset loading with primitive-shape fallbacks
//! - `audio`: Collision sound playback
//! - `settings`: Preferences file

pub mod assets;
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth movement)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical playfield size (window pixels, origin top-left, y down)
    pub const WINDOW_W: f32 = 800.0;
    pub const WINDOW_H: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 24.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Player starts centered horizontally, this far above the bottom edge
    pub const PLAYER_START_OFFSET_Y: f32 = 60.0;

    /// Faller defaults
    pub const FALLER_RADIUS: f32 = 18.0;
    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 0.9;
    /// Horizontal margin kept clear at both edges when spawning
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Spawn height above the visible area
    pub const SPAWN_Y: f32 = -40.0;
    /// Fallers past this line are despawned and award a point
    pub const DESPAWN_Y: f32 = WINDOW_H + 50.0;
    /// Downward speed range (pixels/s)
    pub const FALL_SPEED_MIN: f32 = 120.0;
    pub const FALL_SPEED_MAX: f32 = 260.0;
    /// Horizontal drift range is [-DRIFT_MAX, DRIFT_MAX] (pixels/s)
    pub const DRIFT_MAX: f32 = 80.0;

    /// Sprite sizes when textures are present (render-only; the
    /// collision radii above are fixed regardless of render mode)
    pub const PLAYER_SPRITE_SIZE: f32 = 48.0;
    pub const FALLER_SPRITE_SIZE: f32 = 40.0;
}
