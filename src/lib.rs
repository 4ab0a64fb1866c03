//! Mystic Grove - tile-grid exploration with a ray-cast first-person view
//!
//! Core modules:
//! - `sim`: Deterministic world (tile grid, collision, ray casting, frame driver)
//! - `renderer`: Perspective projection and strip tessellation
//! - `settings`: World and render configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{MapStyle, RenderConfig, Settings, WorldConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Side length of one grid tile (pixels)
    pub const TILE_SIZE: f32 = 32.0;
    /// Side length of the player's bounding square
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Side length of an item's footprint
    pub const ITEM_SIZE: f32 = 16.0;

    /// Field of view of the first-person camera (60 degrees)
    pub const FOV: f32 = std::f32::consts::PI / 3.0;
    /// Rays cast per frame, one per screen column strip
    pub const NUM_RAYS: usize = 120;
    /// Maximum ray travel before it counts as a miss
    pub const MAX_DEPTH: f32 = 800.0;
    /// Floor for every resolved ray distance
    pub const MIN_DISTANCE: f32 = 0.1;

    /// Movement per frame at full input
    pub const MOVEMENT_SPEED: f32 = 4.0;
    /// Rotation per frame at full input (radians)
    pub const ROTATION_SPEED: f32 = 0.04;
    /// Items closer than this to the player centre get picked up
    pub const PICKUP_RANGE: f32 = TILE_SIZE;

    /// Default viewport
    pub const INITIAL_WINDOW_WIDTH: u32 = 800;
    pub const INITIAL_WINDOW_HEIGHT: u32 = 600;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit direction vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
