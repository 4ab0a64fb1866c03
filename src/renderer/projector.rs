//! Perspective projection of a ray fan into screen columns
//!
//! Each ray becomes one vertical strip. Wall height falls off with the
//! inverse of distance and wall colour darkens linearly with distance.
//! Items get their own strip drawn over the wall.

use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;
use crate::settings::RenderConfig;
use crate::sim::raycast::Ray;
use crate::sim::ItemKind;

/// Sky colour above the horizon
pub const SKY_COLOR: [u8; 3] = [135, 206, 235];
/// Ground colour below the horizon
pub const GROUND_COLOR: [u8; 3] = [34, 139, 34];

/// Darkest an item gets, as a fraction of its base colour
const ITEM_MIN_BRIGHTNESS: f32 = 0.3;

/// A vertically centred coloured span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub top: f32,
    pub height: f32,
    pub color: [u8; 3],
}

impl Span {
    fn centered(height: f32, viewport_height: f32, color: [u8; 3]) -> Self {
        Self {
            top: (viewport_height - height) / 2.0,
            height,
            color,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Draw command for one screen column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStrip {
    /// Left edge in pixels
    pub x: u32,
    /// Drawn width (strip width + 1 to hide seams)
    pub width: u32,
    pub wall: Span,
    /// Item drawn over the wall
    pub item: Option<(ItemKind, Span)>,
}

/// Everything needed to draw one first-person frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveFrame {
    pub viewport: (u32, u32),
    /// First row of the ground half
    pub horizon: u32,
    /// Left to right
    pub columns: Vec<ColumnStrip>,
}

/// Wall brightness for a distance, 0-255
#[inline]
pub fn wall_shade(distance: f32) -> f32 {
    (255.0 - distance * 0.25).clamp(0.0, 255.0)
}

/// Brownish wall colour at a distance
pub fn wall_color(distance: f32) -> [u8; 3] {
    let shade = wall_shade(distance);
    [shade as u8, (shade * 0.8) as u8, (shade * 0.6) as u8]
}

/// Item colour scale factor for a distance
#[inline]
pub fn item_brightness(distance: f32) -> f32 {
    (1.0 - distance * 0.001).clamp(ITEM_MIN_BRIGHTNESS, 1.0)
}

pub fn item_color(kind: ItemKind, distance: f32) -> [u8; 3] {
    let factor = item_brightness(distance);
    kind.color().map(|c| (c as f32 * factor) as u8)
}

/// Projected wall height, capped at twice the viewport height
#[inline]
pub fn wall_height(distance: f32, viewport_height: f32) -> f32 {
    (TILE_SIZE * viewport_height / distance).min(2.0 * viewport_height)
}

/// Projected item height, capped at the viewport height
#[inline]
pub fn item_height(extent: f32, distance: f32, viewport_height: f32) -> f32 {
    (extent * viewport_height / distance).min(viewport_height)
}

/// Turn a ray fan into one column strip per ray
pub fn project(rays: &[Ray], render: &RenderConfig) -> PerspectiveFrame {
    let viewport_height = render.viewport_height as f32;
    let strip_width = match rays.len() {
        0 => 0,
        n => render.viewport_width / n as u32,
    };

    let columns = rays
        .iter()
        .enumerate()
        .map(|(i, ray)| {
            let wall = Span::centered(
                wall_height(ray.distance, viewport_height),
                viewport_height,
                wall_color(ray.distance),
            );

            let item = ray
                .item
                .filter(|item| item.distance < ray.distance)
                .map(|item| {
                    let span = Span::centered(
                        item_height(item.extent, item.distance, viewport_height),
                        viewport_height,
                        item_color(item.kind, item.distance),
                    );
                    (item.kind, span)
                });

            ColumnStrip {
                x: i as u32 * strip_width,
                width: strip_width + 1,
                wall,
                item,
            }
        })
        .collect();

    PerspectiveFrame {
        viewport: (render.viewport_width, render.viewport_height),
        horizon: render.viewport_height / 2,
        columns,
    }
}
