//! Per-axis swept collision against the tile grid
//!
//! A 2D move is resolved as an X move followed by a Y move. Each axis is
//! tested on its own, so a diagonal push into a wall keeps the free
//! component and the player slides along the wall.

use glam::{IVec2, Vec2};

use super::grid::{Tile, TileGrid};
use crate::consts::{PLAYER_SIZE, TILE_SIZE};

/// Angular samples per spawn ring (every 30 degrees)
const SPAWN_RING_SAMPLES: u32 = 12;

/// Axis-aligned box in world pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Square box from its top-left corner
    pub fn square(top_left: Vec2, size: f32) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::splat(size),
        }
    }

    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Open-interval overlap: touching edges do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn of_tile(tile: IVec2) -> Self {
        Self::square(tile.as_vec2() * TILE_SIZE, TILE_SIZE)
    }
}

/// The player's bounding box at a position (top-left corner)
pub fn player_box(pos: Vec2) -> Aabb {
    Aabb::square(pos, PLAYER_SIZE)
}

/// Check whether a box overlaps any wall cell
///
/// Scans the tiles under the box plus a one-tile ring around them and tests
/// each in-bounds wall against the box itself.
pub fn box_hits_wall(grid: &TileGrid, aabb: &Aabb) -> bool {
    let lo = TileGrid::tile_coord(aabb.min) - IVec2::ONE;
    let hi = TileGrid::tile_coord(aabb.max) + IVec2::ONE;

    for ty in lo.y..=hi.y {
        for tx in lo.x..=hi.x {
            if grid.tile(tx, ty) != Some(Tile::Wall) {
                continue;
            }
            if Aabb::of_tile(IVec2::new(tx, ty)).intersects(aabb) {
                return true;
            }
        }
    }
    false
}

/// Whether the player's box at `pos` overlaps a wall
#[inline]
pub fn check_collision(grid: &TileGrid, pos: Vec2) -> bool {
    box_hits_wall(grid, &player_box(pos))
}

/// Legal range for the player's top-left corner
pub fn clamp_bounds(grid: &TileGrid) -> (Vec2, Vec2) {
    let lo = Vec2::splat(PLAYER_SIZE);
    let hi = (grid.world_size() - Vec2::splat(PLAYER_SIZE)).max(lo);
    (lo, hi)
}

/// Clamp a position into the map
pub fn clamp_to_map(grid: &TileGrid, pos: Vec2) -> Vec2 {
    let (lo, hi) = clamp_bounds(grid);
    pos.clamp(lo, hi)
}

/// Result of a resolved move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,
    /// X component was rejected by a wall
    pub blocked_x: bool,
    /// Y component was rejected by a wall
    pub blocked_y: bool,
}

/// Try one axis of a move, returning the committed position
fn try_axis(grid: &TileGrid, pos: Vec2, delta: Vec2) -> Option<Vec2> {
    let candidate = clamp_to_map(grid, pos + delta);
    if candidate == pos {
        return Some(pos);
    }

    // Swept test: the box covering the whole axis move, not just its end
    let swept = player_box(pos).union(&player_box(candidate));
    if box_hits_wall(grid, &swept) {
        None
    } else {
        Some(candidate)
    }
}

/// Resolve a movement delta against the grid, one axis at a time
pub fn resolve_move(grid: &TileGrid, pos: Vec2, delta: Vec2) -> MoveResult {
    let mut result = MoveResult {
        pos,
        blocked_x: false,
        blocked_y: false,
    };

    if delta.x != 0.0 {
        match try_axis(grid, result.pos, Vec2::new(delta.x, 0.0)) {
            Some(p) => result.pos = p,
            None => result.blocked_x = true,
        }
    }
    if delta.y != 0.0 {
        match try_axis(grid, result.pos, Vec2::new(0.0, delta.y)) {
            Some(p) => result.pos = p,
            None => result.blocked_y = true,
        }
    }

    result
}

/// Whether a spawn candidate is inside the map and clear of walls
fn is_safe_spawn(grid: &TileGrid, pos: Vec2) -> bool {
    let (lo, hi) = clamp_bounds(grid);
    pos.cmpge(lo).all() && pos.cmple(hi).all() && !check_collision(grid, pos)
}

/// Find a wall-free position for the player near `desired` (top-left corner)
///
/// Tries `desired`, then rings of 12 samples at growing radius. If nothing
/// fits, clears the 3x3 tiles around the map centre and spawns there, so
/// this always returns a usable position.
pub fn find_safe_spawn(grid: &mut TileGrid, desired: Vec2) -> Vec2 {
    if is_safe_spawn(grid, desired) {
        return desired;
    }

    let world = grid.world_size();
    let max_radius = world.x.max(world.y) / 2.0;
    let mut radius = TILE_SIZE;
    while radius < max_radius {
        for i in 0..SPAWN_RING_SAMPLES {
            let angle = (i as f32 * 30.0).to_radians();
            let candidate = desired + Vec2::new(angle.cos(), angle.sin()) * radius;
            if is_safe_spawn(grid, candidate) {
                log::debug!("Spawn found at radius {radius}");
                return candidate;
            }
        }
        radius += TILE_SIZE;
    }

    let center = grid.world_center();
    let center_tile = TileGrid::tile_coord(center);
    log::warn!(
        "No safe spawn near {desired}, clearing tiles around {}",
        center_tile
    );
    for dy in -1..=1 {
        for dx in -1..=1 {
            grid.set(center_tile.x + dx, center_tile.y + dy, Tile::Empty);
        }
    }
    clamp_to_map(grid, center - Vec2::splat(PLAYER_SIZE / 2.0))
}
