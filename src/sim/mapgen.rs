//! Procedural forest generation
//!
//! Random fill, optionally smoothed by a cellular automaton into clumps of
//! trees, then scattered items on the remaining grass. All randomness comes
//! from the caller's seeded RNG so a seed always yields the same map.

use rand::Rng;

use super::grid::{Item, ItemKind, Tile, TileGrid};
use crate::consts::TILE_SIZE;
use crate::settings::{MapStyle, RenderConfig, WorldConfig};

/// Walls with at least this many wall neighbours survive a round
const SURVIVE_NEIGHBORS: usize = 3;
/// Grass with at least this many wall neighbours becomes a wall
const BIRTH_NEIGHBORS: usize = 5;

/// Grid dimensions covering a viewport
pub fn grid_size_for(render: &RenderConfig) -> (usize, usize) {
    let tile = TILE_SIZE as u32;
    (
        (render.viewport_width / tile) as usize,
        (render.viewport_height / tile) as usize,
    )
}

/// Fill every cell independently with the configured tree density
pub fn random_fill<R: Rng>(grid: &mut TileGrid, density: f32, rng: &mut R) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let tile = if rng.random::<f32>() < density {
                Tile::Wall
            } else {
                Tile::Empty
            };
            grid.set(x, y, tile);
        }
    }
}

/// One round of the forest automaton
pub fn smooth(grid: &TileGrid) -> TileGrid {
    let mut next = TileGrid::new(grid.width(), grid.height());
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let neighbors = grid.wall_neighbors(x, y);
            let wall = if grid.is_wall(x, y) {
                neighbors >= SURVIVE_NEIGHBORS
            } else {
                neighbors >= BIRTH_NEIGHBORS
            };
            if wall {
                next.set(x, y, Tile::Wall);
            }
        }
    }
    next
}

/// Scatter items over grass cells, replacing any existing items
pub fn spawn_items<R: Rng>(grid: &mut TileGrid, chance: f32, rng: &mut R) {
    grid.items.clear();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.tile(x as i32, y as i32) != Some(Tile::Empty) {
                continue;
            }
            if rng.random::<f32>() < chance {
                let kind = ItemKind::ALL[rng.random_range(0..ItemKind::ALL.len())];
                grid.items.push(Item::at_tile(kind, x, y));
            }
        }
    }
}

/// Generate a fresh map of the given size
pub fn generate<R: Rng>(
    width: usize,
    height: usize,
    config: &WorldConfig,
    rng: &mut R,
) -> TileGrid {
    let mut grid = TileGrid::new(width, height);
    random_fill(&mut grid, config.tree_density, rng);

    if config.style == MapStyle::Clustered {
        for _ in 0..config.forest_iterations {
            grid = smooth(&grid);
        }
    }

    spawn_items(&mut grid, config.item_spawn_chance, rng);

    log::info!(
        "Generated {}x{} {} map: {} trees, {} items",
        width,
        height,
        config.style.as_str(),
        grid.wall_count(),
        grid.items.len()
    );
    grid
}
