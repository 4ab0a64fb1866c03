//! Tile grid and the items scattered over it
//!
//! The grid is the one piece of world data shared by collision, ray casting
//! and the top-down view. Every lookup goes through `tile`, which bounds
//! checks before touching storage.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::{ITEM_SIZE, TILE_SIZE};

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Grass
    #[default]
    Empty,
    /// Tree
    Wall,
}

/// Item types that can be found on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Mushroom,
    Berry,
    Stick,
    Stone,
    Flower,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Mushroom,
        ItemKind::Berry,
        ItemKind::Stick,
        ItemKind::Stone,
        ItemKind::Flower,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Mushroom => "Mushroom",
            ItemKind::Berry => "Berry",
            ItemKind::Stick => "Stick",
            ItemKind::Stone => "Stone",
            ItemKind::Flower => "Flower",
        }
    }

    /// Base colour before distance shading
    pub fn color(&self) -> [u8; 3] {
        match self {
            ItemKind::Mushroom => [255, 235, 205], // Light beige
            ItemKind::Berry => [220, 20, 60],      // Crimson
            ItemKind::Stick => [205, 133, 63],     // Peru brown
            ItemKind::Stone => [169, 169, 169],    // Dark gray
            ItemKind::Flower => [255, 105, 180],   // Hot pink
        }
    }

    /// Side length of the square footprint
    pub fn extent(&self) -> f32 {
        ITEM_SIZE
    }
}

/// An item lying on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    /// Centre of the footprint
    pub pos: Vec2,
    pub extent: f32,
}

impl Item {
    pub fn new(kind: ItemKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            extent: kind.extent(),
        }
    }

    /// Item centred on a tile
    pub fn at_tile(kind: ItemKind, tile_x: usize, tile_y: usize) -> Self {
        Self::new(kind, TileGrid::tile_center(tile_x, tile_y))
    }
}

/// Occupancy grid plus item list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    /// Row-major cells
    tiles: Vec<Tile>,
    pub items: Vec<Item>,
}

impl TileGrid {
    /// All-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
            items: Vec::new(),
        }
    }

    /// Build from rows of cells (`rows[y][x]`)
    ///
    /// Panics if the rows are ragged.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == width),
            "tile grid rows must all have width {width}"
        );
        Self {
            width,
            height,
            tiles: rows.concat(),
            items: Vec::new(),
        }
    }

    /// Build from ASCII art, `#` for walls and anything else for grass
    pub fn from_ascii(rows: &[&str]) -> Self {
        let rows: Vec<Vec<Tile>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| if c == '#' { Tile::Wall } else { Tile::Empty })
                    .collect()
            })
            .collect();
        Self::from_rows(&rows)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// World size in pixels
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    /// Centre of the map in pixels
    pub fn world_center(&self) -> Vec2 {
        self.world_size() / 2.0
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Bounds-checked lookup
    #[inline]
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.tiles[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// True only for in-bounds walls
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Some(Tile::Wall)
    }

    /// Set a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            self.tiles[y as usize * self.width + x as usize] = tile;
        }
    }

    /// Tile containing a world position
    #[inline]
    pub fn tile_coord(pos: Vec2) -> IVec2 {
        (pos / TILE_SIZE).floor().as_ivec2()
    }

    /// Centre of a tile in world pixels
    pub fn tile_center(tile_x: usize, tile_y: usize) -> Vec2 {
        Vec2::new(
            tile_x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            tile_y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        )
    }

    /// Number of wall cells
    pub fn wall_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Wall).count()
    }

    /// Number of wall cells among the 8 neighbours; out of bounds counts as empty
    pub fn wall_neighbors(&self, x: i32, y: i32) -> usize {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) != (0, 0) && self.is_wall(x + dx, y + dy) {
                    count += 1;
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_checked_lookup() {
        let grid = TileGrid::from_ascii(&["..#", "#.."]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tile(2, 0), Some(Tile::Wall));
        assert_eq!(grid.tile(0, 1), Some(Tile::Wall));
        assert_eq!(grid.tile(1, 1), Some(Tile::Empty));
        assert_eq!(grid.tile(3, 0), None);
        assert_eq!(grid.tile(-1, 0), None);
        assert!(!grid.is_wall(0, 2));
    }

    #[test]
    #[should_panic(expected = "tile grid rows")]
    fn test_ragged_rows_rejected() {
        TileGrid::from_ascii(&["...", ".."]);
    }

    #[test]
    fn test_out_of_bounds_set_ignored() {
        let mut grid = TileGrid::new(2, 2);
        grid.set(5, 5, Tile::Wall);
        grid.set(-1, 0, Tile::Wall);
        assert_eq!(grid.wall_count(), 0);
        grid.set(1, 1, Tile::Wall);
        assert_eq!(grid.wall_count(), 1);
    }

    #[test]
    fn test_tile_coord_floors_negative() {
        assert_eq!(TileGrid::tile_coord(Vec2::new(-0.5, 31.9)), IVec2::new(-1, 0));
        assert_eq!(TileGrid::tile_coord(Vec2::new(64.0, 32.0)), IVec2::new(2, 1));
    }

    #[test]
    fn test_wall_neighbors() {
        let grid = TileGrid::from_ascii(&["###", "#.#", "..."]);
        assert_eq!(grid.wall_neighbors(1, 1), 5);
        // Corner: only in-bounds neighbours count
        assert_eq!(grid.wall_neighbors(0, 0), 2);
    }

    #[test]
    fn test_item_table() {
        let item = Item::at_tile(ItemKind::Berry, 2, 3);
        assert_eq!(item.pos, Vec2::new(80.0, 112.0));
        assert_eq!(item.extent, ITEM_SIZE);
        assert_eq!(ItemKind::Berry.color(), [220, 20, 60]);
        assert_eq!(ItemKind::ALL.len(), 5);
    }
}
