//! Ray casting for the first-person view
//!
//! Walls are found with a grid DDA: the ray is advanced one cell at a time,
//! always crossing whichever of the next vertical or horizontal grid line is
//! closer. Items are tested analytically against each ray and kept only
//! when they sit in front of the wall.

use glam::Vec2;

use super::grid::{ItemKind, Tile, TileGrid};
use crate::consts::{FOV, MAX_DEPTH, MIN_DISTANCE, NUM_RAYS, TILE_SIZE};
use crate::direction;

/// Nearest item seen along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayItem {
    /// Index into `TileGrid::items` at cast time
    pub index: usize,
    pub kind: ItemKind,
    pub extent: f32,
    /// Fisheye-corrected distance
    pub distance: f32,
}

/// One cast ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub angle: f32,
    /// Fisheye-corrected wall distance, never below `MIN_DISTANCE`
    pub distance: f32,
    pub hit_point: Vec2,
    /// Whether a wall stopped the ray
    pub hit: bool,
    pub item: Option<RayItem>,
}

/// Raw (radial) result of walking the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub distance: f32,
    pub point: Vec2,
    pub hit: bool,
}

/// Step direction and initial side distance for one axis (in tile units)
fn axis_setup(origin: f32, cell: i32, dir: f32, delta: f32) -> (i32, f32) {
    if delta.is_infinite() {
        return (0, f32::INFINITY);
    }
    let cell_start = cell as f32 * TILE_SIZE;
    if dir < 0.0 {
        (-1, (origin - cell_start) / TILE_SIZE * delta)
    } else {
        (1, (cell_start + TILE_SIZE - origin) / TILE_SIZE * delta)
    }
}

/// Walk the grid from `origin` along `angle` until a wall, the depth limit,
/// or the edge of the map
pub fn cast_wall(grid: &TileGrid, origin: Vec2, angle: f32) -> WallHit {
    let dir = direction(angle);
    let mut cell = TileGrid::tile_coord(origin);

    // Tile units crossed per grid line
    let delta_x = if dir.x != 0.0 {
        (1.0 / dir.x).abs()
    } else {
        f32::INFINITY
    };
    let delta_y = if dir.y != 0.0 {
        (1.0 / dir.y).abs()
    } else {
        f32::INFINITY
    };

    let (step_x, mut side_x) = axis_setup(origin.x, cell.x, dir.x, delta_x);
    let (step_y, mut side_y) = axis_setup(origin.y, cell.y, dir.y, delta_y);

    loop {
        // Distance travelled to the line being crossed
        let travelled = if side_x < side_y {
            let d = side_x;
            side_x += delta_x;
            cell.x += step_x;
            d
        } else {
            let d = side_y;
            side_y += delta_y;
            cell.y += step_y;
            d
        };

        let distance = travelled * TILE_SIZE;
        if distance > MAX_DEPTH {
            break;
        }

        match grid.tile(cell.x, cell.y) {
            Some(Tile::Wall) => {
                let distance = distance.max(MIN_DISTANCE);
                return WallHit {
                    distance,
                    point: origin + dir * distance,
                    hit: true,
                };
            }
            Some(Tile::Empty) => {}
            None => break,
        }
    }

    WallHit {
        distance: MAX_DEPTH,
        point: origin + dir * MAX_DEPTH,
        hit: false,
    }
}

/// Nearest item the ray passes through, as (index, along-ray distance)
///
/// Distance is measured to the item centre.
pub fn nearest_item(grid: &TileGrid, origin: Vec2, angle: f32) -> Option<(usize, f32)> {
    let dir = direction(angle);
    let mut best: Option<(usize, f32)> = None;

    for (index, item) in grid.items.iter().enumerate() {
        let to_item = item.pos - origin;
        let length = to_item.length();
        if length < MIN_DISTANCE {
            continue;
        }

        // Behind the origin, or not aligned with the ray
        let along = to_item.dot(dir);
        if along < 0.0 || along > length {
            continue;
        }

        // Ray line misses the footprint
        let perp = to_item.perp_dot(dir).abs();
        if perp > item.extent / 2.0 {
            continue;
        }

        if best.is_none_or(|(_, d)| along < d) {
            best = Some((index, along));
        }
    }

    best
}

/// Convert radial distance to distance from the camera plane
#[inline]
pub fn fisheye_correct(distance: f32, ray_angle: f32, facing: f32) -> f32 {
    (distance * (ray_angle - facing).cos()).max(MIN_DISTANCE)
}

/// Cast a single ray for a camera facing `facing`
pub fn cast_ray(grid: &TileGrid, origin: Vec2, angle: f32, facing: f32) -> Ray {
    let wall = cast_wall(grid, origin, angle);
    let distance = fisheye_correct(wall.distance, angle, facing);

    let item = nearest_item(grid, origin, angle).and_then(|(index, along)| {
        let item_distance = fisheye_correct(along, angle, facing);
        // Items hidden behind the wall are dropped
        (item_distance < distance).then(|| {
            let item = &grid.items[index];
            RayItem {
                index,
                kind: item.kind,
                extent: item.extent,
                distance: item_distance,
            }
        })
    });

    Ray {
        angle,
        distance,
        hit_point: wall.point,
        hit: wall.hit,
        item,
    }
}

/// Angle of ray `i` in a fan centred on `facing`
#[inline]
pub fn ray_angle(facing: f32, i: usize) -> f32 {
    facing - FOV / 2.0 + i as f32 * (FOV / NUM_RAYS as f32)
}

/// Cast the full fan of `NUM_RAYS` rays, left to right
pub fn cast_rays(grid: &TileGrid, origin: Vec2, facing: f32) -> Vec<Ray> {
    (0..NUM_RAYS)
        .map(|i| cast_ray(grid, origin, ray_angle(facing, i), facing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Item;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI, SQRT_2};

    fn grid_with_walls(size: usize, walls: &[(i32, i32)]) -> TileGrid {
        let mut grid = TileGrid::new(size, size);
        for &(x, y) in walls {
            grid.set(x, y, Tile::Wall);
        }
        grid
    }

    #[test]
    fn test_single_wall_hit() {
        let grid = grid_with_walls(10, &[(5, 5)]);
        // Just inside tile (3, 5)
        let origin = Vec2::new(96.5, 176.0);
        let ray = cast_ray(&grid, origin, 0.0, 0.0);

        assert!(ray.hit);
        assert!((ray.distance - 63.5).abs() < 1e-3);
        assert!((ray.hit_point.x - 160.0).abs() < 1e-3);
        assert!((ray.hit_point.y - 176.0).abs() < 1e-3);
        assert!(ray.item.is_none());
    }

    #[test]
    fn test_miss_leaves_grid() {
        let grid = TileGrid::new(10, 10);
        let origin = Vec2::new(160.0, 160.0);
        let ray = cast_ray(&grid, origin, 0.0, 0.0);
        assert!(!ray.hit);
        assert_eq!(ray.distance, MAX_DEPTH);
        assert!((ray.hit_point - Vec2::new(960.0, 160.0)).length() < 1e-3);
    }

    #[test]
    fn test_miss_beyond_max_depth() {
        // Wall sits past the depth limit
        let mut grid = TileGrid::new(40, 3);
        grid.set(30, 1, Tile::Wall);
        let wall = cast_wall(&grid, Vec2::new(16.0, 48.0), 0.0);
        assert!(!wall.hit);
        assert_eq!(wall.distance, MAX_DEPTH);
    }

    #[test]
    fn test_flat_wall_has_no_fisheye() {
        // Wall column at x tile 8, perpendicular to a camera facing +x
        let walls: Vec<(i32, i32)> = (0..10).map(|y| (8, y)).collect();
        let grid = grid_with_walls(10, &walls);
        let origin = Vec2::new(80.0, 176.0);
        let expected = 256.0 - 80.0;

        let left = cast_ray(&grid, origin, -FOV / 2.0, 0.0);
        let right = cast_ray(&grid, origin, FOV / 2.0, 0.0);
        assert!((left.distance - right.distance).abs() < 1e-2);
        assert!((left.distance - expected).abs() < 1e-2);

        let fan = cast_rays(&grid, origin, 0.0);
        for i in 1..NUM_RAYS / 2 {
            let a = fan[i].distance;
            let b = fan[NUM_RAYS - i].distance;
            assert!((a - b).abs() < 1e-2, "ray {i}: {a} vs {b}");
        }
        assert!(fan.iter().all(|r| (r.distance - expected).abs() < 1e-2));
    }

    #[test]
    fn test_fan_order_and_angles() {
        let grid = TileGrid::new(10, 10);
        let fan = cast_rays(&grid, Vec2::new(160.0, 160.0), 1.0);
        assert_eq!(fan.len(), NUM_RAYS);
        assert!((fan[0].angle - (1.0 - FOV / 2.0)).abs() < 1e-6);
        assert!(fan.windows(2).all(|w| w[0].angle < w[1].angle));
        assert!(fan[NUM_RAYS - 1].angle < 1.0 + FOV / 2.0);
    }

    #[test]
    fn test_item_on_ray_is_selected() {
        let mut grid = TileGrid::new(10, 10);
        grid.items.push(Item::new(ItemKind::Stone, Vec2::new(100.0, 100.0)));
        let ray = cast_ray(&grid, Vec2::new(0.0, 100.0), 0.0, 0.0);

        let item = ray.item.expect("item on the ray");
        assert_eq!(item.kind, ItemKind::Stone);
        assert_eq!(item.index, 0);
        assert!((item.distance - 100.0).abs() < 1e-3);
        assert!(item.distance < ray.distance);
    }

    #[test]
    fn test_item_behind_wall_is_dropped() {
        let mut grid = grid_with_walls(10, &[(2, 3)]);
        grid.items.push(Item::new(ItemKind::Stone, Vec2::new(100.0, 100.0)));
        let ray = cast_ray(&grid, Vec2::new(0.0, 100.0), 0.0, 0.0);
        assert!(ray.hit);
        assert!((ray.distance - 64.0).abs() < 1e-3);
        assert!(ray.item.is_none());
    }

    #[test]
    fn test_item_off_ray_and_behind_are_ignored() {
        let mut grid = TileGrid::new(10, 10);
        // Off to the side by more than half the extent
        grid.items.push(Item::new(ItemKind::Berry, Vec2::new(100.0, 109.0)));
        // Behind the origin
        grid.items.push(Item::new(ItemKind::Flower, Vec2::new(50.0, 100.0)));
        // On the origin
        grid.items.push(Item::new(ItemKind::Stick, Vec2::new(80.0, 100.0)));
        assert_eq!(nearest_item(&grid, Vec2::new(80.0, 100.0), 0.0), None);
    }

    #[test]
    fn test_nearest_item_wins() {
        let mut grid = TileGrid::new(10, 10);
        grid.items.push(Item::new(ItemKind::Berry, Vec2::new(200.0, 100.0)));
        grid.items.push(Item::new(ItemKind::Flower, Vec2::new(150.0, 103.0)));
        let (index, along) = nearest_item(&grid, Vec2::new(20.0, 100.0), 0.0).unwrap();
        assert_eq!(index, 1);
        assert!((along - 130.0).abs() < 1e-3);
    }

    #[test]
    fn test_item_distance_is_fisheye_corrected() {
        let mut grid = TileGrid::new(10, 10);
        grid.items.push(Item::new(ItemKind::Berry, Vec2::new(200.0, 200.0)));
        let angle = PI / 4.0;
        let ray = cast_ray(&grid, Vec2::new(100.0, 100.0), angle, angle - 0.3);

        let item = ray.item.expect("item on the diagonal");
        let along = 100.0 * SQRT_2;
        assert!((item.distance - along * 0.3f32.cos()).abs() < 1e-2);
    }

    #[test]
    fn test_item_and_wall_compared_after_correction() {
        // Wall face 150px ahead, item 140px ahead, camera turned 0.5 rad away
        let mut grid = grid_with_walls(10, &[(5, 5)]);
        grid.items.push(Item::new(ItemKind::Stone, Vec2::new(150.0, 176.0)));
        let ray = cast_ray(&grid, Vec2::new(10.0, 176.0), 0.0, -0.5);

        assert!(ray.hit);
        assert!((ray.distance - 150.0 * 0.5f32.cos()).abs() < 1e-2);
        // The raw item distance is already past the corrected wall
        assert!(140.0 > ray.distance);
        let item = ray.item.expect("item in front of the wall");
        assert!((item.distance - 140.0 * 0.5f32.cos()).abs() < 1e-2);
        assert!(item.distance < ray.distance);
    }

    #[test]
    fn test_deterministic_fan() {
        let mut grid = grid_with_walls(12, &[(1, 1), (7, 3), (9, 9), (4, 10)]);
        grid.items.push(Item::at_tile(ItemKind::Mushroom, 6, 6));
        let origin = Vec2::new(170.0, 150.0);
        assert_eq!(cast_rays(&grid, origin, 0.7), cast_rays(&grid, origin, 0.7));
    }

    proptest! {
        #[test]
        fn adjacent_wall_hit_on_boundary(
            ox in 0.5f32..31.5,
            oy in 0.5f32..31.5,
            side in 0usize..4,
        ) {
            // Wall-only grid; the origin sits inside tile (3, 3)
            let rows = vec![vec![Tile::Wall; 8]; 8];
            let grid = TileGrid::from_rows(&rows);
            let origin = Vec2::new(96.0 + ox, 96.0 + oy);
            let (nx, ny) = [(1, 0), (-1, 0), (0, 1), (0, -1)][side];
            let target = TileGrid::tile_center((3 + nx) as usize, (3 + ny) as usize);
            let angle = (target - origin).to_angle();

            let ray = cast_ray(&grid, origin, angle, angle);
            prop_assert!(ray.hit);
            prop_assert!(ray.distance <= TILE_SIZE * SQRT_2);

            let p = ray.hit_point;
            let tile_min = Vec2::new((3 + nx) as f32, (3 + ny) as f32) * TILE_SIZE;
            let tile_max = tile_min + Vec2::splat(TILE_SIZE);
            let on_x_edge = (p.x - tile_min.x).abs() < 1e-2 || (p.x - tile_max.x).abs() < 1e-2;
            let on_y_edge = (p.y - tile_min.y).abs() < 1e-2 || (p.y - tile_max.y).abs() < 1e-2;
            prop_assert!(on_x_edge || on_y_edge);
            prop_assert!(p.x >= tile_min.x - 1e-2 && p.x <= tile_min.x + TILE_SIZE + 1e-2);
            prop_assert!(p.y >= tile_min.y - 1e-2 && p.y <= tile_min.y + TILE_SIZE + 1e-2);
        }

        #[test]
        fn distances_respect_floor(
            x in 0.0f32..320.0,
            y in 0.0f32..320.0,
            facing in 0.0f32..(2.0 * PI),
        ) {
            let mut grid = grid_with_walls(10, &[(2, 2), (5, 5), (8, 1), (0, 9)]);
            grid.items.push(Item::at_tile(ItemKind::Berry, 4, 4));
            grid.items.push(Item::new(ItemKind::Stone, Vec2::new(x + 0.05, y)));
            for ray in cast_rays(&grid, Vec2::new(x, y), facing) {
                prop_assert!(ray.distance >= MIN_DISTANCE);
                if let Some(item) = ray.item {
                    prop_assert!(item.distance >= MIN_DISTANCE);
                    prop_assert!(item.distance < ray.distance);
                }
            }
        }
    }

    #[test]
    fn test_axis_aligned_rays_avoid_nan() {
        let grid = grid_with_walls(10, &[(5, 2)]);
        // Origin exactly on a grid line, looking straight down the column
        let origin = Vec2::new(160.0 + 16.0, 32.0);
        let ray = cast_ray(&grid, origin, FRAC_PI_2, FRAC_PI_2);
        assert!(ray.hit);
        assert!(ray.distance.is_finite());
        assert!((ray.distance - 32.0).abs() < 1e-3);
    }
}
