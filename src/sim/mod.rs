//! Deterministic world module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - One synchronous pass per frame
//! - No windowing or platform dependencies

pub mod collision;
pub mod grid;
pub mod mapgen;
pub mod raycast;
pub mod state;
pub mod tick;

pub use collision::{check_collision, find_safe_spawn, resolve_move};
pub use grid::{Item, ItemKind, Tile, TileGrid};
pub use raycast::{Ray, RayItem, cast_ray, cast_rays};
pub use state::{GameState, Inventory, Player, Pose, ViewMode};
pub use tick::{FrameInput, FrameOutput, tick};
