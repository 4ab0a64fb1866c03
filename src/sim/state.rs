//! Player, inventory and world state

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{find_safe_spawn, resolve_move};
use super::grid::{ItemKind, TileGrid};
use super::mapgen;
use crate::consts::*;
use crate::settings::{RenderConfig, Settings, WorldConfig};
use crate::{direction, normalize_angle};

/// Which projection is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Orthographic tile view
    #[default]
    TopDown,
    /// Ray-cast perspective view
    FirstPerson,
}

impl ViewMode {
    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::TopDown => ViewMode::FirstPerson,
            ViewMode::FirstPerson => ViewMode::TopDown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::TopDown => "Top Down",
            ViewMode::FirstPerson => "First Person",
        }
    }
}

/// Player position and heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Top-left corner of the player's bounding square
    pub pos: Vec2,
    /// Facing angle in [0, 2π); 0 faces +x
    pub angle: f32,
}

impl Pose {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle: normalize_angle(angle),
        }
    }

    /// Centre of the bounding square, where rays start
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(PLAYER_SIZE / 2.0)
    }

    /// Turn by `direction` steps of `ROTATION_SPEED`
    pub fn rotate(&mut self, direction: f32) {
        self.angle = normalize_angle(self.angle + direction * ROTATION_SPEED);
    }
}

/// Item counts by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn add(&mut self, kind: ItemKind) {
        *self.items.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.items.values().sum()
    }
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pose: Pose,
    pub view_mode: ViewMode,
    pub inventory: Inventory,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pose: Pose::new(pos, 0.0),
            view_mode: ViewMode::TopDown,
            inventory: Inventory::default(),
        }
    }

    /// World-space movement for an input intent `(dx, dy)` in [-1, 1]²
    ///
    /// Top-down moves along the screen axes. First-person treats `-dy` as
    /// forward and `dx` as strafe relative to the facing angle.
    pub fn movement_delta(&self, intent: Vec2) -> Vec2 {
        match self.view_mode {
            ViewMode::TopDown => intent * MOVEMENT_SPEED,
            ViewMode::FirstPerson => {
                let forward = -intent.y * MOVEMENT_SPEED;
                let strafe = intent.x * MOVEMENT_SPEED;
                let angle = self.pose.angle;
                direction(angle) * forward
                    + direction(angle + std::f32::consts::FRAC_PI_2) * strafe
            }
        }
    }

    /// Move against the grid, sliding along walls
    pub fn move_by(&mut self, grid: &TileGrid, intent: Vec2) {
        let delta = self.movement_delta(intent);
        if delta != Vec2::ZERO {
            self.pose.pos = resolve_move(grid, self.pose.pos, delta).pos;
        }
    }

    /// Pick up every item within `PICKUP_RANGE` of the player centre
    pub fn pickup_items(&mut self, grid: &mut TileGrid) -> usize {
        let center = self.pose.center();
        let before = grid.items.len();
        let inventory = &mut self.inventory;
        grid.items.retain(|item| {
            if item.pos.distance(center) < PICKUP_RANGE {
                log::debug!("Picked up {}", item.kind.name());
                inventory.add(item.kind);
                false
            } else {
                true
            }
        });
        before - grid.items.len()
    }
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: WorldConfig,
    pub render: RenderConfig,
    pub grid: TileGrid,
    pub player: Player,
    /// Generator RNG; advances with every regeneration
    rng: Pcg32,
    /// Frames simulated
    pub frame: u64,
}

impl GameState {
    /// Generate the first map and spawn the player at its centre
    pub fn new(settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.world.seed);
        let (width, height) = mapgen::grid_size_for(&settings.render);
        let grid = mapgen::generate(width, height, &settings.world, &mut rng);

        let mut state = Self {
            config: settings.world,
            render: settings.render,
            grid,
            player: Player::new(Vec2::ZERO),
            rng,
            frame: 0,
        };
        state.respawn();
        state
    }

    /// Start from a prepared grid (no generation)
    pub fn with_grid(settings: Settings, grid: TileGrid) -> Self {
        let mut state = Self {
            config: settings.world,
            render: settings.render,
            grid,
            player: Player::new(Vec2::ZERO),
            rng: Pcg32::seed_from_u64(settings.world.seed),
            frame: 0,
        };
        state.respawn();
        state
    }

    /// Default spawn target: the player centred on the map
    pub fn spawn_target(&self) -> Vec2 {
        self.grid.world_center() - Vec2::splat(PLAYER_SIZE / 2.0)
    }

    /// Move the player to a safe spot near the map centre
    pub fn respawn(&mut self) {
        let target = self.spawn_target();
        self.player.pose.pos = find_safe_spawn(&mut self.grid, target);
    }

    /// Regenerate the map unless locked. Returns whether it ran.
    pub fn regenerate(&mut self) -> bool {
        if self.config.map_locked {
            log::debug!("Map locked, ignoring regenerate");
            return false;
        }
        let (width, height) = mapgen::grid_size_for(&self.render);
        self.grid = mapgen::generate(width, height, &self.config, &mut self.rng);
        self.respawn();
        true
    }

    /// Switch between random and clustered maps unless locked
    pub fn toggle_style(&mut self) -> bool {
        if self.config.map_locked {
            log::debug!("Map locked, ignoring style toggle");
            return false;
        }
        self.config = self.config.with_style_toggled();
        self.regenerate()
    }

    pub fn toggle_lock(&mut self) {
        self.config = self.config.with_lock_toggled();
        log::debug!("Map lock: {}", self.config.map_locked);
    }

    pub fn toggle_view(&mut self) {
        self.player.view_mode = self.player.view_mode.toggled();
        log::debug!("View mode: {}", self.player.view_mode.as_str());
    }

    /// Adopt a new viewport, regenerating a map that covers it
    pub fn resize(&mut self, width: u32, height: u32) {
        self.render = RenderConfig {
            viewport_width: width,
            viewport_height: height,
        };
        log::info!("Viewport resized to {width}x{height}");
        let (cols, rows) = mapgen::grid_size_for(&self.render);
        if self.config.map_locked {
            // Locked maps keep their tiles; only the view changes
            if (cols, rows) == (self.grid.width(), self.grid.height()) {
                return;
            }
            log::warn!("Resize changes grid size, regenerating despite lock");
        }
        self.grid = mapgen::generate(cols, rows, &self.config, &mut self.rng);
        self.respawn();
    }
}
