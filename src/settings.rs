//! World and render configuration
//!
//! Config values are immutable once handed to the world; toggles build a
//! new value instead of flipping shared flags.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH};

/// Map generation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MapStyle {
    /// Independent random fill
    Random,
    /// Random fill smoothed into forest clusters
    #[default]
    Clustered,
}

impl MapStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapStyle::Random => "Random",
            MapStyle::Clustered => "Clustered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random" => Some(MapStyle::Random),
            "clustered" | "cluster" => Some(MapStyle::Clustered),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            MapStyle::Random => MapStyle::Clustered,
            MapStyle::Clustered => MapStyle::Random,
        }
    }
}

/// Parameters for map generation and regeneration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the generator RNG
    pub seed: u64,
    pub style: MapStyle,
    /// Ignore regenerate/style requests while set
    pub map_locked: bool,
    /// Probability that a cell starts as a tree
    pub tree_density: f32,
    /// Cellular automaton rounds for the clustered style
    pub forest_iterations: u32,
    /// Probability that an empty cell holds an item
    pub item_spawn_chance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0x6d79_7374_6963,
            style: MapStyle::Clustered,
            map_locked: false,
            tree_density: 0.35,
            forest_iterations: 2,
            item_spawn_chance: 0.02,
        }
    }
}

impl WorldConfig {
    pub fn with_style_toggled(self) -> Self {
        Self {
            style: self.style.toggled(),
            ..self
        }
    }

    pub fn with_lock_toggled(self) -> Self {
        Self {
            map_locked: !self.map_locked,
            ..self
        }
    }
}

/// Viewport the perspective view is projected onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport_width: INITIAL_WINDOW_WIDTH,
            viewport_height: INITIAL_WINDOW_HEIGHT,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldConfig,
    pub render: RenderConfig,
}

impl Settings {
    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Invalid settings ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(err) => {
                log::warn!("Could not read {} ({err}), using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
