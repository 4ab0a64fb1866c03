//! Mystic Grove entry point
//!
//! There is no window here: the binary drives the world with a scripted
//! walk, logs what happens, and prints a summary of the final frame.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use mystic_grove::renderer::{as_bytes, frame_vertices_ndc};
use mystic_grove::sim::{FrameInput, FrameOutput, GameState, ViewMode, tick};
use mystic_grove::{MapStyle, Settings};

#[derive(Debug, Parser)]
#[command(name = "mystic-grove", about = "Headless Mystic Grove world runner")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Map seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Map style: random or clustered
    #[arg(long, value_parser = parse_style)]
    style: Option<MapStyle>,
    /// Viewport width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Viewport height in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Start in the first-person view
    #[arg(long)]
    first_person: bool,
}

fn parse_style(s: &str) -> Result<MapStyle, String> {
    MapStyle::from_str(s).ok_or_else(|| format!("unknown map style '{s}'"))
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        if let Some(seed) = self.seed {
            settings.world.seed = seed;
        }
        if let Some(style) = self.style {
            settings.world.style = style;
        }
        if let Some(width) = self.width {
            settings.render.viewport_width = width;
        }
        if let Some(height) = self.height {
            settings.render.viewport_height = height;
        }
        settings
    }
}

/// Scripted input: walk forward, turning now and then
fn scripted_input(frame: u64) -> FrameInput {
    let rotate = match frame % 240 {
        0..=29 => 1,
        120..=149 => -1,
        _ => 0,
    };
    FrameInput {
        move_delta: Vec2::new(0.0, -1.0),
        rotate,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let settings = args.settings();

    log::info!(
        "Mystic Grove starting: seed {}, {} map, {}x{} viewport",
        settings.world.seed,
        settings.world.style.as_str(),
        settings.render.viewport_width,
        settings.render.viewport_height
    );

    let mut state = GameState::new(settings);
    if args.first_person {
        state.player.view_mode = ViewMode::FirstPerson;
    }

    let mut last = FrameOutput::TopDown;
    for frame in 0..args.frames {
        last = tick(&mut state, &scripted_input(frame));
    }

    let pose = state.player.pose;
    println!(
        "{} frames, {} view",
        state.frame,
        state.player.view_mode.as_str()
    );
    println!(
        "Map: {}x{}, {} trees, {} items left",
        state.grid.width(),
        state.grid.height(),
        state.grid.wall_count(),
        state.grid.items.len()
    );
    println!(
        "Player at ({:.1}, {:.1}) facing {:.1} degrees",
        pose.pos.x,
        pose.pos.y,
        pose.angle.to_degrees()
    );
    for (kind, count) in &state.player.inventory.items {
        println!("  {}: {}", kind.name(), count);
    }

    if let FrameOutput::FirstPerson(frame) = last {
        let nearest = frame
            .columns
            .iter()
            .map(|c| c.wall.height)
            .fold(0.0f32, f32::max);
        let items = frame.columns.iter().filter(|c| c.item.is_some()).count();
        let vertices = frame_vertices_ndc(&frame);
        println!(
            "Last frame: {} columns, tallest wall {:.0}px, {} item strips, {} vertices ({} bytes)",
            frame.columns.len(),
            nearest,
            items,
            vertices.len(),
            as_bytes(&vertices).len()
        );
    }
}
