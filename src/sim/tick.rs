//! Per-frame driver
//!
//! Applies one frame of input to the world and, in first-person mode, runs
//! the ray-cast pipeline. The view mode picks which pipeline runs; nothing
//! else branches on it.

use glam::Vec2;

use super::raycast::cast_rays;
use super::state::{GameState, ViewMode};
use crate::renderer::{PerspectiveFrame, project};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Desired movement, each axis in [-1, 1]
    pub move_delta: Vec2,
    /// Rotation direction: -1 left, 1 right
    pub rotate: i8,
    /// Switch between top-down and first-person
    pub toggle_view: bool,
    /// Regenerate the map (ignored while locked)
    pub regenerate: bool,
    /// Switch random/clustered style (ignored while locked)
    pub toggle_style: bool,
    /// Toggle the map lock
    pub toggle_lock: bool,
    /// New viewport size
    pub resize: Option<(u32, u32)>,
}

/// What the renderer should draw this frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutput {
    /// Blit `GameState::grid` and the player pose directly
    TopDown,
    /// Perspective columns
    FirstPerson(PerspectiveFrame),
}

/// Advance the world by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) -> FrameOutput {
    if let Some((width, height)) = input.resize {
        state.resize(width, height);
    }
    if input.toggle_lock {
        state.toggle_lock();
    }
    if input.toggle_style {
        state.toggle_style();
    } else if input.regenerate {
        state.regenerate();
    }
    if input.toggle_view {
        state.toggle_view();
    }

    state.frame += 1;
    let move_delta = input.move_delta.clamp(Vec2::NEG_ONE, Vec2::ONE);

    match state.player.view_mode {
        ViewMode::TopDown => {
            state.player.move_by(&state.grid, move_delta);
            state.player.pickup_items(&mut state.grid);
            FrameOutput::TopDown
        }
        ViewMode::FirstPerson => {
            let rotate = input.rotate.clamp(-1, 1);
            if rotate != 0 {
                state.player.pose.rotate(f32::from(rotate));
            }
            state.player.move_by(&state.grid, move_delta);
            state.player.pickup_items(&mut state.grid);

            let pose = state.player.pose;
            let rays = cast_rays(&state.grid, pose.center(), pose.angle);
            FrameOutput::FirstPerson(project(&rays, &state.render))
        }
    }
}
