//! Asteroids Arcade - a canvas Asteroids clone for the browser
//!
//! Core modules:
//! - `input`: Key state sampling and edge detection
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Pure state → draw command projection
//! - `platform`: Browser/native platform abstraction
//! - `game`: Frame driver tying input, simulation and rendering together
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, SurfaceError};
pub use game::GameLoop;
pub use input::{Control, InputSampler, TickInput};
pub use settings::{KeyBindings, QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (logical canvas units)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Spacing of the background grid
    pub const GRID_SPACING: f32 = 40.0;

    /// Number of vertices in an asteroid outline
    pub const ASTEROID_SIDES: u32 = 8;
}

/// Centre of the arena
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

/// Unit vector pointing along `angle` (radians, canvas orientation: +y is down)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
