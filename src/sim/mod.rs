//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed tick per call
//! - Randomness only from the generator passed in
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, wrap_position};
pub use spawn::{fragments, spawn_wave};
pub use state::{Asteroid, AsteroidSize, Bullet, GameState, Ship};
pub use tick::{advance, tick};
