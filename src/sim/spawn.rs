//! Asteroid creation
//!
//! Fresh waves are rejection-sampled away from a reference point; fragments
//! appear exactly where their parent died.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::collision::in_exclusion_zone;
use super::state::{Asteroid, AsteroidSize};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::tuning::Tuning;

/// Velocity components are drawn from (-MAX_DRIFT, MAX_DRIFT)
const MAX_DRIFT: f32 = 2.0;
/// Spin is drawn from (-MAX_SPIN, MAX_SPIN) radians per tick
const MAX_SPIN: f32 = 0.05;

/// Create an asteroid at `pos` with random drift and spin
pub fn asteroid_at<R: Rng>(pos: Vec2, size: AsteroidSize, rng: &mut R) -> Asteroid {
    Asteroid {
        pos,
        vel: Vec2::new(
            rng.random_range(-MAX_DRIFT..MAX_DRIFT),
            rng.random_range(-MAX_DRIFT..MAX_DRIFT),
        ),
        angle: rng.random_range(0.0..TAU),
        spin: rng.random_range(-MAX_SPIN..MAX_SPIN),
        size,
    }
}

/// Uniformly random arena position outside the exclusion square around `avoid`
pub fn random_clear_position<R: Rng>(
    avoid: Vec2,
    half_width: f32,
    rng: &mut R,
) -> Vec2 {
    loop {
        let pos = Vec2::new(
            rng.random_range(0.0..ARENA_WIDTH),
            rng.random_range(0.0..ARENA_HEIGHT),
        );
        if !in_exclusion_zone(pos, avoid, half_width) {
            return pos;
        }
    }
}

/// Spawn `count` large asteroids, none inside the exclusion zone around `avoid`
///
/// Only the spawn position is checked; nothing stops an asteroid drifting
/// into the ship afterwards.
pub fn spawn_wave<R: Rng>(
    count: usize,
    avoid: Vec2,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<Asteroid> {
    (0..count)
        .map(|_| {
            let pos = random_clear_position(avoid, tuning.spawn_exclusion_half_width, rng);
            asteroid_at(pos, AsteroidSize::Large, rng)
        })
        .collect()
}

/// The pieces a destroyed asteroid breaks into (two of the next size, or none)
pub fn fragments<R: Rng>(parent: &Asteroid, rng: &mut R) -> Vec<Asteroid> {
    match parent.size.fragment() {
        Some(size) => (0..2).map(|_| asteroid_at(parent.pos, size, rng)).collect(),
        None => Vec::new(),
    }
}
