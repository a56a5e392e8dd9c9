//! Game state and core simulation types
//!
//! Everything the simulation reads or writes between ticks lives in
//! [`GameState`]. The RNG is deliberately not part of it; the driver owns the
//! generator and lends it to each tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawn::spawn_wave;
use crate::arena_center;
use crate::heading_vector;
use crate::tuning::Tuning;

/// Asteroid size class; radius and score come only from this
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(&self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 25.0,
            AsteroidSize::Small => 15.0,
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            AsteroidSize::Large => 100,
            AsteroidSize::Medium => 200,
            AsteroidSize::Small => 400,
        }
    }

    /// Size of the fragments left behind, if any
    pub fn fragment(&self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading (radians, 0 = facing +x)
    pub angle: f32,
    pub vel: Vec2,
    /// Thrust was held this tick (drives the flame visual)
    pub thrusting: bool,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: arena_center(),
            angle: 0.0,
            vel: Vec2::ZERO,
            thrusting: false,
        }
    }
}

impl Ship {
    #[inline]
    pub fn heading(&self) -> Vec2 {
        heading_vector(self.angle)
    }

    /// Point at the tip of the ship, where bullets leave from
    pub fn nose(&self, ship_radius: f32) -> Vec2 {
        self.pos + self.heading() * ship_radius
    }
}

/// A projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before the bullet expires
    pub life: u32,
}

impl Bullet {
    /// Bullet leaving the ship's nose, carrying the ship's momentum
    pub fn fired_from(ship: &Ship, tuning: &Tuning) -> Self {
        Self {
            pos: ship.nose(tuning.ship_radius),
            vel: ship.heading() * tuning.bullet_speed + ship.vel,
            life: tuning.bullet_lifetime,
        }
    }
}

/// An asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cosmetic rotation (radians)
    pub angle: f32,
    /// Rotation per tick (radians)
    pub spin: f32,
    pub size: AsteroidSize,
}

impl Asteroid {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.size.score()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ship: Ship,
    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
    /// Live asteroids, in spawn order
    pub asteroids: Vec<Asteroid>,
    pub score: u64,
    pub lives: u32,
    /// Game over; the simulation no longer advances
    pub terminal: bool,
    /// Waves spawned so far (1 after the opening wave)
    pub wave: u32,
    /// Ticks simulated since the run began
    pub time_ticks: u64,
}

impl GameState {
    /// A fresh run: ship at the centre, opening wave kept clear of it
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let mut state = Self::empty(tuning);
        state.asteroids = spawn_wave(tuning.wave_size(0), arena_center(), tuning, rng);
        state.wave = 1;
        log::info!("Opening wave: {} asteroids", state.asteroids.len());
        state
    }

    /// Starting values with no asteroids at all
    pub fn empty(tuning: &Tuning) -> Self {
        Self {
            ship: Ship::default(),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            score: 0,
            lives: tuning.starting_lives,
            terminal: false,
            wave: 0,
            time_ticks: 0,
        }
    }

    /// Iterate every entity position (ship, bullets, asteroids)
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        std::iter::once(self.ship.pos)
            .chain(self.bullets.iter().map(|b| b.pos))
            .chain(self.asteroids.iter().map(|a| a.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_size_table() {
        assert_eq!(AsteroidSize::Large.radius(), 40.0);
        assert_eq!(AsteroidSize::Medium.radius(), 25.0);
        assert_eq!(AsteroidSize::Small.radius(), 15.0);

        assert_eq!(AsteroidSize::Large.score(), 100);
        assert_eq!(AsteroidSize::Medium.score(), 200);
        assert_eq!(AsteroidSize::Small.score(), 400);

        assert_eq!(AsteroidSize::Large.fragment(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.fragment(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.fragment(), None);
    }

    #[test]
    fn test_new_game() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let state = GameState::new(&tuning, &mut rng);

        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.angle, 0.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(!state.terminal);
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 5);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
    }

    #[test]
    fn test_bullet_fired_from_ship() {
        let tuning = Tuning::default();
        let ship = Ship {
            vel: Vec2::new(1.0, -0.5),
            ..Ship::default()
        };
        let bullet = Bullet::fired_from(&ship, &tuning);

        assert!((bullet.pos - Vec2::new(410.0, 300.0)).length() < 1e-4);
        assert!((bullet.vel - Vec2::new(9.0, -0.5)).length() < 1e-4);
        assert_eq!(bullet.life, 60);
    }

    #[test]
    fn test_state_serializes() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let state = GameState::new(&tuning, &mut rng);

        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.asteroids.len(), state.asteroids.len());
        assert_eq!(back.lives, state.lives);
    }
}
