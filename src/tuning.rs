//! Data-driven game balance
//!
//! Every physics and pacing constant the simulation reads lives in [`Tuning`].
//! The defaults reproduce the classic feel; a host can override any subset
//! by passing JSON, e.g. `{"ship_max_speed": 10.0}`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gameplay constants (per-tick units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Collision radius of the ship, also the distance from centre to nose
    pub ship_radius: f32,
    /// Velocity added per tick while thrusting
    pub ship_acceleration: f32,
    /// Speed cap applied after thrust
    pub ship_max_speed: f32,
    /// Velocity multiplier applied every tick
    pub ship_friction: f32,
    /// Heading change per tick while a rotate control is held (radians)
    pub rotation_speed: f32,

    // === Bullets ===
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    /// Ticks a bullet survives
    pub bullet_lifetime: u32,

    // === Pacing ===
    pub starting_lives: u32,
    /// Large asteroids in every wave before the score bonus
    pub wave_base_count: u32,
    /// One extra asteroid per this many points
    pub score_per_bonus_asteroid: u64,
    /// Half-width of the square kept clear of fresh asteroids
    pub spawn_exclusion_half_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_radius: 10.0,
            ship_acceleration: 0.3,
            ship_max_speed: 8.0,
            ship_friction: 0.98,
            rotation_speed: 0.15,

            bullet_radius: 2.0,
            bullet_speed: 8.0,
            bullet_lifetime: 60,

            starting_lives: 3,
            wave_base_count: 5,
            score_per_bonus_asteroid: 10_000,
            spawn_exclusion_half_width: 100.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning overrides; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Tuning from optional JSON, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Reject values the simulation's invariants cannot hold under
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("ship_radius", self.ship_radius)?;
        positive("ship_acceleration", self.ship_acceleration)?;
        positive("ship_max_speed", self.ship_max_speed)?;
        positive("rotation_speed", self.rotation_speed)?;
        positive("bullet_radius", self.bullet_radius)?;
        positive("bullet_speed", self.bullet_speed)?;

        // The exclusion square must leave room to place an asteroid
        positive("spawn_exclusion_half_width", self.spawn_exclusion_half_width)?;
        let max_half_width = crate::consts::ARENA_WIDTH.min(crate::consts::ARENA_HEIGHT) / 2.0;
        if self.spawn_exclusion_half_width >= max_half_width {
            return Err(ConfigError::Invalid {
                field: "spawn_exclusion_half_width",
                reason: "exclusion zone would cover the whole arena",
            });
        }

        if !(self.ship_friction > 0.0 && self.ship_friction <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "ship_friction",
                reason: "must be in (0, 1]",
            });
        }
        if self.bullet_lifetime == 0 {
            return Err(ConfigError::Invalid {
                field: "bullet_lifetime",
                reason: "must be at least one tick",
            });
        }
        if self.wave_base_count == 0 {
            return Err(ConfigError::Invalid {
                field: "wave_base_count",
                reason: "a wave needs at least one asteroid",
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        if self.score_per_bonus_asteroid == 0 {
            return Err(ConfigError::Invalid {
                field: "score_per_bonus_asteroid",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }

    /// Number of large asteroids in a wave spawned at `score`
    pub fn wave_size(&self, score: u64) -> usize {
        let bonus = score / self.score_per_bonus_asteroid;
        self.wave_base_count as usize + bonus as usize
    }
}
