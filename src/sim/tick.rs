//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one display frame. The steps run in
//! a fixed order; collision checks must see positions moved this tick.

use rand::Rng;

use super::collision::{circles_overlap, wrap_position};
use super::spawn::{fragments, spawn_wave};
use super::state::{Bullet, GameState, Ship};
use crate::input::TickInput;
use crate::tuning::Tuning;

/// Advance the game by one tick, consuming the previous state
///
/// A terminal state is returned untouched whatever the input.
pub fn advance<R: Rng>(
    mut state: GameState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut R,
) -> GameState {
    tick(&mut state, input, tuning, rng);
    state
}

/// Advance the game state by one fixed timestep, in place
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, tuning: &Tuning, rng: &mut R) {
    // Game over freezes everything
    if state.terminal {
        return;
    }

    state.time_ticks += 1;

    steer_ship(&mut state.ship, input, tuning);

    if input.fire {
        state.bullets.push(Bullet::fired_from(&state.ship, tuning));
    }

    move_bullets(state);
    move_asteroids(state);

    resolve_bullet_hits(state, tuning, rng);
    resolve_ship_hit(state, tuning);

    // Wave clear
    if state.asteroids.is_empty() && !state.terminal {
        let count = tuning.wave_size(state.score);
        state.asteroids = spawn_wave(count, state.ship.pos, tuning, rng);
        state.wave += 1;
        log::info!(
            "Wave {} cleared, spawning {} asteroids (score {})",
            state.wave - 1,
            count,
            state.score
        );
    }
}

/// Rotation, thrust, speed cap, friction and integration for the ship
fn steer_ship(ship: &mut Ship, input: &TickInput, tuning: &Tuning) {
    if input.rotate_left {
        ship.angle -= tuning.rotation_speed;
    }
    if input.rotate_right {
        ship.angle += tuning.rotation_speed;
    }

    ship.thrusting = input.thrust;
    if ship.thrusting {
        ship.vel += ship.heading() * tuning.ship_acceleration;

        // Limit max speed, keeping direction
        let speed = ship.vel.length();
        if speed > tuning.ship_max_speed {
            ship.vel *= tuning.ship_max_speed / speed;
        }
    }

    ship.vel *= tuning.ship_friction;

    ship.pos = wrap_position(ship.pos + ship.vel);
}

fn move_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos = wrap_position(bullet.pos + bullet.vel);
        bullet.life = bullet.life.saturating_sub(1);
    }
    state.bullets.retain(|b| b.life > 0);
}

fn move_asteroids(state: &mut GameState) {
    for asteroid in &mut state.asteroids {
        asteroid.pos = wrap_position(asteroid.pos + asteroid.vel);
        asteroid.angle += asteroid.spin;
    }
}

/// Each bullet destroys at most one asteroid
///
/// Asteroids are scanned newest first, so fragments spawned by an earlier
/// bullet this tick are the first thing a later bullet can hit.
fn resolve_bullet_hits<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R) {
    let bullets = std::mem::take(&mut state.bullets);
    let mut remaining = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        let hit = state.asteroids.iter().rposition(|asteroid| {
            circles_overlap(bullet.pos, tuning.bullet_radius, asteroid.pos, asteroid.radius())
        });

        match hit {
            Some(index) => {
                let destroyed = state.asteroids.remove(index);
                state.score += destroyed.score();
                let pieces = fragments(&destroyed, rng);
                log::debug!(
                    "{:?} asteroid destroyed at ({:.0}, {:.0}), +{} ({} fragments)",
                    destroyed.size,
                    destroyed.pos.x,
                    destroyed.pos.y,
                    destroyed.score(),
                    pieces.len()
                );
                state.asteroids.extend(pieces);
            }
            None => remaining.push(bullet),
        }
    }

    state.bullets = remaining;
}

/// At most one ship collision is processed per tick
fn resolve_ship_hit(state: &mut GameState, tuning: &Tuning) {
    let ship_pos = state.ship.pos;
    let hit = state
        .asteroids
        .iter()
        .any(|a| circles_overlap(ship_pos, tuning.ship_radius, a.pos, a.radius()));
    if !hit {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.terminal = true;
        log::info!("Game over: final score {}", state.score);
    } else {
        state.ship = Ship::default();
        log::debug!("Ship destroyed, {} lives left", state.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, AsteroidSize};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock(x: f32, y: f32, size: AsteroidSize) -> Asteroid {
        Asteroid {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            angle: 0.0,
            spin: 0.0,
            size,
        }
    }

    fn ship_speed(state: &GameState) -> f32 {
        state.ship.vel.length()
    }

    fn ship_is_reset(state: &GameState) -> bool {
        state.ship.pos == crate::arena_center() && state.ship.vel == Vec2::ZERO
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    /// Empty field plus one far-away asteroid so the wave never clears
    fn quiet_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::empty(tuning);
        state.asteroids.push(rock(50.0, 50.0, AsteroidSize::Small));
        state
    }

    #[test]
    fn test_fire_spawns_bullet_at_nose() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let state = advance(quiet_state(&tuning), &fire(), &tuning, &mut rng);

        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        // Spawned at (410, 300), then moved one tick at (8, 0)
        assert!((bullet.vel - Vec2::new(8.0, 0.0)).length() < 1e-4);
        assert!((bullet.pos - Vec2::new(418.0, 300.0)).length() < 1e-3);
        assert_eq!(bullet.life, 59);
    }

    #[test]
    fn test_bullet_inherits_ship_velocity() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = quiet_state(&tuning);
        state.ship.vel = Vec2::new(0.0, 2.0);

        let state = advance(state, &fire(), &tuning, &mut rng);
        let bullet = &state.bullets[0];
        let ship_vel = Vec2::new(0.0, 2.0 * tuning.ship_friction);
        assert!((bullet.vel - (Vec2::new(8.0, 0.0) + ship_vel)).length() < 1e-4);
    }

    #[test]
    fn test_bullet_expires() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = advance(quiet_state(&tuning), &fire(), &tuning, &mut rng);
        // Steer the bullet clear of the parked asteroid
        state.bullets[0].vel = Vec2::new(0.0, 1.0);

        for _ in 0..58 {
            state = advance(state, &TickInput::default(), &tuning, &mut rng);
        }
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].life, 1);

        state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_rotation() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let left = TickInput {
            rotate_left: true,
            ..Default::default()
        };
        let both = TickInput {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };

        let state = advance(quiet_state(&tuning), &left, &tuning, &mut rng);
        assert!((state.ship.angle + 0.15).abs() < 1e-6);

        let state = advance(state, &both, &tuning, &mut rng);
        assert!((state.ship.angle + 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_thrust_and_friction() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };

        let state = advance(quiet_state(&tuning), &thrust, &tuning, &mut rng);
        assert!(state.ship.thrusting);
        assert!((state.ship.vel.x - 0.3 * 0.98).abs() < 1e-6);
        assert!((state.ship.pos.x - (400.0 + 0.3 * 0.98)).abs() < 1e-4);

        let coasting = advance(state.clone(), &TickInput::default(), &tuning, &mut rng);
        assert!(!coasting.ship.thrusting);
        assert!((coasting.ship.vel.x - state.ship.vel.x * 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_speed_cap_preserves_direction() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = quiet_state(&tuning);
        state.ship.angle = 1.0;
        state.ship.vel = Vec2::new(0.0, 20.0);
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };

        let expected_dir = (Vec2::new(0.0, 20.0) + crate::heading_vector(1.0) * 0.3).normalize();
        let state = advance(state, &thrust, &tuning, &mut rng);
        assert!((ship_speed(&state) - 8.0 * 0.98).abs() < 1e-4);
        assert!((state.ship.vel.normalize() - expected_dir).length() < 1e-5);
    }

    #[test]
    fn test_ship_wraps() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = quiet_state(&tuning);
        state.ship.pos = Vec2::new(799.0, 1.0);
        state.ship.vel = Vec2::new(5.0, -5.0);

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert!((state.ship.pos.x - (799.0 + 5.0 * 0.98 - 800.0)).abs() < 1e-3);
        assert!((state.ship.pos.y - (1.0 - 5.0 * 0.98 + 600.0)).abs() < 1e-3);
    }

    #[test]
    fn test_asteroid_drift_and_spin() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::empty(&tuning);
        state.asteroids.push(Asteroid {
            vel: Vec2::new(-3.0, 1.0),
            spin: 0.04,
            ..rock(1.0, 50.0, AsteroidSize::Large)
        });

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        let a = &state.asteroids[0];
        assert!((a.pos - Vec2::new(798.0, 51.0)).length() < 1e-3);
        assert!((a.angle - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_bullet_splits_large_asteroid() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = quiet_state(&tuning);
        state.asteroids.push(rock(700.0, 100.0, AsteroidSize::Large));
        state.bullets.push(Bullet {
            pos: Vec2::new(700.0, 130.0),
            vel: Vec2::ZERO,
            life: 30,
        });

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert_eq!(state.score, 100);
        assert!(state.bullets.is_empty());
        // Small bystander plus two medium fragments
        assert_eq!(state.asteroids.len(), 3);
        let mediums: Vec<_> = state
            .asteroids
            .iter()
            .filter(|a| a.size == AsteroidSize::Medium)
            .collect();
        assert_eq!(mediums.len(), 2);
        assert!(mediums.iter().all(|a| a.pos == Vec2::new(700.0, 100.0)));
    }

    #[test]
    fn test_small_asteroid_leaves_nothing() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = quiet_state(&tuning);
        state.asteroids.push(rock(700.0, 500.0, AsteroidSize::Small));
        state.bullets.push(Bullet {
            pos: Vec2::new(705.0, 500.0),
            vel: Vec2::ZERO,
            life: 30,
        });

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert_eq!(state.score, 400);
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_bullet_hits_only_one_asteroid() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = quiet_state(&tuning);
        state.asteroids.push(rock(600.0, 400.0, AsteroidSize::Small));
        state.asteroids.push(rock(610.0, 400.0, AsteroidSize::Small));
        state.bullets.push(Bullet {
            pos: Vec2::new(605.0, 400.0),
            vel: Vec2::ZERO,
            life: 30,
        });

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert_eq!(state.score, 400);
        // The newest overlapping asteroid goes first
        assert_eq!(state.asteroids.len(), 2);
        assert_eq!(state.asteroids[1].pos, Vec2::new(600.0, 400.0));
    }

    #[test]
    fn test_second_bullet_can_hit_fragment() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = quiet_state(&tuning);
        state.asteroids.push(rock(600.0, 400.0, AsteroidSize::Medium));
        for _ in 0..2 {
            state.bullets.push(Bullet {
                pos: Vec2::new(600.0, 400.0),
                vel: Vec2::ZERO,
                life: 30,
            });
        }

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 200 + 400);
        // Bystander plus the one surviving small fragment
        assert_eq!(state.asteroids.len(), 2);
    }

    #[test]
    fn test_ship_collision_costs_a_life() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = quiet_state(&tuning);
        state.ship.pos = Vec2::new(200.0, 200.0);
        state.ship.vel = Vec2::new(1.0, 1.0);
        state.ship.angle = 2.0;
        state.asteroids.push(rock(230.0, 200.0, AsteroidSize::Medium));
        state.asteroids.push(rock(170.0, 200.0, AsteroidSize::Medium));

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        // Two overlaps, one life
        assert_eq!(state.lives, 2);
        assert!(!state.terminal);
        assert!(ship_is_reset(&state));
        assert_eq!(state.ship.angle, 0.0);
        // The asteroids are not destroyed by ramming
        assert_eq!(state.asteroids.len(), 3);
    }

    #[test]
    fn test_last_life_ends_game() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = quiet_state(&tuning);
        state.lives = 1;
        state.ship.pos = Vec2::new(200.0, 200.0);
        state.asteroids.push(rock(200.0, 200.0, AsteroidSize::Large));

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert_eq!(state.lives, 0);
        assert!(state.terminal);
        // Ship stays where it died
        assert_eq!(state.ship.pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = GameState::new(&tuning, &mut rng);
        state.terminal = true;
        state.lives = 0;
        state.bullets.push(Bullet {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(3.0, 0.0),
            life: 5,
        });

        let inputs = [
            TickInput::default(),
            fire(),
            TickInput {
                rotate_left: true,
                thrust: true,
                restart: true,
                ..Default::default()
            },
        ];
        let frozen = state.clone();
        for input in &inputs {
            state = advance(state, input, &tuning, &mut rng);
            assert_eq!(state, frozen);
        }
    }

    #[test]
    fn test_wave_clear_spawns_around_ship() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = GameState::empty(&tuning);
        state.ship.pos = Vec2::new(150.0, 450.0);

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert_eq!(state.asteroids.len(), 5);
        assert_eq!(state.wave, 1);
        for a in &state.asteroids {
            assert_eq!(a.size, AsteroidSize::Large);
            assert!(
                (a.pos.x - state.ship.pos.x).abs() >= 100.0
                    || (a.pos.y - state.ship.pos.y).abs() >= 100.0
            );
        }
    }

    #[test]
    fn test_wave_size_grows_with_score() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut state = GameState::empty(&tuning);
        state.score = 23_000;

        let state = advance(state, &TickInput::default(), &tuning, &mut rng);
        assert_eq!(state.asteroids.len(), 7);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs must agree exactly
        let tuning = Tuning::default();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut state1 = GameState::new(&tuning, &mut rng1);
        let mut state2 = GameState::new(&tuning, &mut rng2);

        let inputs = [
            TickInput {
                thrust: true,
                rotate_right: true,
                ..Default::default()
            },
            fire(),
            TickInput::default(),
            fire(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                state1 = advance(state1, input, &tuning, &mut rng1);
                state2 = advance(state2, input, &tuning, &mut rng2);
            }
        }

        assert_eq!(state1, state2);
    }
}
