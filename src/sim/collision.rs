//! Arena topology and collision tests
//!
//! The arena is a torus: leaving one edge re-enters from the opposite one.
//! Everything collides as a circle.

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Wrap a coordinate into `[0, size)`, handling negative values
#[inline]
pub fn wrap_coord(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid of a tiny negative value can round up to exactly `size`
    if wrapped >= size { 0.0 } else { wrapped }
}

/// Wrap a position into the arena
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, ARENA_WIDTH),
        wrap_coord(pos.y, ARENA_HEIGHT),
    )
}

/// Two circles overlap when their centres are closer than the sum of radii
///
/// Distances are measured straight across the arena, not around the wrap.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Check whether `pos` falls inside the axis-aligned square of the given
/// half-width centred on `center` (strictly, on both axes)
#[inline]
pub fn in_exclusion_zone(pos: Vec2, center: Vec2, half_width: f32) -> bool {
    (pos.x - center.x).abs() < half_width && (pos.y - center.y).abs() < half_width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_arena(pos: Vec2) -> bool {
        (0.0..ARENA_WIDTH).contains(&pos.x) && (0.0..ARENA_HEIGHT).contains(&pos.y)
    }

    #[test]
    fn test_wrap_coord() {
        assert_eq!(wrap_coord(10.0, 800.0), 10.0);
        assert_eq!(wrap_coord(800.0, 800.0), 0.0);
        assert_eq!(wrap_coord(805.0, 800.0), 5.0);
        assert_eq!(wrap_coord(-5.0, 800.0), 795.0);
        assert_eq!(wrap_coord(-1605.0, 800.0), 795.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_in_bounds() {
        let wrapped = wrap_coord(-1e-9, 800.0);
        assert!((0.0..800.0).contains(&wrapped));
    }

    #[test]
    fn test_wrap_position() {
        let pos = wrap_position(Vec2::new(-10.0, 610.0));
        assert_eq!(pos, Vec2::new(790.0, 10.0));
        assert!(in_arena(pos));
        assert!(!in_arena(Vec2::new(800.0, 0.0)));
    }

    #[test]
    fn test_circles_overlap() {
        let a = Vec2::new(100.0, 100.0);

        // Bullet (r=2) vs large asteroid (r=40): hit under 42
        assert!(circles_overlap(a, 2.0, Vec2::new(141.0, 100.0), 40.0));
        // Exactly touching is not a hit
        assert!(!circles_overlap(a, 2.0, Vec2::new(142.0, 100.0), 40.0));
        assert!(!circles_overlap(a, 2.0, Vec2::new(200.0, 200.0), 40.0));
    }

    #[test]
    fn test_exclusion_zone() {
        let center = Vec2::new(400.0, 300.0);
        assert!(in_exclusion_zone(Vec2::new(450.0, 350.0), center, 100.0));
        // Outside on one axis is enough to be accepted
        assert!(!in_exclusion_zone(Vec2::new(450.0, 420.0), center, 100.0));
        assert!(!in_exclusion_zone(Vec2::new(500.0, 300.0), center, 100.0));
    }
}
