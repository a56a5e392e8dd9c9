//! Shape generation for 2D primitives
//!
//! Outlines are built in local space (origin at the entity centre, facing +x)
//! and then placed in the arena with [`place`].

use glam::Vec2;
use std::f32::consts::TAU;

use crate::polar_to_cartesian;

/// Ship hull: nose, left wing, tail notch, right wing
pub fn ship_hull(size: f32) -> [Vec2; 4] {
    [
        Vec2::new(size, 0.0),
        Vec2::new(-size, -size / 2.0),
        Vec2::new(-size / 2.0, 0.0),
        Vec2::new(-size, size / 2.0),
    ]
}

/// Exhaust flame behind the ship (open polyline)
pub fn thrust_flame(size: f32) -> [Vec2; 3] {
    [
        Vec2::new(-size, -size / 3.0),
        Vec2::new(-size * 1.5, 0.0),
        Vec2::new(-size, size / 3.0),
    ]
}

/// Irregular rock outline: `sides` vertices with the radius modulated by
/// `0.8 + 0.2·sin(3θ)`
pub fn asteroid_outline(radius: f32, sides: u32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let theta = (i as f32 / sides as f32) * TAU;
            let r = radius * (0.8 + (theta * 3.0).sin() * 0.2);
            polar_to_cartesian(r, theta)
        })
        .collect()
}

/// Rotate local points by `angle` and translate them to `origin`
pub fn place(points: &[Vec2], origin: Vec2, angle: f32) -> Vec<Vec2> {
    let rotation = Vec2::from_angle(angle);
    points.iter().map(|p| origin + rotation.rotate(*p)).collect()
}

/// Transform a single local point
#[inline]
pub fn place_point(point: Vec2, origin: Vec2, angle: f32) -> Vec2 {
    origin + Vec2::from_angle(angle).rotate(point)
}

/// Vertical and horizontal grid lines covering `width` × `height`
pub fn grid_lines(width: f32, height: f32, spacing: f32) -> Vec<(Vec2, Vec2)> {
    let columns = (width / spacing).ceil() as u32;
    let rows = (height / spacing).ceil() as u32;

    let vertical = (0..columns).map(|i| {
        let x = i as f32 * spacing;
        (Vec2::new(x, 0.0), Vec2::new(x, height))
    });
    let horizontal = (0..rows).map(|i| {
        let y = i as f32 * spacing;
        (Vec2::new(0.0, y), Vec2::new(width, y))
    });

    vertical.chain(horizontal).collect()
}
