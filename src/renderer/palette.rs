//! Colors for game elements

use std::fmt;

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color, different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Formats as a CSS color string
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

pub const BACKGROUND_TOP: Color = Color::rgb(0x1a, 0x1a, 0x2e);
pub const BACKGROUND_BOTTOM: Color = Color::rgb(0x16, 0x21, 0x3e);
pub const GRID: Color = Color::rgba(255, 255, 255, 0.05);

pub const PURPLE: Color = Color::rgb(0xa8, 0x55, 0xf7);
pub const BLUE: Color = Color::rgb(0x3b, 0x82, 0xf6);
pub const ORANGE: Color = Color::rgb(0xf9, 0x73, 0x16);
pub const AMBER: Color = Color::rgb(0xfb, 0xbf, 0x24);

pub const SHIP_GLOW: Color = PURPLE.with_alpha(0.3);
pub const FLAME_GLOW: Color = ORANGE.with_alpha(0.5);
pub const BULLET_GLOW: Color = BLUE.with_alpha(0.5);
pub const ASTEROID_GLOW: Color = PURPLE.with_alpha(0.2);

pub const OVERLAY: Color = Color::rgba(0x1a, 0x1a, 0x2e, 0.9);
