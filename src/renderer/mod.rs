//! Rendering module
//!
//! Rendering is split in two. [`Renderer::render`] is a pure projection of a
//! [`GameState`] into a [`Frame`] of draw commands; it never touches the
//! state and does no game logic. A [`Surface`] then executes those commands
//! (a browser canvas in production, a recorder in tests).

pub mod palette;
pub mod shapes;

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, ASTEROID_SIDES, GRID_SPACING};
use crate::input::Control;
use crate::settings::{QualityPreset, Settings};
use crate::sim::{Asteroid, Bullet, GameState, Ship};
use crate::tuning::Tuning;
use palette::Color;

/// Fill or stroke style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient between two arena points
    Linear {
        from: Vec2,
        to: Vec2,
        start: Color,
        end: Color,
    },
}

impl Paint {
    fn linear(from: Vec2, to: Vec2, start: Color, end: Color) -> Self {
        Paint::Linear {
            from,
            to,
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A single drawing operation in arena coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Vec2,
        size: Vec2,
        paint: Paint,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    /// Stroked polyline, optionally closed into a polygon
    Path {
        points: Vec<Vec2>,
        closed: bool,
        stroke: Paint,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Radial falloff from `color` at the centre to transparent at `radius`
    Glow {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        /// Font size in pixels (monospace)
        size: f32,
        align: TextAlign,
        paint: Paint,
    },
}

/// All draw commands for one frame, in painter's order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Something draw commands can be executed on
pub trait Surface {
    fn draw(&mut self, command: &DrawCommand);
}

/// Execute a frame on the surface, if there is one
///
/// A missing surface (canvas not mounted yet) skips the frame. Returns
/// whether anything was drawn.
pub fn present<S: Surface + ?Sized>(frame: &Frame, surface: Option<&mut S>) -> bool {
    let Some(surface) = surface else {
        log::trace!("No drawing surface, skipping {} commands", frame.len());
        return false;
    };
    for command in &frame.commands {
        surface.draw(command);
    }
    true
}

/// Surface that keeps every command it is given
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }
}

/// Turns game state into frames
#[derive(Debug, Clone)]
pub struct Renderer {
    quality: QualityPreset,
    show_hud: bool,
    ship_size: f32,
    bullet_size: f32,
    restart_hint: String,
    grid: Vec<(Vec2, Vec2)>,
}

impl Renderer {
    pub fn new(settings: &Settings, tuning: &Tuning) -> Self {
        let restart_key = settings
            .bindings
            .key_label(Control::Restart)
            .unwrap_or("R");
        Self {
            quality: settings.quality,
            show_hud: settings.show_hud,
            ship_size: tuning.ship_radius,
            bullet_size: tuning.bullet_radius,
            restart_hint: format!("Press {} to restart", restart_key),
            grid: shapes::grid_lines(ARENA_WIDTH, ARENA_HEIGHT, GRID_SPACING),
        }
    }

    /// Project the state into draw commands
    pub fn render(&self, state: &GameState) -> Frame {
        let mut frame = Frame::default();

        self.draw_background(&mut frame);
        self.draw_ship(&mut frame, &state.ship);
        for bullet in &state.bullets {
            self.draw_bullet(&mut frame, bullet);
        }
        for asteroid in &state.asteroids {
            self.draw_asteroid(&mut frame, asteroid);
        }
        if self.show_hud {
            self.draw_hud(&mut frame, state);
        }
        if state.terminal {
            self.draw_game_over(&mut frame, state.score);
        }

        frame
    }

    fn draw_background(&self, frame: &mut Frame) {
        frame.push(DrawCommand::FillRect {
            origin: Vec2::ZERO,
            size: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            paint: Paint::linear(
                Vec2::ZERO,
                Vec2::new(0.0, ARENA_HEIGHT),
                palette::BACKGROUND_TOP,
                palette::BACKGROUND_BOTTOM,
            ),
        });

        if self.quality.grid_enabled() {
            for &(from, to) in &self.grid {
                frame.push(DrawCommand::Line {
                    from,
                    to,
                    color: palette::GRID,
                    width: 1.0,
                });
            }
        }
    }

    fn draw_ship(&self, frame: &mut Frame, ship: &Ship) {
        let size = self.ship_size;
        let glow = self.quality.glow_enabled();

        if glow {
            frame.push(DrawCommand::Glow {
                center: ship.pos,
                radius: size * 2.0,
                color: palette::SHIP_GLOW,
            });
        }

        frame.push(DrawCommand::Path {
            points: shapes::place(&shapes::ship_hull(size), ship.pos, ship.angle),
            closed: true,
            stroke: Paint::linear(
                shapes::place_point(Vec2::new(-size, -size / 2.0), ship.pos, ship.angle),
                shapes::place_point(Vec2::new(size, size / 2.0), ship.pos, ship.angle),
                palette::PURPLE,
                palette::BLUE,
            ),
            width: 2.0,
        });

        if ship.thrusting {
            let flame = shapes::thrust_flame(size);
            if glow {
                frame.push(DrawCommand::Glow {
                    center: shapes::place_point(flame[1], ship.pos, ship.angle),
                    radius: size,
                    color: palette::FLAME_GLOW,
                });
            }
            frame.push(DrawCommand::Path {
                points: shapes::place(&flame, ship.pos, ship.angle),
                closed: false,
                stroke: Paint::linear(
                    shapes::place_point(flame[0], ship.pos, ship.angle),
                    shapes::place_point(flame[1], ship.pos, ship.angle),
                    palette::ORANGE,
                    palette::AMBER,
                ),
                width: 2.0,
            });
        }
    }

    fn draw_bullet(&self, frame: &mut Frame, bullet: &Bullet) {
        if self.quality.glow_enabled() {
            frame.push(DrawCommand::Glow {
                center: bullet.pos,
                radius: self.bullet_size * 2.0,
                color: palette::BULLET_GLOW,
            });
        }
        frame.push(DrawCommand::Circle {
            center: bullet.pos,
            radius: self.bullet_size,
            color: palette::BLUE,
        });
    }

    fn draw_asteroid(&self, frame: &mut Frame, asteroid: &Asteroid) {
        let radius = asteroid.radius();

        if self.quality.glow_enabled() {
            frame.push(DrawCommand::Glow {
                center: asteroid.pos,
                radius: radius * 1.2,
                color: palette::ASTEROID_GLOW,
            });
        }

        let outline = shapes::asteroid_outline(radius, ASTEROID_SIDES);
        frame.push(DrawCommand::Path {
            points: shapes::place(&outline, asteroid.pos, asteroid.angle),
            closed: true,
            stroke: Paint::linear(
                shapes::place_point(Vec2::splat(-radius), asteroid.pos, asteroid.angle),
                shapes::place_point(Vec2::splat(radius), asteroid.pos, asteroid.angle),
                palette::PURPLE,
                palette::BLUE,
            ),
            width: 2.0,
        });
    }

    fn draw_hud(&self, frame: &mut Frame, state: &GameState) {
        let paint = Paint::linear(
            Vec2::new(20.0, 20.0),
            Vec2::new(200.0, 60.0),
            palette::PURPLE,
            palette::BLUE,
        );
        let lines = [
            (Vec2::new(20.0, 30.0), format!("Score: {}", state.score)),
            (Vec2::new(20.0, 60.0), format!("Lives: {}", state.lives)),
        ];
        for (pos, text) in lines {
            frame.push(DrawCommand::Text {
                pos,
                text,
                size: 20.0,
                align: TextAlign::Left,
                paint: paint.clone(),
            });
        }
    }

    fn draw_game_over(&self, frame: &mut Frame, score: u64) {
        frame.push(DrawCommand::FillRect {
            origin: Vec2::ZERO,
            size: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            paint: Paint::Solid(palette::OVERLAY),
        });

        let center = crate::arena_center();
        let paint = Paint::linear(
            center - Vec2::new(100.0, 50.0),
            center + Vec2::new(100.0, 50.0),
            palette::PURPLE,
            palette::BLUE,
        );
        let lines = [
            (-50.0, 48.0, "GAME OVER".to_string()),
            (0.0, 24.0, format!("Final Score: {}", score)),
            (50.0, 24.0, self.restart_hint.clone()),
        ];
        for (dy, size, text) in lines {
            frame.push(DrawCommand::Text {
                pos: center + Vec2::new(0.0, dy),
                text,
                size,
                align: TextAlign::Center,
                paint: paint.clone(),
            });
        }
    }
}
