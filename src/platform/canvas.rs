//! HTML canvas drawing surface

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::SurfaceError;
use crate::renderer::palette::Color;
use crate::renderer::{DrawCommand, Paint, Surface, TextAlign};

/// 2D context of the game canvas
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    /// Find the canvas by element id and take its 2d context
    pub fn lookup(id: &str) -> Result<Self, SurfaceError> {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| SurfaceError::MissingElement(id.to_string()))?;

        let canvas: HtmlCanvasElement = element
            .dyn_into()
            .map_err(|_| SurfaceError::NotACanvas(id.to_string()))?;

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| SurfaceError::NoContext(id.to_string()))?;

        Ok(Self { ctx })
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_string()),
            Paint::Linear { .. } => {
                let gradient = self.linear_gradient(paint);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }

    fn set_stroke(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.to_string()),
            Paint::Linear { .. } => {
                let gradient = self.linear_gradient(paint);
                self.ctx.set_stroke_style_canvas_gradient(&gradient);
            }
        }
    }

    fn linear_gradient(&self, paint: &Paint) -> web_sys::CanvasGradient {
        let (from, to, start, end) = match paint {
            Paint::Linear {
                from,
                to,
                start,
                end,
            } => (*from, *to, *start, *end),
            Paint::Solid(color) => (Vec2::ZERO, Vec2::X, *color, *color),
        };
        let gradient = self
            .ctx
            .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
        let _ = gradient.add_color_stop(0.0, &start.to_string());
        let _ = gradient.add_color_stop(1.0, &end.to_string());
        gradient
    }

    fn glow(&self, center: Vec2, radius: f32, color: Color) -> Result<(), JsValue> {
        let (x, y) = (center.x as f64, center.y as f64);
        let gradient = self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, radius as f64)?;
        gradient.add_color_stop(0.0, &color.to_string())?;
        gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_string())?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius as f64, 0.0, std::f64::consts::TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn try_draw(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::FillRect {
                origin,
                size,
                paint,
            } => {
                self.set_fill(paint);
                ctx.fill_rect(
                    origin.x as f64,
                    origin.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(&color.to_string());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Path {
                points,
                closed,
                stroke,
                width,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                self.set_stroke(stroke);
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                if *closed {
                    ctx.close_path();
                }
                ctx.stroke();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.fill();
            }
            DrawCommand::Glow {
                center,
                radius,
                color,
            } => self.glow(*center, *radius, *color)?,
            DrawCommand::Text {
                pos,
                text,
                size,
                align,
                paint,
            } => {
                self.set_fill(paint);
                ctx.set_font(&format!("{}px monospace", size));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}

impl Surface for Canvas2d {
    fn draw(&mut self, command: &DrawCommand) {
        if let Err(e) = self.try_draw(command) {
            log::warn!("Canvas draw failed: {:?}", e);
        }
    }
}
