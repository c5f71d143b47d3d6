//! Canvas 2D backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use super::shapes::{DrawCmd, Glow};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Draws commands onto a `<canvas>` scaled to its backing size
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the 2D context; `None` if the browser refuses one
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    fn set_glow(&self, glow: Option<Glow>) {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_blur(glow.blur as f64);
                self.ctx.set_shadow_color(&glow.color.hex());
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }

    fn draw_one(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::FillRect {
                pos,
                size,
                color,
                alpha,
                glow,
            } => {
                self.set_glow(*glow);
                ctx.set_fill_style_str(&color.css(*alpha));
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::StrokeRect {
                pos,
                size,
                color,
                line_width,
                glow,
            } => {
                self.set_glow(*glow);
                ctx.set_stroke_style_str(&color.hex());
                ctx.set_line_width(*line_width as f64);
                ctx.stroke_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Line {
                from,
                to,
                color,
                alpha,
                width,
                glow,
            } => {
                self.set_glow(*glow);
                ctx.set_stroke_style_str(&color.css(*alpha));
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCmd::Triangle {
                points,
                color,
                glow,
            } => {
                self.set_glow(*glow);
                ctx.set_fill_style_str(&color.hex());
                ctx.begin_path();
                ctx.move_to(points[0].x as f64, points[0].y as f64);
                ctx.line_to(points[1].x as f64, points[1].y as f64);
                ctx.line_to(points[2].x as f64, points[2].y as f64);
                ctx.close_path();
                ctx.fill();
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                glow,
            } => {
                self.set_glow(*glow);
                ctx.set_fill_style_str(&color.hex());
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )
                .ok();
                ctx.fill();
            }
            DrawCmd::Text {
                text,
                center,
                size_px,
                color,
                alpha,
            } => {
                self.set_glow(None);
                ctx.set_font(&format!("900 {}px Orbitron, sans-serif", size_px));
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_fill_style_str(&color.css(*alpha));
                ctx.fill_text(text, center.x as f64, center.y as f64).ok();
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, commands: &[DrawCmd]) {
        if !self.canvas.is_connected() {
            return;
        }
        let sx = self.canvas.width() as f64 / CANVAS_WIDTH as f64;
        let sy = self.canvas.height() as f64 / CANVAS_HEIGHT as f64;
        self.ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0).ok();
        for cmd in commands {
            self.draw_one(cmd);
        }
        self.ctx.set_shadow_blur(0.0);
    }
}
