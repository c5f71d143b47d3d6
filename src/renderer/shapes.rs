//! Draw commands for 2D primitives

use glam::Vec2;

use crate::color::Rgb;

/// Neon glow (canvas shadow) around a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgb,
    pub blur: f32,
}

impl Glow {
    pub const fn new(color: Rgb, blur: f32) -> Self {
        Self { color, blur }
    }
}

/// One primitive for a drawing surface. Coordinates are playfield pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Rgb,
        alpha: f32,
        glow: Option<Glow>,
    },
    StrokeRect {
        pos: Vec2,
        size: Vec2,
        color: Rgb,
        line_width: f32,
        glow: Option<Glow>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgb,
        alpha: f32,
        width: f32,
        glow: Option<Glow>,
    },
    Triangle {
        points: [Vec2; 3],
        color: Rgb,
        glow: Option<Glow>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
        glow: Option<Glow>,
    },
    Text {
        text: String,
        center: Vec2,
        size_px: f32,
        color: Rgb,
        alpha: f32,
    },
}

/// Upward-pointing triangle filling a box
pub fn spike_points(pos: Vec2, size: Vec2) -> [Vec2; 3] {
    [
        Vec2::new(pos.x, pos.y + size.y),
        Vec2::new(pos.x + size.x * 0.5, pos.y),
        Vec2::new(pos.x + size.x, pos.y + size.y),
    ]
}

/// Box grown by `grow` pixels on each axis, keeping its center
pub fn grown_about_center(pos: Vec2, size: Vec2, grow: f32) -> (Vec2, Vec2) {
    (pos - Vec2::splat(grow * 0.5), size + Vec2::splat(grow))
}

/// Positions of evenly spaced lines scrolling left by `offset`, covering `[0, extent]`
pub fn scrolling_lines(offset: f32, spacing: f32, extent: f32) -> Vec<f32> {
    if spacing <= 0.0 {
        return Vec::new();
    }
    let shift = offset.rem_euclid(spacing);
    let mut lines = Vec::new();
    let mut x = -shift;
    while x <= extent {
        if x >= 0.0 {
            lines.push(x);
        }
        x += spacing;
    }
    lines
}
