//! Scene building: game state to draw commands
//!
//! A pure read of the state. The active cosmetic color and the wall-clock time
//! (for the player pulse) come in per frame and are never stored.

use glam::Vec2;

use super::shapes::{DrawCmd, Glow, grown_about_center, scrolling_lines, spike_points};
use crate::color::{Rgb, palette};
use crate::consts::*;
use crate::sim::{GameState, ObstacleKind};

/// Far grid scroll per unit of score (slower than the world)
const FAR_GRID_RATE: f32 = 2.0;
const FAR_GRID_SPACING: f32 = 100.0;
/// Near grid scrolls with the ground
const NEAR_GRID_RATE: f32 = 10.0;
const NEAR_GRID_SPACING: f32 = 50.0;

/// Player pulse amplitude (pixels) and time divisor
const PULSE_PX: f32 = 4.0;
const PULSE_RATE_MS: f64 = 70.0;

/// Dash afterimage offsets behind the player
const AFTERIMAGE_OFFSETS: [f32; 2] = [30.0, 60.0];
const AFTERIMAGE_ALPHA: f32 = 0.4;

const EYE_SIZE: f32 = 7.0;

const BANNER_SIZE_PX: f32 = 60.0;
const BANNER_RAISE: f32 = 50.0;

/// Opacity of the level banner: 1 at the start of a band, 0 once past the fade distance
pub fn level_banner_alpha(score: f64) -> f32 {
    let into_band = score.rem_euclid(DISTANCE_PER_LEVEL);
    if into_band >= LEVEL_BANNER_DISTANCE {
        0.0
    } else {
        (1.0 - into_band / LEVEL_BANNER_DISTANCE) as f32
    }
}

/// Cosmetic growth of the player, in pixels, at `time_ms`
pub fn player_pulse(time_ms: f64) -> f32 {
    (time_ms / PULSE_RATE_MS).sin() as f32 * PULSE_PX
}

/// Build the full frame
pub fn build_scene(state: &GameState, player_color: Rgb, time_ms: f64) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(64 + state.obstacles.len() + state.particles.len());
    let score = state.score as f32;

    // Background wash
    cmds.push(DrawCmd::FillRect {
        pos: Vec2::ZERO,
        size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        color: palette::BACKGROUND,
        alpha: 1.0,
        glow: None,
    });

    // Far grid: full sky, slow
    for x in scrolling_lines(score * FAR_GRID_RATE, FAR_GRID_SPACING, CANVAS_WIDTH) {
        cmds.push(DrawCmd::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, GROUND_Y),
            color: palette::DASH,
            alpha: 0.06,
            width: 1.0,
            glow: None,
        });
    }
    let mut y = FAR_GRID_SPACING;
    while y < GROUND_Y {
        cmds.push(DrawCmd::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(CANVAS_WIDTH, y),
            color: palette::DASH,
            alpha: 0.06,
            width: 1.0,
            glow: None,
        });
        y += FAR_GRID_SPACING;
    }

    // Ground strip and near grid
    cmds.push(DrawCmd::FillRect {
        pos: Vec2::new(0.0, GROUND_Y),
        size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT - GROUND_Y),
        color: palette::GROUND,
        alpha: 1.0,
        glow: None,
    });
    for x in scrolling_lines(score * NEAR_GRID_RATE, NEAR_GRID_SPACING, CANVAS_WIDTH) {
        cmds.push(DrawCmd::Line {
            from: Vec2::new(x, GROUND_Y),
            to: Vec2::new(x, CANVAS_HEIGHT),
            color: palette::PLAYER,
            alpha: 0.15,
            width: 1.0,
            glow: None,
        });
    }
    cmds.push(DrawCmd::Line {
        from: Vec2::new(0.0, GROUND_Y),
        to: Vec2::new(CANVAS_WIDTH, GROUND_Y),
        color: palette::PLAYER,
        alpha: 1.0,
        width: 2.0,
        glow: Some(Glow::new(palette::PLAYER, 10.0)),
    });

    for obstacle in &state.obstacles {
        let glow = Some(Glow::new(obstacle.color, 15.0));
        cmds.push(match obstacle.kind {
            ObstacleKind::Spike => DrawCmd::Triangle {
                points: spike_points(obstacle.pos, obstacle.size),
                color: obstacle.color,
                glow,
            },
            ObstacleKind::Block => DrawCmd::StrokeRect {
                pos: obstacle.pos,
                size: obstacle.size,
                color: obstacle.color,
                line_width: 3.0,
                glow,
            },
            ObstacleKind::Orb => DrawCmd::Circle {
                center: obstacle.pos + obstacle.size * 0.5,
                radius: obstacle.size.x * 0.5,
                color: obstacle.color,
                glow,
            },
        });
    }

    for particle in &state.particles {
        cmds.push(DrawCmd::FillRect {
            pos: particle.pos - Vec2::splat(particle.size * 0.5),
            size: Vec2::splat(particle.size),
            color: particle.color,
            alpha: particle.life.clamp(0.0, 1.0),
            glow: None,
        });
    }

    let player = &state.player;
    let color = if player.dashing {
        palette::DASH
    } else {
        player_color
    };
    let glow = Some(Glow::new(color, if player.dashing { 40.0 } else { 30.0 }));
    if player.dashing {
        for offset in AFTERIMAGE_OFFSETS {
            cmds.push(DrawCmd::FillRect {
                pos: player.pos - Vec2::new(offset, 0.0),
                size: player.size,
                color,
                alpha: AFTERIMAGE_ALPHA,
                glow,
            });
        }
    }
    let (pos, size) = grown_about_center(player.pos, player.size, player_pulse(time_ms));
    cmds.push(DrawCmd::FillRect {
        pos,
        size,
        color,
        alpha: 1.0,
        glow,
    });

    // Eye sits lower while standing, higher in the squashed slide pose
    let eye_drop = if player.sliding { 7.0 } else { 12.0 };
    cmds.push(DrawCmd::FillRect {
        pos: Vec2::new(player.pos.x + player.size.x - 16.0, player.pos.y + eye_drop),
        size: Vec2::splat(EYE_SIZE),
        color: palette::BLACK,
        alpha: 1.0,
        glow: None,
    });

    let banner = level_banner_alpha(state.score);
    if banner > 0.0 {
        cmds.push(DrawCmd::Text {
            text: format!("LEVEL {}", state.settings.level),
            center: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 - BANNER_RAISE),
            size_px: BANNER_SIZE_PX,
            color: palette::WHITE,
            alpha: banner,
        });
    }

    cmds
}
