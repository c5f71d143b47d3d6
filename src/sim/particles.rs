//! Decorative particle bursts
//!
//! Particles never interact with gameplay; they are spawned on notable events
//! and advanced, decayed and culled once per step.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};
use crate::color::{Rgb, palette};
use crate::consts::PARTICLE_DECAY;

/// Direction pattern of a burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spread {
    /// Evenly in every direction
    Radial,
    /// Fanned upward (jump kick-off)
    Upward,
    /// Streaking backward (dash trail)
    Backward,
}

/// Burst recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub spread: Spread,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub color: Rgb,
}

impl Burst {
    pub fn jump() -> Self {
        Self {
            count: 8,
            spread: Spread::Upward,
            min_speed: 1.0,
            max_speed: 3.0,
            min_size: 2.0,
            max_size: 4.0,
            color: palette::WHITE,
        }
    }

    pub fn dash() -> Self {
        Self {
            count: 12,
            spread: Spread::Backward,
            min_speed: 4.0,
            max_speed: 8.0,
            min_size: 2.0,
            max_size: 5.0,
            color: palette::DASH,
        }
    }

    pub fn pickup() -> Self {
        Self {
            count: 20,
            spread: Spread::Radial,
            min_speed: 1.5,
            max_speed: 5.0,
            min_size: 2.0,
            max_size: 5.0,
            color: palette::ORB,
        }
    }

    pub fn level_up() -> Self {
        Self {
            count: 60,
            spread: Spread::Radial,
            min_speed: 2.0,
            max_speed: 10.0,
            min_size: 3.0,
            max_size: 7.0,
            color: palette::WHITE,
        }
    }

    pub fn crash(color: Rgb) -> Self {
        Self {
            count: 30,
            spread: Spread::Radial,
            min_speed: 2.0,
            max_speed: 7.0,
            min_size: 3.0,
            max_size: 6.0,
            color,
        }
    }
}

/// Spawn a burst at `origin`, dropping the oldest particles past the cap
pub fn spawn_burst(state: &mut GameState, origin: Vec2, burst: Burst) {
    if state.max_particles == 0 {
        return;
    }
    for _ in 0..burst.count {
        let angle = match burst.spread {
            Spread::Radial => state.rng.random_range(0.0..std::f32::consts::TAU),
            // Screen y points down, so "up" is around -PI/2
            Spread::Upward => state.rng.random_range(-2.6..-0.54_f32),
            Spread::Backward => state.rng.random_range(2.8..3.48_f32),
        };
        let speed = state.rng.random_range(burst.min_speed..=burst.max_speed);
        let size = state.rng.random_range(burst.min_size..=burst.max_size);
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size,
            life: 1.0,
            color: burst.color,
        });
    }
    let overflow = state.particles.len().saturating_sub(state.max_particles);
    if overflow > 0 {
        state.particles.drain(..overflow);
    }
}

/// Integrate, decay and cull every particle
pub fn advance(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}
