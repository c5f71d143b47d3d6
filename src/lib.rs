//! Neon Dash - An endless rhythm runner
//!
//! Core modules:
//! - `sim`: Step simulation (physics, spawning, collisions, particles)
//! - `renderer`: Scene building and Canvas 2D backend
//! - `driver`: Frame driver state machine bridging play/pause
//! - `audio`: Synthesized sound cues
//! - `profile`: Orb wallet, unlocked skins and best distance

pub mod audio;
pub mod color;
pub mod driver;
pub mod input;
pub mod profile;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod skins;

pub use color::Rgb;
pub use driver::{DriverPhase, FrameDriver, FrameOutcome};
pub use profile::Profile;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal frame step in milliseconds (60 Hz)
    pub const STEP_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta fed to the beat clock (tab switches, stalls)
    pub const MAX_STEP_MS: f64 = 100.0;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 1200.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    pub const GROUND_Y: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 150.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Height while sliding
    pub const SLIDE_HEIGHT: f32 = 20.0;
    /// Hitbox shrink on every side of the player sprite
    pub const HITBOX_INSET: f32 = 6.0;

    /// Dash timing (steps)
    pub const DASH_DURATION_STEPS: u32 = 12;
    pub const DASH_COOLDOWN_STEPS: u32 = 50;

    /// Initial run settings
    pub const INITIAL_SPEED: f32 = 8.0;
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_IMPULSE: f32 = -15.0;
    pub const BASE_BPM: f32 = 128.0;

    /// Difficulty progression
    pub const DISTANCE_PER_LEVEL: f64 = 1000.0;
    pub const SPEED_INCREASE_PER_LEVEL: f32 = 1.5;
    pub const BPM_BONUS_PER_LEVEL: f32 = 8.0;
    /// Continuous speed creep applied every step
    pub const SPEED_CREEP: f32 = 0.0006;
    /// Score gained per unit of world speed per step
    pub const SCORE_PER_SPEED: f64 = 0.1;

    /// Obstacle geometry
    pub const SPAWN_X: f32 = 1300.0;
    pub const DESPAWN_X: f32 = -100.0;
    pub const SPIKE_SIZE: f32 = 40.0;
    pub const BLOCK_SIZE: f32 = 60.0;
    pub const ORB_SIZE: f32 = 24.0;
    /// Orb bottom edge height above the ground line
    pub const ORB_ALTITUDE: f32 = 150.0;
    /// Elevated block bottom edge height above the ground line
    pub const BLOCK_ALTITUDE: f32 = 90.0;

    /// Particle life lost per step
    pub const PARTICLE_DECAY: f32 = 0.025;

    /// Distance into a level band during which the level banner is shown
    pub const LEVEL_BANNER_DISTANCE: f64 = 100.0;
}
