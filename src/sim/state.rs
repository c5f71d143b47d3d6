//! Game state and core simulation types
//!
//! Everything a run needs lives in one `GameState` owned by the frame driver.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::color::{Rgb, palette};
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advances every step
    Running,
    /// A hazard ended the run
    GameOver,
}

/// Final numbers reported once when a run ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub score: f64,
    pub orbs: u32,
    pub level: u32,
}

/// Notifications raised by the simulation for the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Difficulty level increased
    LevelChanged(u32),
    /// Run ended on a hazard
    GameOver(RunSummary),
}

/// The runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub grounded: bool,
    pub sliding: bool,
    pub dashing: bool,
    /// Steps until another dash is allowed
    pub dash_cooldown: u32,
    /// Steps left in the current dash
    pub dash_remaining: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_HEIGHT),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            grounded: true,
            sliding: false,
            dashing: false,
            dash_cooldown: 0,
            dash_remaining: 0,
        }
    }
}

impl Player {
    /// Y coordinate of the top edge when standing on the ground
    pub fn ground_line(&self) -> f32 {
        GROUND_Y - self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Ground hazard, jump over it
    Spike,
    /// Square hazard, on the ground or hovering at head height
    Block,
    /// Collectible worth one orb
    Orb,
}

impl ObstacleKind {
    pub fn is_hazard(&self) -> bool {
        !matches!(self, ObstacleKind::Orb)
    }

    pub fn color(&self) -> Rgb {
        match self {
            ObstacleKind::Spike => palette::SPIKE,
            ObstacleKind::Block => palette::BLOCK,
            ObstacleKind::Orb => palette::ORB,
        }
    }
}

/// A scrolling obstacle or pickup
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    pub color: Rgb,
    pub speed_multiplier: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 1 when spawned, dead at 0
    pub life: f32,
    pub color: Rgb,
}

/// Tunables that change during a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub bpm: f32,
    pub level: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            speed: INITIAL_SPEED,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            bpm: BASE_BPM,
            level: 1,
        }
    }
}

/// Maximum particles unless the host caps them lower
pub const MAX_PARTICLES: usize = 500;

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    /// Spawn and particle randomness
    pub rng: Pcg32,
    pub settings: RunSettings,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Particle cap
    pub max_particles: usize,
    /// Distance travelled
    pub score: f64,
    /// Orbs picked up this run
    pub session_orbs: u32,
    /// Simulation clock (ms since run start)
    pub clock_ms: f64,
    /// The spawner fires once the clock passes this
    pub next_spawn_ms: f64,
    /// Steps simulated
    pub steps: u64,
    pub phase: GamePhase,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64) -> Self {
        let settings = RunSettings::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            score: 0.0,
            session_orbs: 0,
            clock_ms: 0.0,
            next_spawn_ms: 0.0,
            steps: 0,
            phase: GamePhase::Running,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            orbs: self.session_orbs,
            level: self.settings.level,
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.settings.level, 1);
        assert_eq!(state.settings.speed, INITIAL_SPEED);
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y, GROUND_Y - PLAYER_HEIGHT);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0.0);
        assert_eq!(state.next_spawn_ms, 0.0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_kind_classification() {
        assert!(ObstacleKind::Spike.is_hazard());
        assert!(ObstacleKind::Block.is_hazard());
        assert!(!ObstacleKind::Orb.is_hazard());
        assert_eq!(ObstacleKind::Orb.color(), palette::ORB);
    }
}
