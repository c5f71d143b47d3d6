//! Step simulation module
//!
//! All gameplay logic lives here:
//! - One step per frame, physics in per-step units
//! - Seeded RNG only
//! - Audio only through the `CuePlayer` capability
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionResult, player_hitbox};
pub use particles::{Burst, Spread, spawn_burst};
pub use state::{
    GameEvent, GamePhase, GameState, MAX_PARTICLES, Obstacle, ObstacleKind, Particle, Player,
    RunSettings, RunSummary,
};
pub use tick::{TickInput, tick};
