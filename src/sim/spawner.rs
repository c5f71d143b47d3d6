//! Beat-synchronized obstacle spawning
//!
//! Obstacles arrive on a beat grid derived from the tempo. Higher levels
//! raise the tempo and tighten the spacing between spawns.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind, RunSettings};
use crate::consts::*;

/// Share of spawns that are ground spikes
const SPIKE_CHANCE: f32 = 0.65;
/// Spike share plus orb share
const ORB_CHANCE: f32 = 0.82;
/// Chance that a block hovers instead of sitting on the ground
const ELEVATED_BLOCK_CHANCE: f64 = 0.55;
/// Spacing divisor growth per level
const SPACING_TIGHTEN_PER_LEVEL: f64 = 0.08;

/// Milliseconds between beats at the current tempo and level
pub fn beat_interval_ms(settings: &RunSettings) -> f64 {
    let bpm = settings.bpm + settings.level as f32 * BPM_BONUS_PER_LEVEL;
    60_000.0 / bpm.max(1.0) as f64
}

/// Beats to wait before the next spawn: half, one (most likely) or two
pub fn beat_multiple(roll: f32) -> f64 {
    if roll < 0.2625 {
        0.5
    } else if roll < 0.75 {
        1.0
    } else {
        2.0
    }
}

/// Spacing multiplier for a level, shrinking as the level rises
pub fn level_spacing_scale(level: u32) -> f64 {
    1.0 / (1.0 + level as f64 * SPACING_TIGHTEN_PER_LEVEL)
}

/// Obstacle kind for a uniform roll in [0, 1)
pub fn choose_kind(roll: f32) -> ObstacleKind {
    if roll < SPIKE_CHANCE {
        ObstacleKind::Spike
    } else if roll < ORB_CHANCE {
        ObstacleKind::Orb
    } else {
        ObstacleKind::Block
    }
}

/// Top-left position and size for a new obstacle at the spawn line
pub fn placement(kind: ObstacleKind, elevated: bool) -> (Vec2, Vec2) {
    let (size, altitude) = match kind {
        ObstacleKind::Spike => (SPIKE_SIZE, 0.0),
        ObstacleKind::Orb => (ORB_SIZE, ORB_ALTITUDE),
        ObstacleKind::Block if elevated => (BLOCK_SIZE, BLOCK_ALTITUDE),
        ObstacleKind::Block => (BLOCK_SIZE, 0.0),
    };
    (
        Vec2::new(SPAWN_X, GROUND_Y - altitude - size),
        Vec2::splat(size),
    )
}

/// Build an obstacle at the spawn line
pub fn make_obstacle(state: &mut GameState, kind: ObstacleKind, elevated: bool) -> Obstacle {
    let (pos, size) = placement(kind, elevated);
    Obstacle {
        id: state.next_entity_id(),
        pos,
        size,
        kind,
        color: kind.color(),
        speed_multiplier: 1.0,
    }
}

/// Spawn an obstacle if the beat clock has passed the next eligible time.
/// Returns true when something was spawned.
pub fn update(state: &mut GameState) -> bool {
    if state.clock_ms <= state.next_spawn_ms {
        return false;
    }

    let kind = choose_kind(state.rng.random::<f32>());
    let elevated = kind == ObstacleKind::Block && state.rng.random_bool(ELEVATED_BLOCK_CHANCE);
    let obstacle = make_obstacle(state, kind, elevated);
    log::debug!(
        "Spawned {:?}{} at {:.0}ms",
        obstacle.kind,
        if elevated { " (elevated)" } else { "" },
        state.clock_ms
    );
    state.obstacles.push(obstacle);

    let beats = beat_multiple(state.rng.random::<f32>());
    let wait =
        beat_interval_ms(&state.settings) * beats * level_spacing_scale(state.settings.level);
    state.next_spawn_ms = state.clock_ms + wait;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_interval_tightens_with_level() {
        let mut settings = RunSettings::default();
        let l1 = beat_interval_ms(&settings);
        assert!((l1 - 60_000.0 / (BASE_BPM + BPM_BONUS_PER_LEVEL) as f64).abs() < 1e-9);
        settings.level = 5;
        assert!(beat_interval_ms(&settings) < l1);
    }

    #[test]
    fn test_beat_interval_ignores_world_speed() {
        let mut settings = RunSettings::default();
        let before = beat_interval_ms(&settings);
        settings.speed *= 3.0;
        assert_eq!(beat_interval_ms(&settings), before);
    }

    #[test]
    fn test_kind_bands() {
        assert_eq!(choose_kind(0.0), ObstacleKind::Spike);
        assert_eq!(choose_kind(0.64), ObstacleKind::Spike);
        assert_eq!(choose_kind(0.65), ObstacleKind::Orb);
        assert_eq!(choose_kind(0.81), ObstacleKind::Orb);
        assert_eq!(choose_kind(0.82), ObstacleKind::Block);
        assert_eq!(choose_kind(0.999), ObstacleKind::Block);
    }

    #[test]
    fn test_beat_multiple_weights() {
        assert_eq!(beat_multiple(0.1), 0.5);
        assert_eq!(beat_multiple(0.5), 1.0);
        assert_eq!(beat_multiple(0.9), 2.0);
    }

    #[test]
    fn test_spacing_scale_bounds() {
        assert!((level_spacing_scale(1) - 1.0 / 1.08).abs() < 1e-12);
        assert!(level_spacing_scale(3) < level_spacing_scale(2));
        assert!(level_spacing_scale(100) > 0.0);
    }

    #[test]
    fn test_placement_rests_on_ground_or_altitude() {
        let (pos, size) = placement(ObstacleKind::Spike, false);
        assert_eq!(pos.x, SPAWN_X);
        assert_eq!(pos.y + size.y, GROUND_Y);

        let (pos, size) = placement(ObstacleKind::Orb, false);
        assert_eq!(pos.y + size.y, GROUND_Y - ORB_ALTITUDE);

        let (ground, _) = placement(ObstacleKind::Block, false);
        let (high, _) = placement(ObstacleKind::Block, true);
        assert!(high.y < ground.y);
    }

    #[test]
    fn test_elevated_block_hovers_over_a_runner() {
        let (pos, size) = placement(ObstacleKind::Block, true);
        let block_bottom = pos.y + size.y;
        let standing_top = GROUND_Y - PLAYER_HEIGHT + HITBOX_INSET;
        assert!(block_bottom < standing_top);
        // A jump from under it reaches the block
        let apex = GROUND_Y - PLAYER_HEIGHT - JUMP_IMPULSE * JUMP_IMPULSE / (2.0 * GRAVITY);
        assert!(apex < block_bottom);
    }

    #[test]
    fn test_no_spawn_before_eligible_time() {
        let mut state = GameState::new(42);
        state.next_spawn_ms = 500.0;
        state.clock_ms = 499.0;
        assert!(!update(&mut state));
        // Reaching the timestamp is not passing it
        state.clock_ms = 500.0;
        assert!(!update(&mut state));
        assert!(state.obstacles.is_empty());
        state.clock_ms = 500.5;
        assert!(update(&mut state));
    }

    #[test]
    fn test_spawn_schedules_next_beat() {
        let mut state = GameState::new(42);
        state.clock_ms = state.next_spawn_ms + 1.0;
        assert!(update(&mut state));
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, SPAWN_X);

        let beat = beat_interval_ms(&state.settings);
        let wait = state.next_spawn_ms - state.clock_ms;
        let scale = level_spacing_scale(state.settings.level);
        assert!(wait >= beat * 0.5 * scale - 1e-9 && wait <= beat * 2.0 * scale + 1e-9);
        // Immediately after a spawn nothing else is eligible
        assert!(!update(&mut state));
    }

    #[test]
    fn test_seeded_spawns_are_reproducible() {
        let run = |seed| {
            let mut state = GameState::new(seed);
            let mut kinds = Vec::new();
            for _ in 0..50 {
                state.clock_ms = state.next_spawn_ms + 1.0;
                update(&mut state);
                kinds.push(state.obstacles.last().map(|o| o.kind));
            }
            kinds
        };
        assert_eq!(run(9), run(9));
    }
}
