//! Collision detection and scoring
//!
//! Obstacles scroll left, get tested against a forgiving player hitbox, and
//! the run's score, orb count and level are updated.

use glam::Vec2;

use super::particles::{Burst, spawn_burst};
use super::state::{GameEvent, GamePhase, GameState, Player};
use crate::audio::{CuePlayer, SoundCue};
use crate::consts::*;

/// Axis-aligned box (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Hitbox used for obstacle tests (sprite bounds minus the inset)
pub fn player_hitbox(player: &Player) -> Aabb {
    Aabb::from_pos_size(player.pos, player.size).inset(HITBOX_INSET)
}

/// What a step of collision resolution did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Orbs picked up this step
    pub collected: u32,
    /// A hazard ended the run
    pub crashed: bool,
}

/// Scroll obstacles, resolve contacts and drop the ones that left the screen
pub fn resolve(state: &mut GameState, audio: &mut dyn CuePlayer) -> CollisionResult {
    let speed = state.settings.speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed * obstacle.speed_multiplier;
    }

    let hitbox = player_hitbox(&state.player);
    let dashing = state.player.dashing;
    let mut result = CollisionResult::default();
    let mut picked: Vec<(u32, Vec2)> = Vec::new();
    let mut crash_color = None;

    for obstacle in &state.obstacles {
        let bounds = Aabb::from_pos_size(obstacle.pos, obstacle.size);
        if !hitbox.overlaps(&bounds) {
            continue;
        }
        if !obstacle.kind.is_hazard() {
            picked.push((obstacle.id, obstacle.pos + obstacle.size * 0.5));
        } else if !dashing && crash_color.is_none() {
            crash_color = Some(obstacle.color);
        }
    }

    // Pickups land even on the step that ends the run
    for (id, center) in picked {
        state.obstacles.retain(|o| o.id != id);
        state.session_orbs += 1;
        result.collected += 1;
        audio.play(SoundCue::Collect);
        spawn_burst(state, center, Burst::pickup());
    }

    if let Some(color) = crash_color {
        // Score as it stood before this step's accrual
        let summary = state.summary();
        log::info!(
            "Game over: {:.0}m, {} orbs, level {}",
            summary.score,
            summary.orbs,
            summary.level
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver(summary));
        audio.play(SoundCue::Death);
        let center = state.player.center();
        spawn_burst(state, center, Burst::crash(color));
        result.crashed = true;
        return result;
    }

    state.obstacles.retain(|o| o.pos.x > DESPAWN_X);
    result
}

/// Accrue distance and apply level-ups. Returns true when the level changed.
pub fn score_and_level(state: &mut GameState, audio: &mut dyn CuePlayer) -> bool {
    state.score += state.settings.speed as f64 * SCORE_PER_SPEED;
    state.settings.speed += SPEED_CREEP;

    let target = (state.score / DISTANCE_PER_LEVEL).floor() as u32 + 1;
    if target <= state.settings.level {
        return false;
    }

    state.settings.level += 1;
    state.settings.speed += SPEED_INCREASE_PER_LEVEL;
    let level = state.settings.level;
    log::info!("Level {} at {:.0}m", level, state.score);
    state.events.push(GameEvent::LevelChanged(level));
    audio.play(SoundCue::LevelUp);
    spawn_burst(
        state,
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
        Burst::level_up(),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::sim::spawner::make_obstacle;
    use crate::sim::state::{Obstacle, ObstacleKind};

    /// Obstacle overlapping a grounded player
    fn touching(state: &mut GameState, kind: ObstacleKind) -> Obstacle {
        let mut obstacle = make_obstacle(state, kind, false);
        obstacle.pos = Vec2::new(PLAYER_START_X + state.settings.speed, GROUND_Y - 30.0);
        obstacle.size = Vec2::splat(30.0);
        obstacle
    }

    #[test]
    fn test_aabb_strict_overlap() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let c = Aabb::from_pos_size(Vec2::new(9.9, 9.9), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_hitbox_is_inset() {
        let player = Player::default();
        let hitbox = player_hitbox(&player);
        assert_eq!(hitbox.min, player.pos + Vec2::splat(HITBOX_INSET));
        assert_eq!(hitbox.max, player.pos + player.size - Vec2::splat(HITBOX_INSET));

        // Grazing the sprite edge is forgiven
        let graze = Aabb::from_pos_size(
            Vec2::new(player.pos.x + player.size.x - 2.0, player.pos.y),
            Vec2::splat(20.0),
        );
        assert!(!hitbox.overlaps(&graze));
    }

    #[test]
    fn test_obstacles_scroll_by_speed() {
        let mut state = GameState::new(1);
        let obstacle = make_obstacle(&mut state, ObstacleKind::Spike, false);
        state.obstacles.push(obstacle);
        resolve(&mut state, &mut Silent);
        assert_eq!(state.obstacles[0].pos.x, SPAWN_X - INITIAL_SPEED);
    }

    #[test]
    fn test_offscreen_obstacles_are_dropped() {
        let mut state = GameState::new(1);
        let mut obstacle = make_obstacle(&mut state, ObstacleKind::Spike, false);
        obstacle.pos.x = DESPAWN_X + 1.0;
        state.obstacles.push(obstacle);
        resolve(&mut state, &mut Silent);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_hazard_ends_run_with_prior_totals() {
        let mut state = GameState::new(1);
        state.score = 123.4;
        state.session_orbs = 2;
        let hazard = touching(&mut state, ObstacleKind::Spike);
        state.obstacles.push(hazard);

        let result = resolve(&mut state, &mut Silent);
        assert!(result.crashed);
        assert!(state.is_over());
        match state.events.as_slice() {
            [GameEvent::GameOver(summary)] => {
                assert_eq!(summary.score, 123.4);
                assert_eq!(summary.orbs, 2);
            }
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn test_orb_taken_on_crash_step_is_reported() {
        let mut state = GameState::new(1);
        let mut orb = make_obstacle(&mut state, ObstacleKind::Orb, false);
        orb.pos = Vec2::new(PLAYER_START_X + state.settings.speed + 8.0, GROUND_Y - 30.0);
        let orb_id = orb.id;
        let mut spike = make_obstacle(&mut state, ObstacleKind::Spike, false);
        spike.pos.x = PLAYER_START_X + state.settings.speed + 18.0;
        state.obstacles.push(orb);
        state.obstacles.push(spike);

        let result = resolve(&mut state, &mut Silent);
        assert!(result.crashed);
        assert_eq!(result.collected, 1);
        assert_eq!(state.session_orbs, 1);
        assert!(state.obstacles.iter().all(|o| o.id != orb_id));
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::GameOver(summary)] if summary.orbs == 1 && summary.score == 0.0
        ));
    }

    #[test]
    fn test_dash_grants_hazard_immunity() {
        let mut state = GameState::new(1);
        state.player.dashing = true;
        let hazard = touching(&mut state, ObstacleKind::Block);
        let id = hazard.id;
        state.obstacles.push(hazard);

        let result = resolve(&mut state, &mut Silent);
        assert!(!result.crashed);
        assert!(!state.is_over());
        assert!(state.events.is_empty());
        assert!(state.obstacles.iter().any(|o| o.id == id));
    }

    #[test]
    fn test_collectible_counts_once_in_any_dash_state() {
        for dashing in [false, true] {
            let mut state = GameState::new(1);
            state.player.dashing = dashing;
            let orb = touching(&mut state, ObstacleKind::Orb);
            state.obstacles.push(orb);

            let result = resolve(&mut state, &mut Silent);
            assert_eq!(result.collected, 1);
            assert_eq!(state.session_orbs, 1);
            assert!(state.obstacles.is_empty());
            assert!(!state.is_over());
        }
    }

    #[test]
    fn test_score_accrues_with_speed() {
        let mut state = GameState::new(1);
        score_and_level(&mut state, &mut Silent);
        assert!((state.score - INITIAL_SPEED as f64 * SCORE_PER_SPEED).abs() < 1e-9);
        assert!(state.settings.speed > INITIAL_SPEED);
    }

    #[test]
    fn test_level_up_on_crossing() {
        let mut state = GameState::new(1);
        state.score = DISTANCE_PER_LEVEL - 0.5;
        let speed = state.settings.speed;

        assert!(score_and_level(&mut state, &mut Silent));
        assert_eq!(state.settings.level, 2);
        assert!(
            (state.settings.speed - (speed + SPEED_CREEP + SPEED_INCREASE_PER_LEVEL)).abs() < 1e-4
        );
        assert_eq!(state.events, vec![GameEvent::LevelChanged(2)]);

        // Staying inside the band does not retrigger
        assert!(!score_and_level(&mut state, &mut Silent));
        assert_eq!(state.settings.level, 2);
    }
}
