//! Per-frame simulation step
//!
//! Order within a step is fixed: integrate player, spawn, collide and score,
//! then advance particles. Rendering happens afterwards in the frame driver.

use super::state::{GamePhase, GameState};
use super::{collision, particles, physics, spawner};
use crate::audio::CuePlayer;
use crate::consts::MAX_STEP_MS;

/// Logical actions for a single step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key held
    pub jump: bool,
    /// Slide key held
    pub slide: bool,
    /// Dash pressed since the previous step
    pub dash: bool,
}

/// Advance the run by one step; `dt_ms` drives the beat clock only
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64, audio: &mut dyn CuePlayer) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.steps += 1;
    state.clock_ms += dt_ms.clamp(0.0, MAX_STEP_MS);

    physics::integrate(state, input, audio);
    spawner::update(state);

    let result = collision::resolve(state, audio);
    if !result.crashed {
        collision::score_and_level(state, audio);
    }

    particles::advance(&mut state.particles);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Silent, SoundCue};
    use crate::consts::*;
    use crate::sim::spawner::make_obstacle;
    use crate::sim::state::{GameEvent, ObstacleKind};
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl CuePlayer for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    /// A run with the spawner held off so tests control every obstacle
    fn quiet_state() -> GameState {
        let mut state = GameState::new(2024);
        state.next_spawn_ms = f64::INFINITY;
        state
    }

    fn run_until_over(state: &mut GameState, max_steps: u32) -> u32 {
        for n in 1..=max_steps {
            tick(state, &TickInput::default(), STEP_MS, &mut Silent);
            if state.is_over() {
                return n;
            }
        }
        max_steps
    }

    #[test]
    fn test_spike_from_spawn_line_ends_run() {
        let mut state = quiet_state();
        let spike = make_obstacle(&mut state, ObstacleKind::Spike, false);
        state.obstacles.push(spike);

        let steps = run_until_over(&mut state, 1000);
        assert!(state.is_over());

        // Spike front edge reaches the hitbox after roughly this many steps
        let gap = SPAWN_X - (PLAYER_START_X + PLAYER_WIDTH - HITBOX_INSET);
        let expected = (gap / INITIAL_SPEED).ceil() as u32;
        assert!(steps.abs_diff(expected) <= 2, "steps {steps} vs {expected}");

        let summary = match state.drain_events().as_slice() {
            [GameEvent::GameOver(s)] => *s,
            other => panic!("unexpected events {:?}", other),
        };
        assert_eq!(summary.orbs, 0);
        // Score accrued on every step before the crash, none on the crash step
        let approx = (steps - 1) as f64 * INITIAL_SPEED as f64 * SCORE_PER_SPEED;
        assert!((summary.score - approx).abs() < 2.0, "{} vs {}", summary.score, approx);
        assert_eq!(summary.score, state.score);
    }

    #[test]
    fn test_orb_in_path_is_collected() {
        let mut state = quiet_state();
        let mut orb = make_obstacle(&mut state, ObstacleKind::Orb, false);
        // Lower it into the running lane
        orb.pos.y = GROUND_Y - ORB_SIZE;
        state.obstacles.push(orb);

        let steps = run_until_over(&mut state, 300);
        assert_eq!(steps, 300);
        assert!(!state.is_over());
        assert_eq!(state.session_orbs, 1);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_score_reaching_level_band_levels_up_once() {
        let mut state = quiet_state();
        state.score = DISTANCE_PER_LEVEL - 0.1;
        let mut audio = Recorder::default();
        let speed = state.settings.speed;

        tick(&mut state, &TickInput::default(), STEP_MS, &mut audio);
        assert_eq!(state.settings.level, 2);
        assert!(state.settings.speed >= speed + SPEED_INCREASE_PER_LEVEL);
        assert_eq!(state.drain_events(), vec![GameEvent::LevelChanged(2)]);
        assert_eq!(audio.0, vec![SoundCue::LevelUp]);

        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), STEP_MS, &mut audio);
        }
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_level_never_decreases_over_long_run() {
        let mut state = quiet_state();
        let mut last = state.settings.level;
        let mut changes = 0;
        for _ in 0..20_000 {
            tick(&mut state, &TickInput::default(), STEP_MS, &mut Silent);
            assert!(state.settings.level >= last);
            last = state.settings.level;
            changes += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelChanged(_)))
                .count();
        }
        let crossings = (state.score / DISTANCE_PER_LEVEL).floor() as usize;
        assert_eq!(changes, crossings);
        assert_eq!(state.settings.level as usize, crossings + 1);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = quiet_state();
        let spike = make_obstacle(&mut state, ObstacleKind::Spike, false);
        state.obstacles.push(spike);
        run_until_over(&mut state, 1000);
        let score = state.score;
        let steps = state.steps;
        tick(&mut state, &TickInput::default(), STEP_MS, &mut Silent);
        assert_eq!(state.score, score);
        assert_eq!(state.steps, steps);
    }

    #[test]
    fn test_jumping_clears_spike() {
        let mut state = quiet_state();
        let spike = make_obstacle(&mut state, ObstacleKind::Spike, false);
        state.obstacles.push(spike);

        for _ in 0..200 {
            let front = state.obstacles.first().map(|o| o.pos.x).unwrap_or(f32::MIN);
            let input = TickInput {
                jump: (front - PLAYER_START_X) < 120.0 && front > PLAYER_START_X,
                ..Default::default()
            };
            tick(&mut state, &input, STEP_MS, &mut Silent);
        }
        assert!(!state.is_over());
    }

    #[test]
    fn test_dash_through_block() {
        let mut state = quiet_state();
        let mut block = make_obstacle(&mut state, ObstacleKind::Block, false);
        block.pos.x = PLAYER_START_X + PLAYER_WIDTH + 20.0;
        state.obstacles.push(block);

        let dash = TickInput {
            dash: true,
            ..Default::default()
        };
        tick(&mut state, &dash, STEP_MS, &mut Silent);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), STEP_MS, &mut Silent);
        }
        assert!(!state.is_over());
        assert!(state.player.dashing);
    }

    #[test]
    fn test_spawner_runs_on_beat_clock() {
        let mut state = GameState::new(5);
        // First obstacle arrives on the opening step
        tick(&mut state, &TickInput::default(), STEP_MS, &mut Silent);
        assert_eq!(state.obstacles.len(), 1);

        let next = state.next_spawn_ms;
        while state.clock_ms + STEP_MS <= next {
            tick(&mut state, &TickInput::default(), STEP_MS, &mut Silent);
            assert_eq!(state.obstacles.len(), 1);
        }
        tick(&mut state, &TickInput::default(), STEP_MS, &mut Silent);
        assert_eq!(state.obstacles.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_score_and_level_never_decrease(
            seed in any::<u64>(),
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut state = GameState::new(seed);
            state.max_particles = 50;
            let (mut score, mut level) = (state.score, state.settings.level);
            for (jump, slide, dash) in inputs {
                tick(&mut state, &TickInput { jump, slide, dash }, STEP_MS, &mut Silent);
                prop_assert!(state.score >= score);
                prop_assert!(state.settings.level >= level);
                prop_assert!(state.particles.len() <= state.max_particles);
                score = state.score;
                level = state.settings.level;
            }
        }
    }
}
