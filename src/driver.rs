//! Frame driver: owns the run and sequences each frame
//!
//! Idle -> Running when play starts (fresh run state). Each frame while
//! running: step the simulation, render, then ask to be rescheduled. A game
//! over or an external stop moves to Stopping; the next frame callback (if the
//! host had one pending) lands in Stopping and finishes the move to Idle
//! without stepping or drawing.

use crate::audio::CuePlayer;
use crate::color::Rgb;
use crate::renderer::{Surface, build_scene};
use crate::sim::{GameEvent, GameState, MAX_PARTICLES, TickInput, tick};

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Running,
    Stopping,
}

/// What one frame produced for the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Current distance, when a step ran
    pub score: Option<f64>,
    /// Level changes and game over raised this frame
    pub events: Vec<GameEvent>,
    /// Whether the host should request another frame
    pub reschedule: bool,
    /// Whether anything was drawn
    pub rendered: bool,
}

/// Owns all per-run state; the only writer of it
pub struct FrameDriver {
    phase: DriverPhase,
    state: Option<GameState>,
    max_particles: usize,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(MAX_PARTICLES)
    }
}

impl FrameDriver {
    pub fn new(max_particles: usize) -> Self {
        Self {
            phase: DriverPhase::Idle,
            state: None,
            max_particles,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    /// Current run, if one is live
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn set_max_particles(&mut self, max_particles: usize) {
        self.max_particles = max_particles;
        if let Some(state) = &mut self.state {
            state.max_particles = max_particles;
        }
    }

    /// Begin a fresh run. Returns false if one is already running.
    pub fn start(&mut self, seed: u64) -> bool {
        if self.phase == DriverPhase::Running {
            return false;
        }
        let mut state = GameState::new(seed);
        state.max_particles = self.max_particles;
        self.state = Some(state);
        self.phase = DriverPhase::Running;
        log::info!("Run started with seed {}", seed);
        true
    }

    /// External pause: stop advancing the current run
    pub fn stop(&mut self) {
        if self.phase == DriverPhase::Running {
            log::info!("Run stopping");
            self.phase = DriverPhase::Stopping;
        }
    }

    /// Mirror the host's play state
    pub fn set_playing(&mut self, playing: bool, seed: u64) {
        if playing {
            self.start(seed);
        } else {
            self.stop();
        }
    }

    fn finish_stop(&mut self) {
        self.phase = DriverPhase::Idle;
        self.state = None;
    }

    /// Run one frame: step, render, decide on rescheduling
    pub fn frame(
        &mut self,
        input: &TickInput,
        dt_ms: f64,
        player_color: Rgb,
        time_ms: f64,
        audio: &mut dyn CuePlayer,
        surface: Option<&mut dyn Surface>,
    ) -> FrameOutcome {
        match self.phase {
            DriverPhase::Idle => return FrameOutcome::default(),
            DriverPhase::Stopping => {
                self.finish_stop();
                return FrameOutcome::default();
            }
            DriverPhase::Running => {}
        }

        let Some(state) = self.state.as_mut() else {
            log::warn!("Running without a run state");
            self.finish_stop();
            return FrameOutcome::default();
        };

        tick(state, input, dt_ms, audio);
        let events = state.drain_events();
        let score = Some(state.score);

        let rendered = match surface {
            Some(surface) => {
                surface.draw(&build_scene(state, player_color, time_ms));
                true
            }
            None => false,
        };

        let over = state.is_over();
        if over {
            self.phase = DriverPhase::Stopping;
            self.finish_stop();
        }

        FrameOutcome {
            score,
            events,
            reschedule: !over,
            rendered,
        }
    }
}
