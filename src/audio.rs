//! Audio cues using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Gameplay code only sees the `CuePlayer` capability; the browser backend
//! lives behind `cfg(target_arch = "wasm32")`.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player left the ground
    Jump,
    /// Dash started
    Dash,
    /// Orb collected
    Collect,
    /// Level increased
    LevelUp,
    /// Hazard hit
    Death,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One transient oscillator note at a fixed pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency (Hz)
    pub freq: f32,
    pub waveform: Waveform,
    /// Seconds after the cue starts
    pub delay: f64,
    /// Seconds until the oscillator stops
    pub duration: f64,
}

/// Peak gain of every note before volume scaling
pub const NOTE_GAIN: f32 = 0.1;
/// Gain the envelope decays to by the end of a note
pub const NOTE_FLOOR: f32 = 0.001;

const fn tone(freq: f32, waveform: Waveform, delay: f64, duration: f64) -> Tone {
    Tone {
        freq,
        waveform,
        delay,
        duration,
    }
}

const JUMP: [Tone; 1] = [tone(400.0, Waveform::Square, 0.0, 0.15)];

const DASH: [Tone; 1] = [tone(1200.0, Waveform::Sine, 0.0, 0.1)];

const COLLECT: [Tone; 1] = [tone(800.0, Waveform::Sine, 0.0, 0.2)];

const LEVEL_UP: [Tone; 3] = [
    tone(440.0, Waveform::Sawtooth, 0.0, 0.1),
    tone(554.37, Waveform::Sawtooth, 0.1, 0.1),
    tone(659.25, Waveform::Sawtooth, 0.2, 0.2),
];

const DEATH: [Tone; 1] = [tone(100.0, Waveform::Sawtooth, 0.0, 0.5)];

impl SoundCue {
    /// Notes that make up this cue
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundCue::Jump => &JUMP,
            SoundCue::Dash => &DASH,
            SoundCue::Collect => &COLLECT,
            SoundCue::LevelUp => &LEVEL_UP,
            SoundCue::Death => &DEATH,
        }
    }
}

/// Capability to play a cue. Playback must never fail the caller.
pub trait CuePlayer {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue (native runs, muted hosts)
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{CuePlayer, NOTE_FLOOR, NOTE_GAIN, SoundCue, Tone, Waveform};
    use crate::settings::Settings;

    /// Audio manager for the game
    ///
    /// The context is created on the first user gesture (`unlock`), browsers
    /// refuse to start audio before one.
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        unavailable: bool,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            Self {
                ctx: None,
                unavailable: false,
                master_volume: settings.master_volume,
                sfx_volume: settings.sfx_volume,
                muted: settings.muted,
            }
        }

        /// Create (or resume) the audio context; call from an input handler
        pub fn unlock(&mut self) {
            if self.ctx.is_none() && !self.unavailable {
                match AudioContext::new() {
                    Ok(ctx) => {
                        log::info!("AudioContext created");
                        self.ctx = Some(ctx);
                    }
                    Err(_) => {
                        log::warn!("Failed to create AudioContext - audio disabled");
                        self.unavailable = true;
                    }
                }
            }
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.master_volume = settings.master_volume.clamp(0.0, 1.0);
            self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
            self.muted = settings.muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<()> {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            };
            let (osc, gain) = Self::create_osc(ctx, tone.freq, osc_type)?;
            let t = ctx.current_time() + tone.delay;
            let end = t + tone.duration;

            gain.gain().set_value_at_time(NOTE_GAIN * vol, t).ok()?;
            gain.gain().exponential_ramp_to_value_at_time(NOTE_FLOOR, end).ok()?;

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(end).ok()?;
            Some(())
        }
    }

    impl CuePlayer for AudioManager {
        fn play(&mut self, cue: SoundCue) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            for tone in cue.tones() {
                if Self::play_tone(ctx, tone, vol).is_none() {
                    log::debug!("Dropped {:?} tone", cue);
                }
            }
        }
    }
}
