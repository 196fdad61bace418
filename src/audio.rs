//! Web Audio cues
//!
//! Every cue is a short list of synthesized tones; there are no sample
//! files. When the browser refuses an AudioContext every call is a no-op.

use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::sim::{GameEvent, PickupKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Flap
    Jump,
    /// Pipe passed or bonus points
    Score,
    /// Power-up collected
    Pickup,
    /// Crash
    GameOver,
    /// New best score
    HighScore,
}

/// One oscillator note
#[derive(Debug, Clone, Copy)]
struct Tone {
    wave: OscillatorType,
    freq: f32,
    /// Exponential glide target, if the pitch moves
    glide_to: Option<f32>,
    /// Seconds after the cue starts
    delay: f64,
    duration: f64,
    gain: f32,
}

const fn tone(wave: OscillatorType, freq: f32, delay: f64, duration: f64, gain: f32) -> Tone {
    Tone {
        wave,
        freq,
        glide_to: None,
        delay,
        duration,
        gain,
    }
}

const fn glide(mut t: Tone, to: f32) -> Tone {
    t.glide_to = Some(to);
    t
}

const JUMP: [Tone; 1] = [glide(tone(OscillatorType::Triangle, 300.0, 0.0, 0.12, 0.25), 700.0)];
const SCORE: [Tone; 2] = [
    tone(OscillatorType::Sine, 880.0, 0.0, 0.06, 0.3),
    tone(OscillatorType::Sine, 1320.0, 0.06, 0.15, 0.3),
];
const PICKUP: [Tone; 3] = [
    tone(OscillatorType::Triangle, 600.0, 0.0, 0.15, 0.25),
    tone(OscillatorType::Triangle, 800.0, 0.08, 0.15, 0.25),
    tone(OscillatorType::Triangle, 1000.0, 0.16, 0.2, 0.25),
];
const GAME_OVER: [Tone; 5] = [
    glide(tone(OscillatorType::Sine, 120.0, 0.0, 0.2, 0.5), 40.0),
    tone(OscillatorType::Sawtooth, 400.0, 0.15, 0.25, 0.2),
    tone(OscillatorType::Sawtooth, 350.0, 0.35, 0.25, 0.2),
    tone(OscillatorType::Sawtooth, 300.0, 0.55, 0.25, 0.2),
    tone(OscillatorType::Sawtooth, 200.0, 0.75, 0.4, 0.2),
];
const HIGH_SCORE: [Tone; 5] = [
    tone(OscillatorType::Square, 523.0, 0.0, 0.12, 0.15),
    tone(OscillatorType::Square, 659.0, 0.1, 0.12, 0.15),
    tone(OscillatorType::Square, 784.0, 0.2, 0.12, 0.15),
    tone(OscillatorType::Square, 1047.0, 0.3, 0.3, 0.15),
    tone(OscillatorType::Triangle, 1568.0, 0.3, 0.3, 0.1),
];

impl SoundEffect {
    /// Cue for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::Score => Some(SoundEffect::Score),
            // Extra life already replays the score cue
            GameEvent::PickupCollected(PickupKind::ExtraLife) => None,
            GameEvent::PickupCollected(_) => Some(SoundEffect::Pickup),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::NewHighScore(_) => Some(SoundEffect::HighScore),
            GameEvent::RunStarted => None,
        }
    }

    fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Jump => &JUMP,
            SoundEffect::Score => &SCORE,
            SoundEffect::Pickup => &PICKUP,
            SoundEffect::GameOver => &GAME_OVER,
            SoundEffect::HighScore => &HIGH_SCORE,
        }
    }
}

/// Plays cues for the events of each frame
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let ctx = match AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                log::warn!("Audio disabled, no AudioContext: {:?}", err);
                None
            }
        };
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    /// Browsers start the context suspended until a user gesture
    pub fn resume(&self) {
        if let Some(ctx) = self.ctx.as_ref().filter(|c| c.state() == AudioContextState::Suspended) {
            let _ = ctx.resume();
        }
    }

    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        log::info!("Sound {}", if muted { "muted" } else { "on" });
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play whatever cues a frame's events call for
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        let start = ctx.current_time();
        for t in effect.tones() {
            if self.schedule_tone(ctx, start, t).is_none() {
                log::debug!("Dropped {:?} tone at {} Hz", effect, t.freq);
            }
        }
    }

    /// Wire oscillator -> gain -> destination and schedule its envelope
    fn schedule_tone(&self, ctx: &AudioContext, start: f64, tone: &Tone) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let amp = ctx.create_gain().ok()?;
        osc.set_type(tone.wave);
        osc.connect_with_audio_node(&amp).ok()?;
        amp.connect_with_audio_node(&ctx.destination()).ok()?;

        let on = start + tone.delay;
        let off = on + tone.duration;

        let pitch = osc.frequency();
        pitch.set_value_at_time(tone.freq, on).ok()?;
        if let Some(target) = tone.glide_to {
            pitch.exponential_ramp_to_value_at_time(target, off).ok()?;
        }

        let level = amp.gain();
        level.set_value_at_time(0.0, start).ok()?;
        level.set_value_at_time(tone.gain * self.volume, on).ok()?;
        // Exponential ramps cannot reach zero
        level.exponential_ramp_to_value_at_time(0.001, off).ok()?;

        osc.start_with_when(on).ok()?;
        osc.stop_with_when(off + 0.05).ok()?;
        Some(())
    }
}
