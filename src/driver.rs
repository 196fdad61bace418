//! Frame driver
//!
//! Owns the session, turns host timestamps into frame deltas, buffers
//! one-shot triggers until the next frame, and persists the best score when
//! a run beats it. The browser front-end calls `frame` from
//! requestAnimationFrame; the native build calls it from a plain loop.

use crate::consts::{FIRST_FRAME_DT, MAX_FRAME_DT};
use crate::highscores::HighScore;
use crate::persistence::Storage;
use crate::platform::InputAction;
use crate::scene::{self, SceneFrame};
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game session plus its clock and storage
pub struct Driver<S: Storage> {
    pub state: GameState,
    storage: S,
    best: HighScore,
    input: TickInput,
    /// Host timestamp (ms) of the previous frame
    last_time: Option<f64>,
}

impl<S: Storage> Driver<S> {
    /// Create an idle session, loading the best score from `storage`
    pub fn new(seed: u64, storage: S) -> Self {
        let best = HighScore::load(&storage);
        let mut state = GameState::new(seed);
        state.high_score = best.value;
        Self {
            state,
            storage,
            best,
            input: TickInput::default(),
            last_time: None,
        }
    }

    /// Give the storage back (process teardown)
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Queue a jump for the next frame (also starts from Idle)
    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    /// Queue the start button
    pub fn start(&mut self) {
        self.input.start = true;
    }

    /// Queue the restart button
    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Route a mapped input
    pub fn press(&mut self, action: InputAction) {
        match action {
            InputAction::Jump => self.jump(),
            InputAction::Restart => self.restart(),
            InputAction::ToggleAutopilot => self.set_autopilot(!self.input.autopilot),
            // Sound lives outside the simulation
            InputAction::ToggleMute => {}
        }
    }

    /// Slider change. Returns false for an unknown knob.
    pub fn set_setting(&mut self, name: &str, value: f32) -> bool {
        let applied = self.state.settings.set_by_name(name, value);
        if !applied {
            log::warn!("Unknown setting {}", name);
        }
        applied
    }

    /// Overwrite all four knobs from a preset
    pub fn apply_difficulty(&mut self, preset: Difficulty) {
        self.state.settings.apply_preset(preset);
        log::info!("Difficulty set to {}", preset.as_str());
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Seconds since the previous frame, clamped
    fn frame_dt(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => FIRST_FRAME_DT,
        };
        self.last_time = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Run one frame at host time `now_ms`; returns what happened
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = self.frame_dt(now_ms);
        self.step(dt)
    }

    /// Run one frame with an explicit delta (seconds)
    pub fn step(&mut self, dt: f32) -> Vec<GameEvent> {
        let input = self.input.clone();
        tick(&mut self.state, &input, dt);

        // Clear one-shot inputs after processing
        self.input.jump = false;
        self.input.start = false;
        self.input.restart = false;

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::NewHighScore(score) = event {
                self.best.record(*score, &mut self.storage);
            }
        }
        events
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.best.value
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Draw instances for the current state
    pub fn scene(&self) -> SceneFrame {
        scene::build(&self.state)
    }
}
