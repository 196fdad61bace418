//! Per-frame simulation tick
//!
//! Core game loop: triggers, then physics, obstacles, pickups, ambient, and
//! finally collisions and scoring.

use super::state::{GameEvent, GamePhase, GameState};
use super::{ambient, collision, obstacles, physics, pickups};
use crate::consts::*;
use crate::sim::scenery::colors;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (Space, tap, click, tilt). Also starts a run from Idle.
    pub jump: bool,
    /// Start button
    pub start: bool,
    /// Restart button (only honored after game over)
    pub restart: bool,
    /// Demo mode - the bird flies itself
    pub autopilot: bool,
}

/// Advance the game by one rendered frame
///
/// `dt` is the wall-clock seconds since the previous frame. It only feeds the
/// spawn clock, deferred effects and particles; bird and pipe motion are per
/// frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Deferred effects keep counting whatever the phase
    for action in state.scheduler.advance_deferred(dt) {
        pickups::expire(state, action);
    }
    state.scenery.update_particles(dt);

    match state.phase {
        GamePhase::Idle => {
            if input.start || input.jump || input.autopilot {
                start_run(state);
            }
            return;
        }
        GamePhase::Ended => {
            if input.restart {
                start_run(state);
            }
            return;
        }
        GamePhase::Running => {}
    }

    if input.jump || (input.autopilot && autopilot_wants_jump(state)) {
        physics::jump(&mut state.bird, &state.settings);
        state.events.push(GameEvent::Jump);
    }

    state.time_ticks += 1;

    physics::integrate(&mut state.bird, &state.settings);

    let attempts = state.scheduler.spawn_clock.advance(dt);
    for _ in 0..attempts {
        if obstacles::try_spawn(state).is_some() {
            pickups::maybe_spawn(state);
        }
    }
    obstacles::advance(state);

    pickups::advance(state);

    state.ambient_phase = ambient::advance(state.ambient_phase);
    let speed = state.settings.speed;
    state.scenery.update_clouds(&mut state.rng, speed);

    let score_before = state.score;
    let result = collision::check(state);
    if result.is_hit() {
        log::info!("Run ended: {:?}", result);
        end_run(state);
    } else if state.score > score_before {
        let origin = state.bird.pos;
        state.scenery.burst(&mut state.rng, origin, colors::SPARK, 6);
    }
}

/// Reset the session and begin a run (Idle → Running, Ended → Running)
pub fn start_run(state: &mut GameState) {
    state.phase = GamePhase::Running;
    state.score = 0;
    state.time_ticks = 0;
    state.bird.reset();
    state.bird.shielded = false;
    obstacles::clear(state);
    state.pickups.clear();
    state.scenery.clear_particles();
    state.scheduler.spawn_clock.restart();

    // First pair appears right away; the clock takes over from here
    obstacles::spawn_pair(state);
    pickups::maybe_spawn(state);

    state.events.push(GameEvent::RunStarted);
    log::info!("Run started (high score {})", state.high_score);
}

/// Stop the run (Running → Ended). Does nothing outside a run.
pub fn end_run(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.phase = GamePhase::Ended;
    state.scheduler.spawn_clock.stop();

    let origin = state.bird.pos;
    state.scenery.burst(&mut state.rng, origin, colors::CRASH, 24);

    state.events.push(GameEvent::GameOver { score: state.score });
    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore(state.score));
        log::info!("New high score: {}", state.score);
    }
}

/// Autopilot: flap when below the next gap and falling
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    let bird = &state.bird;
    let target = state
        .pipes
        .iter()
        .find(|p| p.x + PIPE_WIDTH / 2.0 >= bird.pos.x - BIRD_RADIUS)
        .map(|p| p.gap_center)
        .unwrap_or(0.0);
    let margin = (state.settings.gap_size / 2.0 - BIRD_RADIUS).clamp(0.1, 0.4);
    bird.vel <= 0.0 && bird.pos.y < target - margin
}
