//! Obstacle spawning, scrolling and recycling
//!
//! Spawn attempts come from the spawn clock, but a pair is only created once
//! the newest pair has scrolled in to `SPAWN_GATE_X`. That keeps spacing
//! steady whatever the relation between the clock and the scroll speed.

use rand::Rng;

use super::state::{GameState, PipePair};
use crate::consts::*;

/// Whether the spawn gate currently allows a new pair
#[inline]
pub fn gate_open(state: &GameState) -> bool {
    state.last_pipe_x <= SPAWN_GATE_X
}

/// Create a pair at the spawn line, unconditionally. Returns its index.
pub fn spawn_pair(state: &mut GameState) -> usize {
    let gap_center = state.rng.random_range(GAP_CENTER_MIN..GAP_CENTER_MAX);
    spawn_pair_at(state, gap_center)
}

/// Create a pair with a chosen gap center
pub fn spawn_pair_at(state: &mut GameState, gap_center: f32) -> usize {
    let id = state.next_entity_id();
    let pair = PipePair::new(id, SPAWN_X, gap_center, state.settings.gap_size);
    log::debug!(
        "Spawned pipe {} (gap {:.2} +- {:.2})",
        id,
        gap_center,
        pair.gap_size / 2.0
    );
    state.pipes.push(pair);
    state.last_pipe_x = SPAWN_X;
    state.pipes.len() - 1
}

/// A gated spawn attempt. Returns the new pair's index if one was created.
pub fn try_spawn(state: &mut GameState) -> Option<usize> {
    if !gate_open(state) {
        return None;
    }
    Some(spawn_pair(state))
}

/// Scroll every pair left, drop the ones past the trailing cutoff, and track
/// the newest pair for the spawn gate
pub fn advance(state: &mut GameState) {
    let speed = state.settings.speed;
    for pipe in state.pipes.iter_mut() {
        pipe.x -= speed;
    }
    state.pipes.retain(|p| p.x >= DESPAWN_X);

    if let Some(newest) = state.pipes.last() {
        state.last_pipe_x = newest.x;
    }
}

/// Forget every pair and reopen the gate
pub fn clear(state: &mut GameState) {
    state.pipes.clear();
    state.last_pipe_x = 0.0;
}
