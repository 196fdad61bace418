//! Collision detection and pass-through scoring
//!
//! Runs after all movement for the frame. World bounds first, then each pipe
//! in spawn order: a hit ends the run immediately and skips the remaining
//! pipes, otherwise the pipe may be scored.

use super::state::{GameEvent, GameState, PipePair};
use crate::Aabb;
use crate::consts::{CEILING_Y, FLOOR_Y};

/// Outcome of a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    /// Nothing hit
    Clear,
    /// Bird left the playable band
    OutOfBounds,
    /// Bird hit the pipe pair with this id
    Pipe(u32),
}

impl CollisionResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, CollisionResult::Clear)
    }
}

/// Whether a height is outside the playable band
#[inline]
pub fn out_of_bounds(y: f32) -> bool {
    y < FLOOR_Y || y > CEILING_Y
}

/// Whether a box touches either barrier of a pair
#[inline]
pub fn hits_pipe(bird: &Aabb, pipe: &PipePair) -> bool {
    bird.intersects(&pipe.top_aabb()) || bird.intersects(&pipe.bottom_aabb())
}

/// Check bounds and pipes, scoring passed pipes along the way
///
/// Stops at the first hit; the caller ends the run.
pub fn check(state: &mut GameState) -> CollisionResult {
    if out_of_bounds(state.bird.pos.y) {
        return CollisionResult::OutOfBounds;
    }

    let bird_box = state.bird.aabb();
    let bird_x = state.bird.pos.x;
    for pipe in state.pipes.iter_mut() {
        if hits_pipe(&bird_box, pipe) {
            return CollisionResult::Pipe(pipe.id);
        }
        if !pipe.passed && pipe.x < bird_x {
            pipe.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Score);
        }
    }

    CollisionResult::Clear
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacles;

    #[test]
    fn test_bounds() {
        assert!(out_of_bounds(-2.81));
        assert!(out_of_bounds(3.01));
        assert!(!out_of_bounds(-2.8));
        assert!(!out_of_bounds(3.0));
        assert!(!out_of_bounds(0.0));
    }

    #[test]
    fn test_floor_hit() {
        let mut state = GameState::new(1);
        state.bird.pos.y = -2.9;
        assert_eq!(check(&mut state), CollisionResult::OutOfBounds);
    }

    #[test]
    fn test_pipe_hit_top_barrier() {
        let mut state = GameState::new(1);
        let idx = obstacles::spawn_pair_at(&mut state, 0.0);
        state.pipes[idx].x = BIRD_X;
        // Gap spans -1..1; bird top edge at 1.05 clips the top barrier
        state.bird.pos.y = 0.85;
        let id = state.pipes[idx].id;
        assert_eq!(check(&mut state), CollisionResult::Pipe(id));
    }

    #[test]
    fn test_flying_through_gap_is_clear() {
        let mut state = GameState::new(1);
        let idx = obstacles::spawn_pair_at(&mut state, 0.0);
        state.pipes[idx].x = BIRD_X;
        state.bird.pos.y = 0.0;
        assert_eq!(check(&mut state), CollisionResult::Clear);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_pass_scores_once() {
        let mut state = GameState::new(1);
        let idx = obstacles::spawn_pair_at(&mut state, 0.0);
        state.pipes[idx].x = BIRD_X - 0.01;
        assert_eq!(check(&mut state), CollisionResult::Clear);
        assert_eq!(state.score, 1);
        assert!(state.pipes[idx].passed);
        check(&mut state);
        check(&mut state);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_beak_hits_pipe_ahead() {
        let mut state = GameState::new(1);
        let idx = obstacles::spawn_pair_at(&mut state, 0.0);
        // Pipe's left face 0.3 ahead of the bird center, inside beak reach
        state.pipes[idx].x = BIRD_X + 0.3 + PIPE_WIDTH / 2.0;
        state.bird.pos.y = 0.95;
        let id = state.pipes[idx].id;
        assert_eq!(check(&mut state), CollisionResult::Pipe(id));
    }

    #[test]
    fn test_tail_clears_pipe_behind() {
        let mut state = GameState::new(1);
        let idx = obstacles::spawn_pair_at(&mut state, 0.0);
        // Same gap offset behind the bird is out of reach
        state.pipes[idx].x = BIRD_X - 0.3 - PIPE_WIDTH / 2.0;
        state.bird.pos.y = 0.95;
        assert_eq!(check(&mut state), CollisionResult::Clear);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_level_with_bird_does_not_score() {
        let mut state = GameState::new(1);
        let idx = obstacles::spawn_pair_at(&mut state, 0.0);
        state.pipes[idx].x = BIRD_X;
        check(&mut state);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_hit_stops_scoring_later_pipes() {
        let mut state = GameState::new(1);
        let hit = obstacles::spawn_pair_at(&mut state, 2.0);
        state.pipes[hit].x = BIRD_X;
        let passed = obstacles::spawn_pair_at(&mut state, 0.0);
        state.pipes[passed].x = BIRD_X - 3.0;
        assert!(check(&mut state).is_hit());
        assert_eq!(state.score, 0);
        assert!(!state.pipes[passed].passed);
    }
}
