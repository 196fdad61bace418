//! Game state and core simulation types
//!
//! `GameState` is the whole session: everything the frame loop touches lives
//! here and is passed by `&mut` to each component.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scenery::Scenery;
use super::timers::Scheduler;
use crate::Aabb;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start prompt showing, nothing moves
    Idle,
    /// Active run
    Running,
    /// Run ended, waiting for an explicit restart
    Ended,
}

/// Things that happened during a tick, for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RunStarted,
    Jump,
    /// Score went up (pipe passed or bonus)
    Score,
    PickupCollected(PickupKind),
    GameOver { score: u64 },
    NewHighScore(u64),
}

/// The player
#[derive(Debug, Clone)]
pub struct Bird {
    pub pos: Vec3,
    /// Vertical velocity (world units per frame, up is positive)
    pub vel: f32,
    /// Pitch around z, derived from velocity
    pub rotation: f32,
    /// Shield visuals active (does not prevent collisions)
    pub shielded: bool,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec3::new(BIRD_X, BIRD_START_Y, 0.0),
            vel: 0.0,
            rotation: 0.0,
            shielded: false,
        }
    }
}

impl Bird {
    /// Put the bird back at the start of the lane, at rest
    pub fn reset(&mut self) {
        self.pos = Vec3::new(BIRD_X, BIRD_START_Y, 0.0);
        self.vel = 0.0;
        self.rotation = 0.0;
    }

    /// Body plus beak and eyes, unrotated
    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.pos - Vec3::new(BIRD_RADIUS, BIRD_RADIUS, BIRD_HALF_DEPTH),
            max: self.pos + Vec3::new(BIRD_BEAK_REACH, BIRD_RADIUS, BIRD_HALF_DEPTH),
        }
    }
}

/// A top and bottom barrier sharing one x and one gap
#[derive(Debug, Clone)]
pub struct PipePair {
    pub id: u32,
    pub x: f32,
    pub gap_center: f32,
    /// Gap size captured at spawn time
    pub gap_size: f32,
    /// Scoring latch
    pub passed: bool,
}

impl PipePair {
    pub fn new(id: u32, x: f32, gap_center: f32, gap_size: f32) -> Self {
        Self {
            id,
            x,
            gap_center,
            gap_size,
            passed: false,
        }
    }

    /// Height of the top barrier (from the gap up to the world top)
    pub fn top_height(&self) -> f32 {
        WORLD_TOP - (self.gap_center + self.gap_size / 2.0)
    }

    /// Height of the bottom barrier (from the gap down past the floor)
    pub fn bottom_height(&self) -> f32 {
        WORLD_BOTTOM_OFFSET + (self.gap_center - self.gap_size / 2.0)
    }

    pub fn top_center_y(&self) -> f32 {
        self.gap_center + self.gap_size / 2.0 + self.top_height() / 2.0
    }

    pub fn bottom_center_y(&self) -> f32 {
        self.gap_center - self.gap_size / 2.0 - self.bottom_height() / 2.0
    }

    /// Lowest y of the top barrier
    pub fn top_bottom_edge(&self) -> f32 {
        self.top_center_y() - self.top_height() / 2.0
    }

    /// Highest y of the bottom barrier
    pub fn bottom_top_edge(&self) -> f32 {
        self.bottom_center_y() + self.bottom_height() / 2.0
    }

    pub fn top_aabb(&self) -> Aabb {
        Aabb::from_center(
            Vec3::new(self.x, self.top_center_y(), 0.0),
            Vec3::new(PIPE_WIDTH / 2.0, self.top_height() / 2.0, PIPE_DEPTH / 2.0),
        )
    }

    pub fn bottom_aabb(&self) -> Aabb {
        Aabb::from_center(
            Vec3::new(self.x, self.bottom_center_y(), 0.0),
            Vec3::new(PIPE_WIDTH / 2.0, self.bottom_height() / 2.0, PIPE_DEPTH / 2.0),
        )
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Shield,
    SlowTime,
    ExtraLife,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Shield, PickupKind::SlowTime, PickupKind::ExtraLife];
}

/// A collectible floating in a gap
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec3,
    /// Cosmetic spin angle (radians)
    pub spin: f32,
    pub active: bool,
}

impl Pickup {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec3::splat(PICKUP_HALF_EXTENT))
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score seen by this session (loaded from storage by the driver)
    pub high_score: u64,
    /// Frames simulated in the current run
    pub time_ticks: u64,
    /// Live gameplay knobs
    pub settings: Settings,
    pub bird: Bird,
    /// Active pipes, oldest first
    pub pipes: Vec<PipePair>,
    pub pickups: Vec<Pickup>,
    /// x of the newest pipe, used by the spawn gate
    pub last_pipe_x: f32,
    /// Spawn clock and deferred effects
    pub scheduler: Scheduler,
    /// Day/night cycle position in [0, 1)
    pub ambient_phase: f32,
    /// Clouds and particles (cosmetic)
    pub scenery: Scenery,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new idle session with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let scenery = Scenery::new(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            time_ticks: 0,
            settings: Settings::default(),
            bird: Bird::default(),
            pipes: Vec::new(),
            pickups: Vec::new(),
            last_pipe_x: 0.0,
            scheduler: Scheduler::default(),
            ambient_phase: 0.0,
            scenery,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert!(state.pickups.is_empty());
        assert_eq!(state.bird.pos, Vec3::new(BIRD_X, BIRD_START_Y, 0.0));
    }

    #[test]
    fn test_pipe_geometry_example() {
        let pipe = PipePair::new(1, SPAWN_X, 0.5, 2.0);
        assert!((pipe.top_bottom_edge() - 1.5).abs() < 1e-5);
        assert!((pipe.bottom_top_edge() - -0.5).abs() < 1e-5);
        assert!((pipe.top_height() - 8.5).abs() < 1e-5);
        assert!((pipe.bottom_height() - 9.5).abs() < 1e-5);
        // Top barrier reaches the world top
        assert!((pipe.top_aabb().max.y - WORLD_TOP).abs() < 1e-5);
    }

    #[test]
    fn test_bird_box_includes_beak() {
        let bird = Bird::default();
        let aabb = bird.aabb();
        assert!((aabb.max.x - (BIRD_X + BIRD_BEAK_REACH)).abs() < 1e-6);
        assert!((aabb.min.x - (BIRD_X - BIRD_RADIUS)).abs() < 1e-6);
        assert!((aabb.max.z - BIRD_HALF_DEPTH).abs() < 1e-6);
        assert!((aabb.max.y - (BIRD_START_Y + BIRD_RADIUS)).abs() < 1e-6);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
