//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Wall-clock time only enters through the `dt` passed to `tick`
//! - No rendering or platform dependencies

pub mod ambient;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod pickups;
pub mod scenery;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::CollisionResult;
pub use scenery::{Cloud, Particle, Scenery};
pub use state::{Bird, GameEvent, GamePhase, GameState, Pickup, PickupKind, PipePair};
pub use tick::{TickInput, end_run, start_run, tick};
pub use timers::{DeferredAction, Scheduler, SpawnClock};
