//! Sky Flap - a 3D flappy-bird arcade game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, pickups, collisions, day/night)
//! - `driver`: Frame clock that feeds the simulation and persists the best score
//! - `scene`: Flat draw instances for the external 3D renderer
//! - `platform`: Browser input mapping (keys, touch, tilt)
//! - `persistence`: Key/value storage (LocalStorage on web, in-memory elsewhere)
//! - `settings`: Live gameplay knobs and difficulty presets

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod driver;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use driver::Driver;
pub use highscores::HighScore;
pub use settings::{Difficulty, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Wall-clock delta assumed for the very first frame
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta fed to the clocks (tab switches, debugger stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Bird lane and start height
    pub const BIRD_X: f32 = -2.0;
    pub const BIRD_START_Y: f32 = 0.0;
    /// Bird body radius (collision half-extent behind, above, below)
    pub const BIRD_RADIUS: f32 = 0.2;
    /// Beak tip ahead of the body center
    pub const BIRD_BEAK_REACH: f32 = 0.35;
    /// Eyes stick out sideways to this depth
    pub const BIRD_HALF_DEPTH: f32 = 0.2;
    /// Rotation = velocity * this, clamped to +-BIRD_MAX_TILT
    pub const BIRD_TILT_FACTOR: f32 = 3.0;
    pub const BIRD_MAX_TILT: f32 = std::f32::consts::FRAC_PI_4;

    /// World bounds that end the run
    pub const FLOOR_Y: f32 = -2.8;
    pub const CEILING_Y: f32 = 3.0;
    /// Ground slab center (cosmetic)
    pub const GROUND_Y: f32 = -3.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 0.8;
    pub const PIPE_DEPTH: f32 = 0.8;
    /// Top barriers extend up to this height
    pub const WORLD_TOP: f32 = 10.0;
    /// Bottom barriers extend this far below the origin
    pub const WORLD_BOTTOM_OFFSET: f32 = 10.0;
    /// Gap centers are drawn uniformly from [GAP_CENTER_MIN, GAP_CENTER_MAX)
    pub const GAP_CENTER_MIN: f32 = -1.5;
    pub const GAP_CENTER_MAX: f32 = 1.5;

    /// Obstacle lifecycle along x
    pub const SPAWN_X: f32 = 10.0;
    /// Newest pipe must have scrolled to this x before another may spawn
    pub const SPAWN_GATE_X: f32 = 5.0;
    pub const DESPAWN_X: f32 = -10.0;
    /// Spawn attempt cadence (seconds)
    pub const SPAWN_INTERVAL: f32 = 0.1;

    /// Pickups
    pub const PICKUP_CHANCE: f64 = 0.1;
    pub const PICKUP_HALF_EXTENT: f32 = 0.25;
    pub const PICKUP_SPIN: f32 = 0.05;
    pub const SHIELD_DURATION: f32 = 5.0;
    pub const SLOW_TIME_DURATION: f32 = 5.0;
    pub const SLOW_TIME_FACTOR: f32 = 0.5;
    pub const EXTRA_LIFE_BONUS: u64 = 5;

    /// Day/night cycle advance per frame
    pub const AMBIENT_STEP: f32 = 0.0002;
    /// Sun/moon orbit radius and the height of its center
    pub const CELESTIAL_RADIUS: f32 = 8.0;
    pub const CELESTIAL_BASELINE: f32 = -1.0;
    /// Celestial bodies sit behind the play field
    pub const CELESTIAL_Z: f32 = -20.0;
}

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box from a center point and half-extents
    pub fn from_center(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap test; touching faces count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Linear interpolation between two RGB colors
#[inline]
pub fn lerp_color(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Convert a 0xRRGGBB hex value to linear-ish [0, 1] RGB
#[inline]
pub const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(0.9, 0.0, 0.0), Vec3::splat(0.5));
        let c = Aabb::from_center(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_touching_counts() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_rgb_and_lerp() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        let mid = lerp_color([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 0.5);
        assert!((mid[1] - 0.5).abs() < 1e-6);
        // t is clamped
        assert_eq!(lerp_color([0.0; 3], [1.0; 3], 2.0), [1.0; 3]);
    }
}
