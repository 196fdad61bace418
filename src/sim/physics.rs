//! Vertical physics for the bird
//!
//! Integration is frame-coupled: one step per rendered frame, not scaled by
//! wall-clock time. Gravity is applied to the velocity before the position
//! update.

use super::state::Bird;
use crate::consts::{BIRD_MAX_TILT, BIRD_TILT_FACTOR};
use crate::settings::Settings;

/// Advance the bird by one frame
pub fn integrate(bird: &mut Bird, settings: &Settings) {
    bird.vel -= settings.gravity;
    bird.pos.y += bird.vel;
    bird.rotation = tilt_for(bird.vel);
}

/// Set the vertical velocity to the jump impulse (replaces, never adds)
pub fn jump(bird: &mut Bird, settings: &Settings) {
    bird.vel = settings.jump_force;
}

/// Nose-up/nose-down pitch for a velocity
#[inline]
pub fn tilt_for(vel: f32) -> f32 {
    (vel * BIRD_TILT_FACTOR).clamp(-BIRD_MAX_TILT, BIRD_MAX_TILT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings() -> Settings {
        Settings {
            gravity: 0.0018,
            jump_force: 0.05,
            ..Settings::default()
        }
    }

    #[test]
    fn test_one_frame_of_free_fall() {
        let mut bird = Bird::default();
        bird.pos.y = 0.0;
        integrate(&mut bird, &settings());
        assert!((bird.vel - -0.0018).abs() < 1e-7);
        assert!((bird.pos.y - -0.0018).abs() < 1e-7);
    }

    #[test]
    fn test_jump_then_one_frame() {
        let mut bird = Bird::default();
        jump(&mut bird, &settings());
        integrate(&mut bird, &settings());
        assert!((bird.vel - 0.0482).abs() < 1e-6);
        assert!((bird.pos.y - 0.0482).abs() < 1e-6);
    }

    #[test]
    fn test_tilt_is_clamped() {
        assert!((tilt_for(10.0) - BIRD_MAX_TILT).abs() < 1e-6);
        assert!((tilt_for(-10.0) + BIRD_MAX_TILT).abs() < 1e-6);
        assert!((tilt_for(0.05) - 0.15).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn jump_overrides_any_velocity(vel in -5.0f32..5.0, force in 0.01f32..0.2) {
            let mut bird = Bird::default();
            bird.vel = vel;
            let s = Settings { jump_force: force, ..Settings::default() };
            jump(&mut bird, &s);
            prop_assert_eq!(bird.vel, force);
        }

        #[test]
        fn gravity_applies_before_position(y in -2.0f32..2.0, vel in -0.1f32..0.1, g in 0.0005f32..0.005) {
            let mut bird = Bird::default();
            bird.pos.y = y;
            bird.vel = vel;
            let s = Settings { gravity: g, ..Settings::default() };
            integrate(&mut bird, &s);
            let expected_vel = vel - g;
            prop_assert_eq!(bird.vel, expected_vel);
            prop_assert_eq!(bird.pos.y, y + expected_vel);
        }
    }
}
