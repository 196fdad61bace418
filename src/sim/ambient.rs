//! Day/night cycle
//!
//! A phase in [0, 1) advances a little every frame and wraps. Everything
//! visual (sun and moon placement, light intensity, sky color) is a pure
//! function of the phase.

use glam::Vec3;

use crate::consts::*;
use crate::{lerp_color, rgb};

/// Named sky colors, with the phase at which each is reached
///
/// The last keyframe holds night from 0.9 until the wrap back to 0.0.
pub const SKY_KEYFRAMES: [(f32, [f32; 3]); 7] = [
    (0.00, rgb(0x0b1026)), // night
    (0.20, rgb(0x3b3b6d)), // dawn
    (0.30, rgb(0xff9e6b)), // sunrise
    (0.40, rgb(0x87ceeb)), // day
    (0.70, rgb(0xff7e4f)), // sunset
    (0.80, rgb(0x4a3a6b)), // dusk
    (0.90, rgb(0x0b1026)), // night
];

/// Advance the phase by one frame
#[inline]
pub fn advance(phase: f32) -> f32 {
    (phase + AMBIENT_STEP).rem_euclid(1.0)
}

/// Sun angle along its arc; 0 at sunrise, π/2 at noon, π at sunset
#[inline]
pub fn sun_angle(phase: f32) -> f32 {
    (phase - 0.25) * std::f32::consts::TAU
}

fn orbit(angle: f32) -> Vec3 {
    Vec3::new(
        -angle.cos() * CELESTIAL_RADIUS,
        angle.sin() * CELESTIAL_RADIUS + CELESTIAL_BASELINE,
        CELESTIAL_Z,
    )
}

/// Sun position (rises on the left, sets on the right)
pub fn sun_position(phase: f32) -> Vec3 {
    orbit(sun_angle(phase))
}

/// Moon position, opposite the sun
pub fn moon_position(phase: f32) -> Vec3 {
    orbit(sun_angle(phase) + std::f32::consts::PI)
}

/// Whether an orbit angle is on the half of the circle above the baseline
#[inline]
fn above_baseline(angle: f32) -> bool {
    angle.sin() >= 0.0
}

/// Sun is up (its semicircle), including the horizon instant at sunrise
pub fn sun_visible(phase: f32) -> bool {
    above_baseline(sun_angle(phase))
}

/// Moon is up exactly while the sun is strictly down
pub fn moon_visible(phase: f32) -> bool {
    !sun_visible(phase)
}

/// Ambient light intensity, brightest at noon
pub fn light_intensity(phase: f32) -> f32 {
    0.25 + 0.75 * sun_angle(phase).sin().max(0.0)
}

/// Background color for a phase
pub fn sky_color(phase: f32) -> [f32; 3] {
    let phase = phase.rem_euclid(1.0);
    for pair in SKY_KEYFRAMES.windows(2) {
        let (start, from) = pair[0];
        let (end, to) = pair[1];
        if phase < end {
            let t = (phase - start) / (end - start);
            return lerp_color(from, to, t);
        }
    }
    SKY_KEYFRAMES[SKY_KEYFRAMES.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: [f32; 3], b: [f32; 3], eps: f32) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < eps)
    }

    #[test]
    fn test_advance_wraps() {
        let p = advance(1.0 - AMBIENT_STEP / 2.0);
        assert!(p >= 0.0 && p < 1.0);
        assert!(p < AMBIENT_STEP);
    }

    #[test]
    fn test_keyframes_hit_exactly() {
        for (phase, color) in SKY_KEYFRAMES {
            assert!(close(sky_color(phase), color, 1e-5), "phase {}", phase);
        }
    }

    #[test]
    fn test_night_wraps_continuously() {
        assert!(close(sky_color(0.999), sky_color(0.0), 1e-5));
        assert!(close(sky_color(0.95), rgb(0x0b1026), 1e-5));
    }

    #[test]
    fn test_sky_is_continuous_at_boundaries() {
        for (phase, _) in SKY_KEYFRAMES.iter().skip(1) {
            let before = sky_color(phase - 1e-4);
            let after = sky_color(phase + 1e-4);
            assert!(close(before, after, 0.01), "jump at {}", phase);
        }
    }

    #[test]
    fn test_sun_and_moon_arc() {
        // Noon: sun at the top, moon at the bottom
        let sun = sun_position(0.5);
        let moon = moon_position(0.5);
        assert!((sun.y - (CELESTIAL_RADIUS + CELESTIAL_BASELINE)).abs() < 1e-4);
        assert!(moon.y < CELESTIAL_BASELINE);
        // Sunrise on the left, sunset on the right
        assert!(sun_position(0.25).x < 0.0);
        assert!(sun_position(0.75).x > 0.0);
        // Midnight: moon up
        assert!(moon_position(0.0).y > CELESTIAL_BASELINE);
    }

    #[test]
    fn test_one_body_up_at_a_time() {
        assert!(sun_visible(0.5) && !moon_visible(0.5));
        assert!(moon_visible(0.0) && !sun_visible(0.0));
        assert!(sun_visible(0.25));
        for i in 0..100 {
            let phase = i as f32 / 100.0;
            let body = if sun_visible(phase) {
                sun_position(phase)
            } else {
                moon_position(phase)
            };
            assert!(body.y >= CELESTIAL_BASELINE - 1e-4, "phase {}", phase);
        }
    }

    #[test]
    fn test_light_intensity_range() {
        assert!((light_intensity(0.5) - 1.0).abs() < 1e-5);
        assert!((light_intensity(0.0) - 0.25).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn deterministic_and_in_range(phase in 0.0f32..1.0) {
            let a = sky_color(phase);
            prop_assert_eq!(a, sky_color(phase));
            for c in a {
                prop_assert!((0.0..=1.0).contains(&c));
            }
            let i = light_intensity(phase);
            prop_assert!((0.25..=1.0).contains(&i));
        }
    }
}
