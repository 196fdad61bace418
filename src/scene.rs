//! Draw instances for the external renderer
//!
//! The game never draws. Each frame it flattens its state into a list of
//! positioned, scaled, colored instances that the JS 3D layer turns into
//! meshes. Instances are plain `f32` records so the whole list can be handed
//! over as one `Float32Array`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::consts::*;
use crate::sim::scenery::colors;
use crate::sim::{GameState, ambient};

/// Mesh the renderer should use for an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum InstanceKind {
    Bird = 0,
    PipeTop = 1,
    PipeBottom = 2,
    Pickup = 3,
    Cloud = 4,
    Sun = 5,
    Moon = 6,
    Particle = 7,
    Ground = 8,
}

/// One drawable: kind, position, scale, z-rotation, color (12 floats)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneInstance {
    /// `InstanceKind` as a float, so the record stays all-`f32`
    pub kind: f32,
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub rotation: f32,
    pub color: [f32; 4],
}

/// Floats per instance in the flat buffer
pub const INSTANCE_FLOATS: usize = std::mem::size_of::<SceneInstance>() / std::mem::size_of::<f32>();

impl SceneInstance {
    pub fn new(kind: InstanceKind, position: Vec3, scale: Vec3, rotation: f32, color: [f32; 4]) -> Self {
        Self {
            kind: kind as u32 as f32,
            position: position.to_array(),
            scale: scale.to_array(),
            rotation,
            color,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default)]
pub struct SceneFrame {
    pub sky_color: [f32; 3],
    pub light_intensity: f32,
    pub instances: Vec<SceneInstance>,
}

impl SceneFrame {
    /// Instances as one flat float slice
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// Flatten the game state into draw instances
pub fn build(state: &GameState) -> SceneFrame {
    let phase = state.ambient_phase;
    let mut instances = Vec::with_capacity(
        8 + state.pipes.len() * 2 + state.pickups.len() + state.scenery.particles.len(),
    );

    // Only the body above the baseline is drawn
    if ambient::sun_visible(phase) {
        instances.push(SceneInstance::new(
            InstanceKind::Sun,
            ambient::sun_position(phase),
            Vec3::splat(1.0),
            0.0,
            colors::SUN,
        ));
    }
    if ambient::moon_visible(phase) {
        instances.push(SceneInstance::new(
            InstanceKind::Moon,
            ambient::moon_position(phase),
            Vec3::splat(0.7),
            0.0,
            colors::MOON,
        ));
    }

    for cloud in &state.scenery.clouds {
        instances.push(SceneInstance::new(
            InstanceKind::Cloud,
            cloud.pos,
            Vec3::new(1.6, 0.6, 0.6) * cloud.scale,
            0.0,
            colors::CLOUD,
        ));
    }

    instances.push(SceneInstance::new(
        InstanceKind::Ground,
        Vec3::new(0.0, GROUND_Y, 0.0),
        Vec3::new(100.0, 1.0, 3.0),
        0.0,
        colors::GROUND,
    ));

    for pipe in &state.pipes {
        instances.push(SceneInstance::new(
            InstanceKind::PipeTop,
            Vec3::new(pipe.x, pipe.top_center_y(), 0.0),
            Vec3::new(PIPE_WIDTH, pipe.top_height(), PIPE_DEPTH),
            0.0,
            colors::PIPE,
        ));
        instances.push(SceneInstance::new(
            InstanceKind::PipeBottom,
            Vec3::new(pipe.x, pipe.bottom_center_y(), 0.0),
            Vec3::new(PIPE_WIDTH, pipe.bottom_height(), PIPE_DEPTH),
            0.0,
            colors::PIPE,
        ));
    }

    for pickup in &state.pickups {
        instances.push(SceneInstance::new(
            InstanceKind::Pickup,
            pickup.pos,
            Vec3::splat(PICKUP_HALF_EXTENT * 2.0),
            pickup.spin,
            colors::pickup(pickup.kind),
        ));
    }

    let bird = &state.bird;
    instances.push(SceneInstance::new(
        InstanceKind::Bird,
        bird.pos,
        Vec3::splat(BIRD_RADIUS),
        bird.rotation,
        if bird.shielded {
            colors::BIRD_SHIELDED
        } else {
            colors::BIRD
        },
    ));

    for particle in &state.scenery.particles {
        let mut color = particle.color;
        color[3] *= particle.life.clamp(0.0, 1.0);
        instances.push(SceneInstance::new(
            InstanceKind::Particle,
            particle.pos,
            Vec3::splat(particle.size),
            0.0,
            color,
        ));
    }

    SceneFrame {
        sky_color: ambient::sky_color(phase),
        light_intensity: ambient::light_intensity(phase),
        instances,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{obstacles, start_run};

    fn count(frame: &SceneFrame, kind: InstanceKind) -> usize {
        frame
            .instances
            .iter()
            .filter(|i| i.kind == kind as u32 as f32)
            .count()
    }

    #[test]
    fn test_instance_is_twelve_floats() {
        assert_eq!(INSTANCE_FLOATS, 12);
    }

    #[test]
    fn test_idle_scene_has_backdrop_and_bird() {
        let state = GameState::new(1);
        let frame = build(&state);
        assert_eq!(count(&frame, InstanceKind::Bird), 1);
        // Midnight: moon only
        assert_eq!(count(&frame, InstanceKind::Sun), 0);
        assert_eq!(count(&frame, InstanceKind::Moon), 1);
        assert_eq!(count(&frame, InstanceKind::Ground), 1);
        assert_eq!(count(&frame, InstanceKind::PipeTop), 0);
        assert_eq!(frame.as_floats().len(), frame.instances.len() * INSTANCE_FLOATS);
    }

    #[test]
    fn test_noon_shows_sun_above_baseline() {
        let mut state = GameState::new(1);
        state.ambient_phase = 0.5;
        let frame = build(&state);
        assert_eq!(count(&frame, InstanceKind::Moon), 0);
        let sun = frame
            .instances
            .iter()
            .find(|i| i.kind == InstanceKind::Sun as u32 as f32)
            .unwrap();
        assert!(sun.position[1] > CELESTIAL_BASELINE);
    }

    #[test]
    fn test_pipes_emit_two_barriers() {
        let mut state = GameState::new(1);
        start_run(&mut state);
        obstacles::spawn_pair_at(&mut state, 0.5);
        let frame = build(&state);
        assert_eq!(count(&frame, InstanceKind::PipeTop), 2);
        assert_eq!(count(&frame, InstanceKind::PipeBottom), 2);

        let top = frame
            .instances
            .iter()
            .rev()
            .find(|i| i.kind == InstanceKind::PipeTop as u32 as f32)
            .copied()
            .unwrap();
        // Bottom edge of the top barrier sits on the gap
        assert!((top.position[1] - top.scale[1] / 2.0 - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_shielded_bird_changes_color() {
        let mut state = GameState::new(1);
        state.bird.shielded = true;
        let frame = build(&state);
        let bird = frame
            .instances
            .iter()
            .find(|i| i.kind == InstanceKind::Bird as u32 as f32)
            .unwrap();
        assert_eq!(bird.color, colors::BIRD_SHIELDED);
    }
}
