//! Decorative clouds and particle effects
//!
//! Nothing here affects gameplay. Particles are records with their own
//! remaining life, updated once per frame and dropped when spent.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::PickupKind;

/// Colors for game elements (RGBA)
pub mod colors {
    use super::PickupKind;

    pub const BIRD: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const BIRD_SHIELDED: [f32; 4] = [0.4, 0.9, 1.0, 1.0];
    pub const PIPE: [f32; 4] = [0.0, 0.667, 0.0, 1.0];
    pub const GROUND: [f32; 4] = [0.545, 0.271, 0.075, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.85];
    pub const SUN: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
    pub const MOON: [f32; 4] = [0.9, 0.92, 1.0, 1.0];
    pub const SPARK: [f32; 4] = [1.0, 0.95, 0.5, 1.0];
    pub const CRASH: [f32; 4] = [1.0, 0.4, 0.1, 1.0];

    pub fn pickup(kind: PickupKind) -> [f32; 4] {
        match kind {
            PickupKind::Shield => [0.3, 0.7, 1.0, 1.0],
            PickupKind::SlowTime => [0.7, 0.4, 1.0, 1.0],
            PickupKind::ExtraLife => [1.0, 0.3, 0.4, 1.0],
        }
    }
}

/// Number of clouds kept on screen
pub const CLOUD_COUNT: usize = 6;
/// Clouds scroll this fraction of the pipe speed (parallax)
pub const CLOUD_PARALLAX: f32 = 0.3;
pub const CLOUD_WRAP_LEFT: f32 = -15.0;
pub const CLOUD_WRAP_RIGHT: f32 = 15.0;

/// Maximum particles alive at once
pub const MAX_PARTICLES: usize = 256;
/// Downward pull on particles (units/s²)
const PARTICLE_GRAVITY: f32 = 4.0;

/// A background cloud
#[derive(Debug, Clone)]
pub struct Cloud {
    pub pos: Vec3,
    pub scale: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub color: [f32; 4],
    /// Seconds left
    pub life: f32,
    pub size: f32,
}

/// All cosmetic entities
#[derive(Debug, Clone, Default)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
    pub particles: Vec<Particle>,
}

impl Scenery {
    /// Scatter the initial clouds across the sky
    pub fn new(rng: &mut Pcg32) -> Self {
        let clouds = (0..CLOUD_COUNT)
            .map(|i| {
                let span = CLOUD_WRAP_RIGHT - CLOUD_WRAP_LEFT;
                let x = CLOUD_WRAP_LEFT + span * (i as f32 + 0.5) / CLOUD_COUNT as f32;
                random_cloud(rng, x)
            })
            .collect();
        Self {
            clouds,
            particles: Vec::new(),
        }
    }

    /// Drift clouds left, wrapping the ones that leave the screen
    pub fn update_clouds(&mut self, rng: &mut Pcg32, speed: f32) {
        for cloud in self.clouds.iter_mut() {
            cloud.pos.x -= speed * CLOUD_PARALLAX;
            if cloud.pos.x < CLOUD_WRAP_LEFT {
                *cloud = random_cloud(rng, CLOUD_WRAP_RIGHT);
            }
        }
    }

    /// Integrate particles and drop dead ones
    pub fn update_particles(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel.y -= PARTICLE_GRAVITY * dt;
            particle.life -= dt;
            particle.size *= 0.98;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Spray `count` particles out from `origin`
    pub fn burst(&mut self, rng: &mut Pcg32, origin: Vec3, color: [f32; 4], count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(1.0..3.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec3::new(angle.cos() * speed, angle.sin() * speed, 0.0),
                color,
                life: rng.random_range(0.4..0.8),
                size: rng.random_range(0.04..0.09),
            });
        }
    }

    /// Stop every running effect (run reset)
    pub fn clear_particles(&mut self) {
        self.particles.clear();
    }
}

fn random_cloud(rng: &mut Pcg32, x: f32) -> Cloud {
    Cloud {
        pos: Vec3::new(x, rng.random_range(1.0..4.0), rng.random_range(-8.0..-4.0)),
        scale: rng.random_range(0.6..1.4),
    }
}
