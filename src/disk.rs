//! Accretion disk particle dynamics.
//!
//! Each particle orbits at the Kepler speed fixed at its creation radius,
//! gets a stochastic turbulence kick every tick, and relaxes its
//! temperature toward the equilibrium value for its current radius.
//! Temperature maps to a discrete color band scaled by a Stefan-Boltzmann
//! brightness factor.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::black_hole::{BlackHole, GRAVITATIONAL_CONSTANT};

const DEFAULT_THICKNESS: f32 = 0.1;
const DEFAULT_TURBULENCE_STRENGTH: f32 = 0.3;
const VERTICAL_TURBULENCE_FACTOR: f32 = 0.1;
const TEMPERATURE_RELAXATION_RATE: f32 = 0.5;

/// One disk particle. Orbital speed is fixed at creation and not
/// re-derived when turbulence shifts the radius.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub temperature: f32,
    pub orbital_speed: f32,
}

/// Particle population orbiting a [`BlackHole`].
///
/// The disk does not own the body; every operation that needs the disk
/// geometry takes it as an argument so a single body can be mutated
/// elsewhere without stale back-references.
pub struct AccretionDisk {
    particles: Vec<Particle>,
    particle_count: usize,
    thickness: f32,
    turbulence_strength: f32,
    rng: StdRng,
}

impl AccretionDisk {
    /// Seeds `particle_count` particles from OS entropy.
    pub fn new(body: &BlackHole, particle_count: usize) -> Self {
        Self::from_rng(body, particle_count, StdRng::from_entropy())
    }

    /// Seeds from a fixed seed for reproducible runs and tests.
    pub fn with_seed(body: &BlackHole, particle_count: usize, seed: u64) -> Self {
        Self::from_rng(body, particle_count, StdRng::seed_from_u64(seed))
    }

    fn from_rng(body: &BlackHole, particle_count: usize, rng: StdRng) -> Self {
        let mut disk = Self {
            particles: Vec::with_capacity(particle_count),
            particle_count,
            thickness: DEFAULT_THICKNESS,
            turbulence_strength: DEFAULT_TURBULENCE_STRENGTH,
            rng,
        };
        disk.seed_particles(body);
        disk
    }

    /// Uniform-random angle and radius within the disk annulus, small
    /// vertical jitter within the thickness.
    fn seed_particles(&mut self, body: &BlackHole) {
        let inner = body.disk_inner_radius();
        let outer = body.disk_outer_radius();

        for _ in 0..self.particle_count {
            let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
            let radius = inner + self.rng.gen::<f32>() * (outer - inner);
            let height = (self.rng.gen::<f32>() - 0.5) * self.thickness;

            let position = Vec3::new(angle.cos() * radius, height, angle.sin() * radius);
            self.particles.push(Particle {
                position,
                temperature: body.disk_temperature(radius),
                orbital_speed: kepler_speed(body.mass(), radius),
            });
        }
    }

    /// Advances every particle by one tick: orbital angle step at the
    /// creation-time speed, turbulence kick, temperature relaxation.
    pub fn update(&mut self, body: &BlackHole, delta_time: f32) {
        for i in 0..self.particles.len() {
            let particle = self.particles[i];
            let radius = planar_radius(particle.position);

            let angle = particle.position.z.atan2(particle.position.x)
                + particle.orbital_speed * delta_time / radius;

            let mut position = Vec3::new(
                angle.cos() * radius,
                particle.position.y,
                angle.sin() * radius,
            );
            position += self.turbulence_kick(delta_time);

            // Relax toward the equilibrium temperature for the post-kick
            // radius; the lag makes radial drift visible as a color trail.
            let target = body.disk_temperature(planar_radius(position));
            let temperature = particle.temperature
                + (target - particle.temperature) * delta_time * TEMPERATURE_RELAXATION_RATE;

            self.particles[i].position = position;
            self.particles[i].temperature = temperature;
        }
    }

    fn turbulence_kick(&mut self, delta_time: f32) -> Vec3 {
        let scale = self.turbulence_strength * delta_time;
        Vec3::new(
            (self.rng.gen::<f32>() - 0.5) * scale,
            (self.rng.gen::<f32>() - 0.5) * scale * VERTICAL_TURBULENCE_FACTOR,
            (self.rng.gen::<f32>() - 0.5) * scale,
        )
    }

    /// Discrete color bands, strict `>` thresholds.
    pub fn color_for_temperature(temperature: f32) -> Vec3 {
        if temperature > 8000.0 {
            Vec3::new(0.9, 0.9, 1.0)
        } else if temperature > 6000.0 {
            Vec3::new(1.0, 1.0, 0.9)
        } else if temperature > 4000.0 {
            Vec3::new(1.0, 0.8, 0.3)
        } else if temperature > 3000.0 {
            Vec3::new(1.0, 0.6, 0.2)
        } else {
            Vec3::new(0.8, 0.2, 0.1)
        }
    }

    /// Stefan-Boltzmann-style `(T / 10000)^4`.
    pub fn brightness_for_temperature(temperature: f32) -> f32 {
        (temperature / 10000.0).powi(4)
    }

    /// Band color scaled by brightness, in particle order.
    pub fn particle_render_colors(&self) -> Vec<Vec3> {
        self.particles
            .iter()
            .map(|p| {
                Self::color_for_temperature(p.temperature)
                    * Self::brightness_for_temperature(p.temperature)
            })
            .collect()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn add_particle(&mut self, body: &BlackHole, position: Vec3) {
        let radius = planar_radius(position);
        self.particles.push(Particle {
            position,
            temperature: body.disk_temperature(radius),
            orbital_speed: kepler_speed(body.mass(), radius),
        });
    }

    /// Out-of-range indices are silently ignored.
    pub fn remove_particle(&mut self, index: usize) {
        if index < self.particles.len() {
            self.particles.remove(index);
        }
    }

    /// Clears and reseeds the original particle count.
    pub fn reset(&mut self, body: &BlackHole) {
        self.particles.clear();
        self.seed_particles(body);
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
    }

    pub fn turbulence_strength(&self) -> f32 {
        self.turbulence_strength
    }

    pub fn set_turbulence_strength(&mut self, strength: f32) {
        self.turbulence_strength = strength;
    }

    pub fn status(&self) -> String {
        let average_temperature = if self.particles.is_empty() {
            0.0
        } else {
            self.particles.iter().map(|p| p.temperature).sum::<f32>()
                / self.particles.len() as f32
        };
        format!(
            "Accretion Disk - Particles: {}, Avg Temp: {:.0}K, Thickness: {:.3}",
            self.particles.len(),
            average_temperature,
            self.thickness
        )
    }
}

fn planar_radius(position: Vec3) -> f32 {
    (position.x * position.x + position.z * position.z).sqrt()
}

/// Circular-orbit speed `sqrt(GM/r)`.
fn kepler_speed(mass: f32, radius: f32) -> f32 {
    (GRAVITATIONAL_CONSTANT * mass / radius).sqrt()
}
