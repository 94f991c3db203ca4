//! Core state types for the particle swarm.
//!
//! - `Particle`   position/velocity pair using `NVec3`
//! - `SwarmState` the fixed-size particle buffer, the smoothed display color
//!   and the per-particle transform buffer handed to the renderer
//!
//! The particle buffer is allocated once and never resized; `reset` swaps in a
//! complete replacement so a half-reset swarm is never observable.

use nalgebra::Vector3;
use rand::Rng;

use super::color::Rgb;
use super::engine::Engine;
use super::frame::InstanceTransform;
use super::integrator::seed_particles;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: NVec3, // position
    pub v: NVec3, // velocity, in world units per tick
}

/// Owned simulation state for one swarm.
#[derive(Debug, Clone)]
pub struct SwarmState {
    pub(crate) engine: Engine,
    pub(crate) particles: Vec<Particle>,
    pub(crate) current_color: Rgb, // smoothed display color
    pub(crate) instances: Vec<InstanceTransform>, // rewritten every tick
    pub(crate) t: f64, // accumulated simulated time
    pub(crate) ticks: u64,
}

impl SwarmState {
    pub(crate) fn from_particles(engine: Engine, particles: Vec<Particle>) -> Self {
        let instances = particles.iter().map(InstanceTransform::from_particle).collect();
        Self {
            engine,
            particles,
            current_color: Rgb::WHITE,
            instances,
            t: 0.0,
            ticks: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of the particles. A slice, so the count cannot change.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn current_color(&self) -> Rgb {
        self.current_color
    }

    /// Overrides the smoothed color, e.g. to start a swarm already at its target.
    pub fn set_current_color(&mut self, color: Rgb) {
        self.current_color = color;
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Re-seed every particle at once. The new buffer is built completely
    /// before it replaces the old one.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let fresh = seed_particles(self.particles.len(), self.engine.init_radius, rng);
        self.particles = fresh;
        for (inst, p) in self.instances.iter_mut().zip(self.particles.iter()) {
            *inst = InstanceTransform::from_particle(p);
        }
    }

    /// Aggregate distance/speed figures, used for reporting and tests.
    pub fn stats(&self) -> SwarmStats {
        let n = self.particles.len();
        if n == 0 {
            return SwarmStats::default();
        }

        let mut sum_r = 0.0;
        let mut max_r: f64 = 0.0;
        let mut sum_speed = 0.0;
        for p in &self.particles {
            let r = p.x.norm();
            sum_r += r;
            max_r = max_r.max(r);
            sum_speed += p.v.norm();
        }

        SwarmStats {
            mean_distance: sum_r / n as f64,
            max_distance: max_r,
            mean_speed: sum_speed / n as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwarmStats {
    pub mean_distance: f64, // mean distance from origin
    pub max_distance: f64,
    pub mean_speed: f64, // mean |v| (units per tick)
}
