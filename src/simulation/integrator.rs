//! Swarm seeding and the per-tick integrator
//!
//! `initialize` fills a sphere with uniformly distributed particles and small
//! random velocities. `tick` runs one force/integration pass over every
//! particle, applies boundary recycling, smooths the display color and
//! refreshes the transform buffer. Neither function can fail; whatever the
//! config holds (NaN included) flows straight through the arithmetic.

use std::f64::consts::TAU;

use rand::Rng;

use super::engine::Engine;
use super::forces::ForceSet;
use super::frame::{InstanceTransform, RenderFrame};
use super::params::{SimulationConfig, BOUNDARY_RADIUS2, COLOR_SMOOTHING, RECALL_FACTOR};
use super::states::{NVec3, Particle, SwarmState};

/// Half-width of the per-axis seed velocity noise.
pub const SEED_VELOCITY: f64 = 0.005;

/// Smallest seeding radius, keeps every particle off the origin.
pub const MIN_SEED_RADIUS: f64 = 1e-6;

/// Build a swarm of `particle_count` particles with default engine settings.
pub fn initialize<R: Rng>(particle_count: usize, rng: &mut R) -> SwarmState {
    initialize_with(Engine::default(), particle_count, rng)
}

/// Build a swarm with explicit engine settings.
pub fn initialize_with<R: Rng>(engine: Engine, particle_count: usize, rng: &mut R) -> SwarmState {
    let particles = seed_particles(particle_count, engine.init_radius, rng);
    SwarmState::from_particles(engine, particles)
}

/// Fresh particle buffer: uniform volumetric density inside `radius`,
/// per-axis velocity noise in `[-SEED_VELOCITY, SEED_VELOCITY)`.
pub fn seed_particles<R: Rng>(n: usize, radius: f64, rng: &mut R) -> Vec<Particle> {
    (0..n)
        .map(|_| Particle {
            x: sample_in_sphere(radius, rng),
            v: NVec3::new(
                rng.gen_range(-SEED_VELOCITY..SEED_VELOCITY),
                rng.gen_range(-SEED_VELOCITY..SEED_VELOCITY),
                rng.gen_range(-SEED_VELOCITY..SEED_VELOCITY),
            ),
        })
        .collect()
}

/// Uniform point inside a sphere centred at the origin.
pub fn sample_in_sphere<R: Rng>(radius: f64, rng: &mut R) -> NVec3 {
    // cube root for uniform volume density
    let r = (radius * rng.gen::<f64>().cbrt()).max(MIN_SEED_RADIUS);
    let theta = rng.gen_range(0.0..TAU);
    let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();

    NVec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Advance the swarm by one tick.
///
/// `raw_dt` is clamped to the engine's `max_step`, then scaled by
/// `config.speed`. When the resulting step is exactly zero the swarm is left
/// frozen; color smoothing and the transform refresh still run, since they
/// are per call rather than per unit time.
pub fn tick<'a, R: Rng>(
    state: &'a mut SwarmState,
    config: &SimulationConfig,
    cursor: NVec3,
    raw_dt: f64,
    rng: &mut R,
) -> RenderFrame<'a> {
    let profile = config.mode.profile();
    // NaN passes through unclamped
    let max_step = state.engine.max_step;
    let step = if raw_dt > max_step { max_step } else { raw_dt };
    let dt = step * config.speed;

    if dt != 0.0 {
        let forces = ForceSet::new(config, profile, cursor);
        let drag = state.engine.drag_factor(profile.drag, step);

        for p in state.particles.iter_mut() {
            // v += forces(x) * dt, then damp
            forces.accumulate(&p.x, dt, rng, &mut p.v);
            p.v *= drag;

            // x_n+1 = x_n + v_n+1 (v is per tick)
            p.x += p.v;

            if profile.recycle && p.x.norm_squared() > BOUNDARY_RADIUS2 {
                p.x *= RECALL_FACTOR;
                p.v *= RECALL_FACTOR;
            }
        }

        state.t += dt;
    }

    state.current_color = state.current_color.lerp(&config.color, COLOR_SMOOTHING);
    state.ticks += 1;

    for (inst, p) in state.instances.iter_mut().zip(state.particles.iter()) {
        *inst = InstanceTransform::from_particle(p);
    }

    RenderFrame {
        instances: &state.instances,
        color: state.current_color,
        tick: state.ticks,
    }
}
