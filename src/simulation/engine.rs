//! Swarm-lifetime engine settings
//!
//! Fixed at construction: seeding radius, maximum raw step and the damping
//! model applied by every tick.

use crate::configuration::config::DampingConfig;

pub const DEFAULT_PARTICLE_COUNT: usize = 1600;
pub const DEFAULT_INIT_RADIUS: f64 = 4.0;
pub const DEFAULT_MAX_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub init_radius: f64, // seeding sphere radius
    pub max_step: f64, // raw frame delta is clamped to this (seconds)
    pub damping: DampingConfig, // per-tick or frame-rate normalized
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            init_radius: DEFAULT_INIT_RADIUS,
            max_step: DEFAULT_MAX_STEP,
            damping: DampingConfig::PerTick,
        }
    }
}

impl Engine {
    /// Velocity multiplier for one tick given the profile's `drag` and the
    /// clamped wall-clock step (before `speed` scaling).
    #[inline]
    pub fn drag_factor(&self, drag: f64, step: f64) -> f64 {
        match self.damping {
            DampingConfig::PerTick => drag,
            DampingConfig::FrameRateNormalized { reference_fps } => {
                drag.powf(step.abs() * reference_fps)
            }
        }
    }
}
