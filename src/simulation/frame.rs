//! Data-only per-particle transforms handed to an external renderer.

use super::color::Rgb;
use super::params::{BASE_SCALE, MAX_SPEED_SCALE, SPEED_SCALE_GAIN};
use super::states::{NVec3, Particle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub position: NVec3,
    pub rotation_delta: NVec3, // radians to add about x, y, z this tick
    pub scale: f64, // uniform scale
}

impl InstanceTransform {
    /// Derived fresh from the particle: position as-is, rotation increment
    /// equal to the velocity components, scale growing with speed.
    #[inline]
    pub fn from_particle(p: &Particle) -> Self {
        let speed = p.v.norm();
        Self {
            position: p.x,
            rotation_delta: p.v,
            scale: BASE_SCALE + (speed * SPEED_SCALE_GAIN).min(MAX_SPEED_SCALE),
        }
    }
}

/// Output of one tick. Borrows the swarm's transform buffer.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub instances: &'a [InstanceTransform],
    pub color: Rgb, // smoothed swarm color
    pub tick: u64, // ticks completed, including this one
}
