//! Simulation configuration, force-profile table and physical constants
//!
//! `SimulationConfig` is the snapshot an external driver hands to every tick:
//! - target color and informational label,
//! - active `Mode`,
//! - gravity, chaos and speed scalars.
//!
//! Each `Mode` maps to a `ForceProfile` row in `PROFILES`, which decides the
//! central-force strength, drag, and whether curl and boundary recycling run.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::color::Rgb;
use crate::configuration::config::ConfigError;

// Central force
pub const GRAVITY_SCALE: f64 = -0.5; // g = GRAVITY_SCALE * config.gravity
pub const CENTER_EPSILON: f64 = 1e-2; // below this radius the central force is skipped

// Orbital curl around +y
pub const CURL_STRENGTH: f64 = 1.5;

// Cursor repulsor
pub const CURSOR_RADIUS2: f64 = 9.0; // interaction radius 3
pub const CURSOR_STRENGTH: f64 = 5.0;
pub const CURSOR_SOFTENING: f64 = 0.1;

// Jitter: uniform(-0.5, 0.5) * chaos * dt * JITTER_GAIN
pub const JITTER_GAIN: f64 = 2.0;

// Boundary recycling
pub const BOUNDARY_RADIUS2: f64 = 900.0; // radius 30
pub const RECALL_FACTOR: f64 = 0.1;

// Display
pub const COLOR_SMOOTHING: f64 = 0.1;
pub const BASE_SCALE: f64 = 0.1;
pub const SPEED_SCALE_GAIN: f64 = 0.5;
pub const MAX_SPEED_SCALE: f64 = 0.4;

/// Active force-profile selector.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum Mode {
    Orbit,
    Atomic,
    Float,
    Vortex,
    Explosion,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Orbit, Mode::Atomic, Mode::Float, Mode::Vortex, Mode::Explosion];

    pub fn profile(self) -> &'static ForceProfile {
        &PROFILES[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Orbit => "ORBIT",
            Mode::Atomic => "ATOMIC",
            Mode::Float => "FLOAT",
            Mode::Vortex => "VORTEX",
            Mode::Explosion => "EXPLOSION",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    /// Case-insensitive, so both `"VORTEX"` and `"vortex"` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
    }
}

impl TryFrom<String> for Mode {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// How the central-force strength is chosen for a mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CentralStrength {
    /// `GRAVITY_SCALE * config.gravity`
    FromGravity,
    /// Fixed strength, ignores `config.gravity`. Positive pushes outward.
    Fixed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceProfile {
    pub central: CentralStrength,
    pub drag: f64, // per-tick velocity multiplier
    pub curl: bool, // orbital curl around the vertical axis
    pub recycle: bool, // soft pull-back beyond BOUNDARY_RADIUS2
}

impl ForceProfile {
    pub fn central_strength(&self, gravity: f64) -> f64 {
        match self.central {
            CentralStrength::FromGravity => GRAVITY_SCALE * gravity,
            CentralStrength::Fixed(g) => g,
        }
    }
}

/// Indexed by `Mode as usize`; keep in declaration order.
pub const PROFILES: [ForceProfile; 5] = [
    // ORBIT
    ForceProfile { central: CentralStrength::FromGravity, drag: 0.96, curl: true, recycle: true },
    // ATOMIC
    ForceProfile { central: CentralStrength::FromGravity, drag: 0.96, curl: false, recycle: true },
    // FLOAT
    ForceProfile { central: CentralStrength::Fixed(-0.05), drag: 0.96, curl: false, recycle: true },
    // VORTEX
    ForceProfile { central: CentralStrength::Fixed(-3.0), drag: 0.96, curl: true, recycle: true },
    // EXPLOSION
    ForceProfile { central: CentralStrength::Fixed(15.0), drag: 0.99, curl: false, recycle: false },
];

/// Configuration snapshot consumed by each tick. Replaced wholesale by the
/// driver; the integrator never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub color: Rgb, // target color
    pub mode: Mode,
    pub gravity: f64, // central-force scale, sign flips direction
    pub chaos: f64, // jitter scale
    pub speed: f64, // time-scale multiplier on the clamped step
    pub label: String, // display text only
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            color: Rgb::new(0.27, 0.67, 1.0),
            mode: Mode::Orbit,
            gravity: 1.0,
            chaos: 0.1,
            speed: 1.0,
            label: String::new(),
        }
    }
}

/// Run-level numerical settings for the scenario driver.
#[derive(Debug, Clone)]
pub struct RunParams {
    pub ticks: u64, // number of ticks to run
    pub dt: f64, // raw frame delta fed to each tick
    pub seed: u64, // deterministic seed
    pub report_every: u64, // log cadence in ticks, 0 = never
}
