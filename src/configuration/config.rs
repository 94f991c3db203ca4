//! Configuration types for loading swarm scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]   – particle count and swarm-lifetime engine options
//! - [`RunConfig`]      – tick count, raw frame delta, seed, report cadence
//! - [`CursorConfig`]   – where the cursor sits (optionally sweeping a circle)
//! - [`ConfigUpdate`]   – the initial simulation config, merged onto defaults
//! - [`TimelineEvent`]  – scripted config updates / resets at given ticks
//! - [`ScenarioConfig`] – top-level wrapper
//!
//! [`ConfigUpdate`] is also the contract with whatever produces live parameter
//! changes (e.g. a text-to-parameters front end): every field is optional and
//! an omitted field leaves the current value untouched. Values are sanitized
//! on merge so the integrator itself never validates anything.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   particle_count: 1600
//!   init_radius: 4.0
//!   max_step: 0.1
//!   damping: per_tick          # or { frame_rate_normalized: { reference_fps: 60.0 } }
//!
//! run:
//!   ticks: 600
//!   dt: 0.0166667
//!   seed: 42
//!   report_every: 60
//!
//! cursor:
//!   position: [0.0, 0.0, 100.0]
//!   orbit_radius: 0.0
//!   orbit_period: 5.0
//!
//! config:
//!   color: "#44aaff"
//!   mode: ORBIT
//!   gravity: 1.0
//!   chaos: 0.1
//!   speed: 1.0
//!   label: "calm orbit"
//!
//! timeline:
//!   - at_tick: 300
//!     update: { mode: EXPLOSION, color: "#ff5500" }
//!   - at_tick: 450
//!     reset: true
//! ```

use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::color::Rgb;
use crate::simulation::engine::{Engine, DEFAULT_INIT_RADIUS, DEFAULT_MAX_STEP, DEFAULT_PARTICLE_COUNT};
use crate::simulation::params::{Mode, RunParams, SimulationConfig};
use crate::simulation::states::NVec3;

/// Accepted gravity range; values outside are clamped on merge.
pub const GRAVITY_LIMIT: f64 = 5.0;
/// Accepted chaos range.
pub const CHAOS_RANGE: (f64, f64) = (0.0, 1.0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scenario must contain at least one particle")]
    NoParticles,
    #[error("run step must be finite and positive, got {0}")]
    InvalidStep(f64),
    #[error("init radius must be finite and positive, got {0}")]
    InvalidRadius(f64),
    #[error("max step must be finite and positive, got {0}")]
    InvalidMaxStep(f64),
    #[error("reference fps must be finite and positive, got {0}")]
    InvalidReferenceFps(f64),
    #[error("invalid color {0:?}, expected \"#rrggbb\" or [r, g, b]")]
    InvalidColor(String),
    #[error("unknown mode {0:?}, expected one of ORBIT, ATOMIC, FLOAT, VORTEX, EXPLOSION")]
    UnknownMode(String),
    #[error("malformed scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How velocity damping relates to frame time.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DampingConfig {
    /// Multiply by the mode's drag once per tick, whatever the frame time
    PerTick,
    /// `drag ^ (step * reference_fps)`; equals `PerTick` at the reference rate
    FrameRateNormalized { reference_fps: f64 },
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_particle_count")]
    pub particle_count: usize, // fixed for the swarm's lifetime, default 1600
    pub init_radius: Option<f64>, // seeding sphere radius, default 4.0
    pub max_step: Option<f64>, // raw delta clamp in seconds, default 0.1
    pub damping: Option<DampingConfig>, // default per_tick
}

#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    pub ticks: u64, // number of ticks to run
    pub dt: f64, // raw frame delta in seconds
    pub seed: u64, // deterministic seed
    pub report_every: Option<u64>, // log every n ticks, 0 or absent = only at end
}

#[derive(Deserialize, Debug, Clone)]
pub struct CursorConfig {
    pub position: [f64; 3], // centre of the cursor path
    #[serde(default)]
    pub orbit_radius: f64, // > 0 sweeps a circle in the xz plane
    #[serde(default = "default_orbit_period")]
    pub orbit_period: f64, // seconds per revolution
}

fn default_particle_count() -> usize {
    DEFAULT_PARTICLE_COUNT
}

fn default_orbit_period() -> f64 {
    5.0
}

impl Default for CursorConfig {
    /// Parked far from the swarm so it never interacts.
    fn default() -> Self {
        Self {
            position: [0.0, 1.0e6, 0.0],
            orbit_radius: 0.0,
            orbit_period: default_orbit_period(),
        }
    }
}

impl CursorConfig {
    /// Cursor position at simulated wall-clock time `t` (seconds).
    pub fn position_at(&self, t: f64) -> NVec3 {
        let centre = NVec3::from(self.position);
        if self.orbit_radius <= 0.0 || self.orbit_period <= 0.0 {
            return centre;
        }
        let angle = std::f64::consts::TAU * t / self.orbit_period;
        centre + NVec3::new(angle.cos(), 0.0, angle.sin()) * self.orbit_radius
    }
}

/// Partial simulation config. `None` keeps the current value.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub color: Option<Rgb>,
    pub mode: Option<Mode>,
    pub gravity: Option<f64>,
    pub chaos: Option<f64>,
    pub speed: Option<f64>,
    pub label: Option<String>,
}

impl ConfigUpdate {
    /// Copy with non-finite numbers dropped and gravity/chaos clamped to
    /// their accepted ranges. Speed keeps its sign; zero or negative speed
    /// is a legal freeze / reversal.
    pub fn sanitized(&self) -> ConfigUpdate {
        let finite = |x: Option<f64>| x.filter(|v| v.is_finite());
        ConfigUpdate {
            color: self
                .color
                .filter(|c| c.r.is_finite() && c.g.is_finite() && c.b.is_finite()),
            mode: self.mode,
            gravity: finite(self.gravity).map(|g| g.clamp(-GRAVITY_LIMIT, GRAVITY_LIMIT)),
            chaos: finite(self.chaos).map(|c| c.clamp(CHAOS_RANGE.0, CHAOS_RANGE.1)),
            speed: finite(self.speed),
            label: self.label.clone(),
        }
    }

    /// Merge the sanitized update onto `config`. Returns true if the mode
    /// changed.
    pub fn apply_to(&self, config: &mut SimulationConfig) -> bool {
        let clean = self.sanitized();
        let old_mode = config.mode;

        if let Some(color) = clean.color {
            config.color = color;
        }
        if let Some(mode) = clean.mode {
            config.mode = mode;
        }
        if let Some(gravity) = clean.gravity {
            config.gravity = gravity;
        }
        if let Some(chaos) = clean.chaos {
            config.chaos = chaos;
        }
        if let Some(speed) = clean.speed {
            config.speed = speed;
        }
        if let Some(label) = clean.label {
            config.label = label;
        }

        config.mode != old_mode
    }

    pub fn is_empty(&self) -> bool {
        *self == ConfigUpdate::default()
    }
}

/// Scripted change at a given tick index (applied before that tick runs).
#[derive(Deserialize, Debug, Clone)]
pub struct TimelineEvent {
    pub at_tick: u64,
    #[serde(default)]
    pub update: ConfigUpdate,
    #[serde(default)]
    pub reset: bool, // re-seed the whole swarm
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub run: RunConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub config: ConfigUpdate, // initial config, merged onto SimulationConfig::default()
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if !(self.run.dt.is_finite() && self.run.dt > 0.0) {
            return Err(ConfigError::InvalidStep(self.run.dt));
        }
        if let Some(r) = self.engine.init_radius {
            if !(r.is_finite() && r > 0.0) {
                return Err(ConfigError::InvalidRadius(r));
            }
        }
        if let Some(s) = self.engine.max_step {
            if !(s.is_finite() && s > 0.0) {
                return Err(ConfigError::InvalidMaxStep(s));
            }
        }
        if let Some(DampingConfig::FrameRateNormalized { reference_fps }) = self.engine.damping {
            if !(reference_fps.is_finite() && reference_fps > 0.0) {
                return Err(ConfigError::InvalidReferenceFps(reference_fps));
            }
        }
        Ok(())
    }

    /// Runtime engine settings, defaults filled in.
    pub fn engine_settings(&self) -> Engine {
        Engine {
            init_radius: self.engine.init_radius.unwrap_or(DEFAULT_INIT_RADIUS),
            max_step: self.engine.max_step.unwrap_or(DEFAULT_MAX_STEP),
            damping: self.engine.damping.unwrap_or(DampingConfig::PerTick),
        }
    }

    pub fn run_params(&self) -> RunParams {
        RunParams {
            ticks: self.run.ticks,
            dt: self.run.dt,
            seed: self.run.seed,
            report_every: self.run.report_every.unwrap_or(0),
        }
    }

    /// Initial simulation config: defaults with `config` merged on top.
    pub fn initial_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        self.config.apply_to(&mut config);
        config
    }
}
