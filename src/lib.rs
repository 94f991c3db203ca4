pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Particle, SwarmState, SwarmStats, NVec3};
pub use simulation::color::Rgb;
pub use simulation::params::{Mode, ForceProfile, SimulationConfig, RunParams};
pub use simulation::engine::Engine;
pub use simulation::forces::{Force, ForceSet, CentralForce, OrbitalCurl, CursorRepulsor, Jitter};
pub use simulation::frame::{InstanceTransform, RenderFrame};
pub use simulation::integrator::{initialize, initialize_with, tick};
pub use simulation::scenario::{Scenario, RunSummary};

pub use configuration::config::{ConfigError, ConfigUpdate, CursorConfig, DampingConfig, EngineConfig, RunConfig, ScenarioConfig, TimelineEvent};

pub use benchmark::benchmark::bench_tick;
