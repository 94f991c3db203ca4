//! Build and drive a swarm scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - the swarm state (`SwarmState`) seeded from `run.seed`,
//! - the current simulation config (last write wins),
//! - the cursor path and the timeline of scripted updates,
//! - the seeded RNG shared by seeding, jitter and resets.
//!
//! `Scenario` plays the part of the external driver: before each tick it
//! applies any timeline events due at that tick, computes the cursor
//! position, and hands a whole config snapshot to `tick`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::configuration::config::{ConfigUpdate, CursorConfig, ScenarioConfig, TimelineEvent};
use crate::simulation::frame::RenderFrame;
use crate::simulation::integrator::{initialize_with, tick};
use crate::simulation::params::{RunParams, SimulationConfig};
use crate::simulation::states::{SwarmState, SwarmStats};

pub struct Scenario {
    pub run: RunParams,
    pub swarm: SwarmState,
    pub config: SimulationConfig,
    pub cursor: CursorConfig,
    timeline: Vec<TimelineEvent>, // sorted by at_tick
    next_event: usize,
    rng: StdRng,
}

/// Summary returned by [`Scenario::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub simulated_time: f64,
    pub stats: SwarmStats,
    pub mode_changes: usize,
    pub resets: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        let run = cfg.run_params();
        let config = cfg.initial_config();
        let mut rng = StdRng::seed_from_u64(run.seed);

        let mut swarm = initialize_with(cfg.engine_settings(), cfg.engine.particle_count, &mut rng);
        // Start already at the target color so the first frames don't fade in from white
        swarm.set_current_color(config.color);

        // Stable sort keeps file order for events sharing a tick
        let mut timeline = cfg.timeline;
        timeline.sort_by_key(|e| e.at_tick);

        info!(
            particles = swarm.len(),
            seed = run.seed,
            mode = %config.mode,
            events = timeline.len(),
            "scenario built"
        );

        Self {
            run,
            swarm,
            config,
            cursor: cfg.cursor,
            timeline,
            next_event: 0,
            rng,
        }
    }

    /// Replace the config from outside the timeline (last write wins).
    pub fn push_update(&mut self, update: &ConfigUpdate) -> bool {
        let mode_changed = update.apply_to(&mut self.config);
        if mode_changed {
            info!(mode = %self.config.mode, tick = self.swarm.ticks(), "mode switched");
        }
        debug!(config = ?self.config, "config updated");
        mode_changed
    }

    pub fn reset(&mut self) {
        self.swarm.reset(&mut self.rng);
        info!(tick = self.swarm.ticks(), "swarm reset");
    }

    /// Apply due timeline events, then advance one tick.
    pub fn step(&mut self) -> RenderFrame<'_> {
        self.step_counted().0
    }

    fn step_counted(&mut self) -> (RenderFrame<'_>, usize, usize) {
        let now = self.swarm.ticks();
        let mut mode_changes = 0;
        let mut resets = 0;

        while let Some(event) = self.timeline.get(self.next_event) {
            if event.at_tick > now {
                break;
            }
            let event = event.clone();
            self.next_event += 1;

            if !event.update.is_empty() && self.push_update(&event.update) {
                mode_changes += 1;
            }
            if event.reset {
                self.reset();
                resets += 1;
            }
        }

        let cursor = self.cursor.position_at(now as f64 * self.run.dt);
        let frame = tick(&mut self.swarm, &self.config, cursor, self.run.dt, &mut self.rng);
        (frame, mode_changes, resets)
    }

    /// Run `run.ticks` ticks, logging stats every `run.report_every` ticks.
    pub fn run(&mut self) -> RunSummary {
        let mut mode_changes = 0;
        let mut resets = 0;

        for _ in 0..self.run.ticks {
            let (frame, m, r) = self.step_counted();
            let n = frame.tick;
            mode_changes += m;
            resets += r;

            if self.run.report_every > 0 && n % self.run.report_every == 0 {
                let s = self.swarm.stats();
                info!(
                    tick = n,
                    mode = %self.config.mode,
                    mean_distance = s.mean_distance,
                    max_distance = s.max_distance,
                    mean_speed = s.mean_speed,
                    "progress"
                );
            }
        }

        RunSummary {
            ticks: self.swarm.ticks(),
            simulated_time: self.swarm.time(),
            stats: self.swarm.stats(),
            mode_changes,
            resets,
        }
    }
}
