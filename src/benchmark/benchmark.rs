use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::simulation::integrator::{initialize, tick};
use crate::simulation::params::{Mode, SimulationConfig};
use crate::simulation::states::NVec3;

/// Frame delta used for every benchmark tick (60 fps)
const BENCH_DT: f64 = 1.0 / 60.0;

/// Time the tick pass per mode for growing swarm sizes.
/// Output is CSV: paste straight into a spreadsheet to graph.
pub fn bench_tick(steps: usize) {
    let ns = [200, 400, 800, 1600, 3200, 6400, 12800, 25600];
    let steps = steps.max(1);

    info!(steps, "benchmarking tick");
    println!("N,mode,us_per_tick,ns_per_particle");

    for n in ns {
        for mode in Mode::ALL {
            let mut rng = StdRng::seed_from_u64(42);
            let mut swarm = initialize(n, &mut rng);

            // chaos > 0 so the jitter path (and its RNG draws) is included
            let config = SimulationConfig {
                mode,
                chaos: 0.5,
                ..SimulationConfig::default()
            };
            // Cursor parked at the edge of the seed sphere so some particles interact
            let cursor = NVec3::new(4.0, 0.0, 0.0);

            // Warm-up
            tick(&mut swarm, &config, cursor, BENCH_DT, &mut rng);

            let t0 = Instant::now();
            for _ in 0..steps {
                tick(&mut swarm, &config, cursor, BENCH_DT, &mut rng);
            }
            let per_tick = t0.elapsed().as_secs_f64() / steps as f64;

            println!(
                "{},{},{:.3},{:.3}",
                n,
                mode,
                per_tick * 1e6,
                per_tick * 1e9 / n as f64
            );
        }
    }
}
