//! # FOXFIELD
//!
//! Discrete-time predator-prey ecosystem simulator.
//!
//! A rectangular field of cells hosts config-defined animal populations;
//! the simulator advances the ecosystem one step at a time, and each animal
//! updates its age, hunger, movement, predation, and breeding state during
//! that step.
//!
//! ## Features
//!
//! - **Reproducible**: seeded random number generation, identical counts on
//!   every rerun of a seed
//! - **Configurable**: YAML field/species configuration files
//! - **Sequential**: each step is a total, single-threaded transition over
//!   (population, field, random source)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foxfield::{Config, Simulator};
//!
//! // Create a simulator with the default three-species config
//! let config = Config::default();
//! let mut sim = Simulator::new(config).unwrap();
//! sim.populate();
//!
//! // Run simulation
//! sim.run(1000);
//!
//! // Check results
//! println!("Population: {}", sim.population());
//! println!("{}", sim.stats.summary());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use foxfield::Config;
//!
//! let mut config = Config::default();
//! config.field.depth = 40;
//! config.species[0].initial_count = 200;
//! ```

pub mod animal;
pub mod config;
pub mod field;
pub mod simulator;
pub mod stats;

// Re-export main types
pub use animal::{Animal, AnimalId, DeathCause, Diet, Species, SpeciesId};
pub use config::Config;
pub use field::{Field, Location};
pub use simulator::Simulator;
pub use stats::{Stats, StatsHistory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(steps: u64) -> BenchmarkResult {
    use std::time::Instant;

    let config = Config::default();
    let initial_population = config.species.iter().map(|s| s.initial_count).sum();

    let mut sim = Simulator::new(config).expect("default configuration is valid");
    sim.populate();

    let start = Instant::now();
    sim.run(steps);
    let elapsed = start.elapsed();

    BenchmarkResult {
        steps,
        initial_population,
        final_population: sim.population(),
        elapsed_secs: elapsed.as_secs_f64(),
        steps_per_second: steps as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub steps: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub steps_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(
            f,
            "Population: {} -> {}",
            self.initial_population, self.final_population
        )?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} steps/s", self.steps_per_second)?;
        Ok(())
    }
}
