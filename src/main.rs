//! FOXFIELD - CLI entry point.
//!
//! Configures the simulation, drives the step loop, and reports counts.

use clap::{Parser, Subcommand};
use foxfield::{benchmark, Config, Simulator};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "foxfield")]
#[command(version)]
#[command(about = "Discrete-time predator-prey ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of steps to simulate
        #[arg(short, long, default_value = "4000")]
        steps: u64,

        /// Output directory for the stats history
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of steps
        #[arg(short, long, default_value = "1000")]
        steps: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            output,
            seed,
            quiet,
        } => run_simulation(config, steps, output, seed, quiet),

        Commands::Init { output } => generate_config(output),

        Commands::Benchmark { steps } => run_benchmark(steps),
    }
}

fn run_simulation(
    config_path: PathBuf,
    steps: u64,
    output: PathBuf,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    // Create output directory
    std::fs::create_dir_all(&output)?;

    // Create and seed the simulator
    let mut sim = if let Some(s) = seed {
        println!("Using seed: {}", s);
        Simulator::new_with_seed(config.clone(), s)?
    } else {
        Simulator::new(config.clone())?
    };
    sim.populate();

    println!("Starting simulation");
    println!("  Initial population: {}", sim.population());
    println!(
        "  Field: {}x{}",
        config.field.depth, config.field.width
    );
    println!("  Steps: {}", steps);
    println!();

    let start = Instant::now();
    let stats_interval = config.logging.stats_interval;

    for i in 0..steps {
        let stats = sim.step();

        // Stats output
        if !quiet && i % stats_interval == 0 {
            println!("{}", stats.summary());
        }

        // Check for extinction
        if !sim.is_viable() {
            println!("\nPopulation extinct at step {}", sim.time);
            break;
        }
    }

    let elapsed = start.elapsed();
    let steps_per_sec = sim.time as f64 / elapsed.as_secs_f64();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Steps: {}", sim.time);
    println!("Speed: {:.1} steps/s", steps_per_sec);
    println!("{}", sim.stats.summary());

    // Save stats history
    let stats_path = output.join("stats_history.json");
    sim.stats_history.save(stats_path.to_str().unwrap())?;
    println!("Stats history: {:?}", stats_path);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn run_benchmark(steps: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== FOXFIELD Benchmark ===");
    println!("Steps: {}", steps);
    println!();

    let result = benchmark(steps);
    println!("{}", result);

    Ok(())
}
