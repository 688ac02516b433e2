use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use maze_chase::comparison::Comparison;
use maze_chase::config::Config;
use maze_chase::simulation::Simulation;

fn main() -> Result<()> {
    init_tracing();
    let config = Config::parse();

    if config.compare {
        return run_comparison(&config);
    }

    println!("Starting maze chase...");
    println!("Algorithm: {}", config.mode);
    if let Some(every) = config.toggle_every {
        println!("Switching algorithm every {} ticks", every);
    }
    if config.no_visualization || config.quiet {
        println!("Visualization disabled - running in fast mode");
    } else {
        println!("Visualization enabled with {}ms delay", config.delay_ms);
        println!("Press Ctrl+C to stop the simulation");
        std::thread::sleep(std::time::Duration::from_millis(1000));
    }
    println!();

    let mut simulation = Simulation::new(config);
    let (stats, timing) = simulation.run();
    info!(outcome = %stats.outcome, score = stats.score, ticks = stats.ticks, "game finished");

    println!("\n=== FINAL RESULTS ===");
    println!("{}", stats);
    println!("=== NAVIGATION TIMING ===");
    println!("{}", timing);
    Ok(())
}

fn run_comparison(config: &Config) -> Result<()> {
    let mut comparison = Comparison::new(config);
    info!(seed = comparison.seed(), trials = config.trials, "comparing search modes");
    comparison.run();

    if let Some(path) = &config.output_file {
        comparison
            .write_csv(path)
            .with_context(|| format!("failed to write comparison results to {}", path))?;
        println!("Results saved to: {}", path);
    }
    if !config.quiet {
        comparison.print_summary();
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
