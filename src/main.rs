use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

use cantus::engines::generation::operators::random_population;
use cantus::{AppConfig, ConfigManager, ConsoleProgressCallback, EvolutionEngine, FitnessEvaluator};

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;

    let mut seed_rng = StdRng::seed_from_u64(config.evolution.seed);
    let seeds = random_population(
        config.evolution.population_size,
        config.evolution.target_total_duration,
        &mut seed_rng,
    );

    println!(
        "Evolving {} melodies over {} generations (seed {})",
        config.evolution.population_size, config.evolution.generations, config.evolution.seed
    );

    let evaluator = FitnessEvaluator::new(config.fitness.clone());
    let mut engine = EvolutionEngine::new(config.evolution.clone(), evaluator, seeds)
        .context("failed to construct evolution engine")?;
    let outcome = engine
        .run(ConsoleProgressCallback::default())
        .context("evolution run failed")?;

    println!();
    for (rank, scored) in outcome.top(5).iter().enumerate() {
        println!("#{} (fitness {:.3})", rank + 1, scored.fitness);
        println!("  {}", scored.melody);
    }

    let output_dir = Path::new("outputs");
    fs::create_dir_all(output_dir).context("failed to create output directory")?;

    let history_path = output_dir.join("fitness_history.json");
    fs::write(&history_path, serde_json::to_string_pretty(outcome.records())?)?;
    println!("\nFitness history written to {}", history_path.display());

    let best_path = output_dir.join("best_melody.json");
    fs::write(&best_path, serde_json::to_string_pretty(outcome.best())?)?;
    println!("Best melody written to {}", best_path.display());

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let manager = ConfigManager::new();
            manager
                .load_from_file(&path)
                .with_context(|| format!("failed to load config from {}", path))?;
            Ok(manager.get())
        }
        None => Ok(AppConfig::default()),
    }
}
