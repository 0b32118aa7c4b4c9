use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::fitness::FitnessEvaluator;
use crate::engines::generation::operators::{
    crossover, inversion, mutate, normalize_length, retrograde, tournament_selection, transpose,
};
use crate::engines::generation::progress::ProgressCallback;
use crate::error::{CantusError, Result};
use crate::types::{EvolutionOutcome, FitnessRecord, Melody, ScoredMelody};

/// Generational loop: evaluate, record, select, reproduce, normalize.
///
/// The engine owns its RNG, seeded once from the configured seed, so two
/// engines with the same configuration and seed melodies follow identical
/// trajectories even when run concurrently.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    evaluator: FitnessEvaluator,
    population: Vec<Melody>,
    rng: StdRng,
}

impl EvolutionEngine {
    /// Validates the configuration and the externally supplied seed
    /// melodies, normalizes every seed to the target length, and pads a
    /// short pool by repeating the earliest entries in order.
    pub fn new(
        config: EvolutionConfig,
        evaluator: FitnessEvaluator,
        seeds: Vec<Melody>,
    ) -> Result<Self> {
        config.validate()?;

        if seeds.is_empty() {
            return Err(CantusError::Configuration(
                "Initial population is empty".to_string(),
            ));
        }
        for (index, melody) in seeds.iter().enumerate() {
            melody.validate().map_err(|e| match e {
                CantusError::Degenerate(msg) => {
                    CantusError::Degenerate(format!("seed melody {}: {}", index, msg))
                }
                CantusError::Structure(msg) => {
                    CantusError::Structure(format!("seed melody {}: {}", index, msg))
                }
                other => other,
            })?;
        }

        let mut population: Vec<Melody> = seeds
            .iter()
            .map(|m| normalize_length(m, config.target_total_duration))
            .collect();
        let mut next_seed = 0usize;
        while population.len() < config.population_size {
            population.push(population[next_seed].clone());
            next_seed += 1;
        }
        population.truncate(config.population_size);

        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            config,
            evaluator,
            population,
            rng,
        })
    }

    /// Run to the configured generation budget and return the final scored
    /// population together with the per-generation records.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionOutcome> {
        let mut population = self.population.clone();
        let mut records = Vec::with_capacity(self.config.generations);
        let mut scored = Vec::new();

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            scored = self.evaluate(&population);
            let best = scored[0].fitness;
            let mean =
                scored.iter().map(|s| s.fitness).sum::<f64>() / scored.len() as f64;
            records.push(FitnessRecord {
                generation,
                best,
                mean,
            });

            log::debug!(
                "generation {}: best {:.4}, mean {:.4}",
                generation,
                best,
                mean
            );
            callback.on_generation_complete(generation, best, mean);

            // The final generation is evaluated and recorded but produces
            // no offspring.
            if generation + 1 < self.config.generations {
                population = self.next_generation(&scored);
            }
        }

        Ok(EvolutionOutcome::new(scored, records))
    }

    /// Score the whole population and sort descending by fitness.
    /// Evaluation is pure, so scoring in parallel and collecting in input
    /// order gives the same result as the sequential baseline; the stable
    /// sort breaks ties by prior position, keeping runs deterministic.
    fn evaluate(&self, population: &[Melody]) -> Vec<ScoredMelody> {
        let mut scored: Vec<ScoredMelody> = population
            .par_iter()
            .map(|melody| ScoredMelody {
                melody: melody.clone(),
                fitness: self.evaluator.evaluate(melody),
            })
            .collect();
        scored.sort_by(|a, b| {
            b.fitness
                .partial_cmp(&a.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored
    }

    fn next_generation(&mut self, scored: &[ScoredMelody]) -> Vec<Melody> {
        let mut next: Vec<Melody> = scored
            .iter()
            .take(self.config.elite_size)
            .map(|s| s.melody.clone())
            .collect();

        while next.len() < self.config.population_size {
            let parent1 =
                tournament_selection(scored, self.config.tournament_size, &mut self.rng).clone();
            let parent2 =
                tournament_selection(scored, self.config.tournament_size, &mut self.rng).clone();

            let child = if self.rng.gen::<f64>() < self.config.crossover_rate {
                crossover(&parent1, &parent2, &mut self.rng)
            } else {
                parent1.clone()
            };
            let mut child = mutate(&child, self.config.mutation_rate, &mut self.rng);

            if self.rng.gen::<f64>() < self.config.transform_rate {
                child = match self.rng.gen_range(0..3u8) {
                    0 => {
                        let semitones = self.rng.gen_range(-3..=3);
                        transpose(&child, semitones)
                    }
                    1 => inversion(&child),
                    _ => retrograde(&child),
                };
            }

            next.push(normalize_length(&child, self.config.target_total_duration));
        }

        next
    }
}
