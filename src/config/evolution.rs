use super::traits::ConfigSection;
use crate::error::CantusError;
use serde::{Deserialize, Serialize};

/// Parameters of the generational loop. Immutable for the duration of a
/// run; validated up front so the engine never has to re-check mid-loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Per-note perturbation probability applied to every offspring.
    pub mutation_rate: f64,
    /// Probability that an offspring is produced by crossover rather than
    /// by cloning its first parent.
    pub crossover_rate: f64,
    /// Probability that exactly one of transpose/inversion/retrograde is
    /// applied to an offspring after mutation.
    pub transform_rate: f64,
    pub elite_size: usize,
    pub tournament_size: usize,
    /// Phrase length every candidate is normalized to, in quarter-note
    /// units. 16.0 is four measures of 4/4.
    pub target_total_duration: f64,
    pub seed: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 150,
            mutation_rate: 0.2,
            crossover_rate: 0.8,
            transform_rate: 0.1,
            elite_size: 2,
            tournament_size: 3,
            target_total_duration: 16.0,
            seed: 47,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), CantusError> {
        if self.population_size < 2 {
            return Err(CantusError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(CantusError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        for (name, rate) in [
            ("Mutation", self.mutation_rate),
            ("Crossover", self.crossover_rate),
            ("Transform", self.transform_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CantusError::Configuration(format!(
                    "{} rate must be between 0 and 1",
                    name
                )));
            }
        }
        if self.elite_size >= self.population_size {
            return Err(CantusError::Configuration(
                "Elite size must be smaller than the population size".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(CantusError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if !self.target_total_duration.is_finite() || self.target_total_duration <= 0.0 {
            return Err(CantusError::Configuration(
                "Target total duration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
