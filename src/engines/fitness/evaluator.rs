use std::collections::HashMap;

use crate::config::FitnessWeights;
use crate::engines::fitness::{MelodicMetrics, RhythmMetrics, TonalMetrics};
use crate::types::Melody;

/// Scores a melody as a weighted sum of normalized sub-metrics. Pure and
/// deterministic: the same melody always maps to the same score.
pub struct FitnessEvaluator {
    weights: FitnessWeights,
}

impl FitnessEvaluator {
    pub fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }

    /// Every sub-metric by name, each in [0, 1], before weighting.
    pub fn score_components(&self, melody: &Melody) -> HashMap<String, f64> {
        let mut components = MelodicMetrics::calculate(melody);
        components.extend(RhythmMetrics::calculate(melody));
        components.extend(TonalMetrics::calculate(melody));
        components
    }

    /// Weighted total. An empty melody scores 0 rather than failing.
    pub fn evaluate(&self, melody: &Melody) -> f64 {
        if melody.is_empty() {
            return 0.0;
        }
        let components = self.score_components(melody);
        let mut fitness = 0.0;
        for (name, weight) in self.weights.as_table() {
            if let Some(&value) = components.get(name) {
                fitness += weight * value;
            }
        }
        fitness
    }
}

impl Default for FitnessEvaluator {
    fn default() -> Self {
        Self::new(FitnessWeights::default())
    }
}
