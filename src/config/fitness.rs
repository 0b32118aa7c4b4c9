use super::traits::ConfigSection;
use crate::error::CantusError;
use serde::{Deserialize, Serialize};

/// Weight table for the fitness evaluator. Every sub-metric is normalized
/// into [0, 1] before weighting, so each weight states how much one full
/// unit of that quality is worth relative to the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    pub pitch_range: f64,
    pub smoothness: f64,
    pub leap_penalty: f64,
    pub octave_leap_penalty: f64,
    pub repeated_note_penalty: f64,
    pub motif_repetition: f64,
    pub rhythm_variety: f64,
    pub note_density: f64,
    pub metric_accent: f64,
    pub scale_membership: f64,
    pub chord_outline: f64,
    pub cadence: f64,
    pub pitch_class_entropy: f64,
}

impl FitnessWeights {
    /// Name/weight pairs matching the keys produced by the metric
    /// calculators.
    pub fn as_table(&self) -> [(&'static str, f64); 13] {
        [
            ("pitch_range", self.pitch_range),
            ("smoothness", self.smoothness),
            ("leap_penalty", self.leap_penalty),
            ("octave_leap_penalty", self.octave_leap_penalty),
            ("repeated_note_penalty", self.repeated_note_penalty),
            ("motif_repetition", self.motif_repetition),
            ("rhythm_variety", self.rhythm_variety),
            ("note_density", self.note_density),
            ("metric_accent", self.metric_accent),
            ("scale_membership", self.scale_membership),
            ("chord_outline", self.chord_outline),
            ("cadence", self.cadence),
            ("pitch_class_entropy", self.pitch_class_entropy),
        ]
    }
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            pitch_range: 1.0,
            smoothness: 1.3,
            leap_penalty: 1.5,
            octave_leap_penalty: 1.0,
            repeated_note_penalty: 1.0,
            motif_repetition: 2.0,
            rhythm_variety: 1.0,
            note_density: 1.0,
            metric_accent: 1.0,
            scale_membership: 1.2,
            chord_outline: 1.0,
            cadence: 1.5,
            pitch_class_entropy: 1.2,
        }
    }
}

impl ConfigSection for FitnessWeights {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), CantusError> {
        for (name, weight) in self.as_table() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CantusError::Configuration(format!(
                    "Fitness weight '{}' must be a non-negative finite number",
                    name
                )));
            }
        }
        Ok(())
    }
}
