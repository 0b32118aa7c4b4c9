pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigManager, EvolutionConfig, FitnessWeights};
pub use engines::fitness::FitnessEvaluator;
pub use engines::generation::{
    ConsoleProgressCallback, EvolutionEngine, NullProgressCallback, ProgressCallback,
};
pub use error::{CantusError, Result};
pub use types::{EvolutionOutcome, FitnessRecord, Melody, Note, ScoredMelody};
