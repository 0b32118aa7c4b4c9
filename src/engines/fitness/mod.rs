pub mod evaluator;
pub mod melodic;
pub mod rhythmic;
pub mod tonal;

pub use evaluator::FitnessEvaluator;
pub use melodic::MelodicMetrics;
pub use rhythmic::RhythmMetrics;
pub use tonal::TonalMetrics;
