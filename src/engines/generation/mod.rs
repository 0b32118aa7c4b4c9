pub mod engine;
pub mod operators;
pub mod progress;

pub use engine::EvolutionEngine;
pub use progress::{ConsoleProgressCallback, NullProgressCallback, ProgressCallback};
