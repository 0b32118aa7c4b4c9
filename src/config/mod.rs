pub mod traits;
pub mod evolution;
pub mod fitness;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use evolution::EvolutionConfig;
pub use fitness::FitnessWeights;
pub use traits::ConfigSection;
