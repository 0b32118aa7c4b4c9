use thiserror::Error;

#[derive(Error, Debug)]
pub enum CantusError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Structural error: {0}")]
    Structure(String),

    #[error("Degenerate melody: {0}")]
    Degenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CantusError>;
