use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid partition plan: {0}")]
    Partition(String),

    #[error("Halo exchange with neighbor {neighbor} failed: {reason}")]
    HaloExchange { neighbor: usize, reason: String },

    #[error("Worker {0} panicked")]
    Worker(usize),

    #[error("Board file error: {0}")]
    Board(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Rules file error: {0}")]
    RulesFile(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
