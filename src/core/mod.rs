pub mod config;
pub mod error;

pub use config::RuleConfig;
pub use error::{Result, SimError};
