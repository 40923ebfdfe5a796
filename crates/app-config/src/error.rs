// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Unknown timeframe '{0}' in parameter overrides")]
    UnknownTimeframe(String),

    #[error(transparent)]
    Params(#[from] core_types::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
