//! Error types for the fallible edges of the engine: assets, config, I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An image the asset table needs could not be loaded.
    #[error("could not load image \"{name}\": {reason}")]
    Asset { name: String, reason: String },

    /// The config file is unreadable or holds an invalid value.
    #[error("invalid config: {0}")]
    Config(String),

    #[error("config parse failed: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
