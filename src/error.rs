//! Error types for loading configuration and writing output.
//!
//! Transforms themselves never fail; these errors come from the I/O and
//! configuration layers around them.

use thiserror::Error;

/// Errors that can occur while configuring or running the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid attribute name: {0:?}")]
    InvalidAttributeName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
