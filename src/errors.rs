// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MdxwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("File watch error: {0}")]
    Watch(#[from] notify::Error),

    /// The compile callback failed for `path`.
    #[error("Compile failed for {path:?}: {source:#}")]
    Compile {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Post-process failed: {0}")]
    PostProcess(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MdxwatchError>;
