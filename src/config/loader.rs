// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// File name looked up when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "Mdxwatch.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// - Reads TOML (unknown keys are rejected).
/// - Checks that the pattern compiles, the output extension is sane and
///   configured commands are not blank.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `path` if it exists, falling back to an empty configuration.
///
/// Used for the implicit default file: running without any config is fine.
/// An explicitly requested file should go through [`load_and_validate`] so a
/// typo in the path is reported.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if path.is_file() {
        load_and_validate(path)
    } else {
        debug!(?path, "no config file; using defaults");
        Ok(ConfigFile::default())
    }
}

/// Helper to resolve the default config path (`Mdxwatch.toml` in the
/// current working directory).
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
