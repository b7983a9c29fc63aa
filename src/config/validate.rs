// src/config/validate.rs

use regex::Regex;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{MdxwatchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::MdxwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.watch, raw.compile, raw.post_process))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_watch_section(cfg)?;
    validate_commands(cfg)?;
    Ok(())
}

fn validate_watch_section(cfg: &RawConfigFile) -> Result<()> {
    if let Some(root) = &cfg.watch.root {
        if root.trim().is_empty() {
            return Err(MdxwatchError::ConfigError(
                "[watch].root must not be empty".to_string(),
            ));
        }
    }

    if let Some(pattern) = &cfg.watch.pattern {
        Regex::new(pattern)?;
    }

    if let Some(ext) = &cfg.watch.output_extension {
        validate_output_extension(ext)?;
    }

    Ok(())
}

/// An output extension is a leading dot plus at least one character, with no
/// path separators.
pub fn validate_output_extension(ext: &str) -> Result<()> {
    if !ext.starts_with('.') || ext.len() < 2 {
        return Err(MdxwatchError::ConfigError(format!(
            "output extension must start with '.' and be non-empty (got {ext:?})"
        )));
    }
    if ext.contains('/') || ext.contains('\\') {
        return Err(MdxwatchError::ConfigError(format!(
            "output extension must not contain path separators (got {ext:?})"
        )));
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    if cfg.compile.cmd.as_deref().is_some_and(|c| c.trim().is_empty()) {
        return Err(MdxwatchError::ConfigError(
            "[compile].cmd must not be blank; omit it to copy sources unchanged".to_string(),
        ));
    }
    if cfg
        .post_process
        .format_cmd
        .as_deref()
        .is_some_and(|c| c.trim().is_empty())
    {
        return Err(MdxwatchError::ConfigError(
            "[post_process].format_cmd must not be blank; omit it to skip formatting"
                .to_string(),
        ));
    }
    Ok(())
}
