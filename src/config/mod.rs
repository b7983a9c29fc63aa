// src/config/mod.rs

//! Configuration for mdxwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it (`validate.rs`).
//! - Merge file values and caller overrides onto defaults, producing the
//!   immutable [`WatchConfiguration`] (`builder.rs`).

pub mod builder;
pub mod loader;
pub mod model;
pub mod validate;

pub use builder::{WatchConfiguration, WatchConfigurationBuilder};
pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{
    CompileSection, ConfigFile, PostProcessSection, RawConfigFile, WatchSection,
};
