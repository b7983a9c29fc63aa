// src/watch/mod.rs

//! Source discovery and change detection.
//!
//! This module is responsible for:
//! - Matching paths against the configured source pattern.
//! - Deriving artifact paths from source paths.
//! - Walking the root directory for the precompile pass.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//!
//! It does **not** compile or write anything; it only turns the filesystem
//! into paths and events for the pipeline.

pub mod output_path;
pub mod path_utils;
pub mod patterns;
pub mod scanner;
pub mod watcher;

pub use output_path::{DEFAULT_OUTPUT_EXTENSION, ExtensionSwap, OutputPathFormatter};
pub use patterns::{DEFAULT_PATTERN, PathFilter};
pub use scanner::scan;
pub use watcher::{
    EVENT_CHANNEL_CAPACITY, WatchMessage, WatcherHandle, event_channel, spawn_watcher,
};
