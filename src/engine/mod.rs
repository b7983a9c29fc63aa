// src/engine/mod.rs

//! Orchestration engine for mdxwatch.
//!
//! The pure dispatch planning lives in [`core`]; the async/IO shell that
//! runs the precompile pass and the watch loop is [`runtime::Pipeline`].

pub mod core;
pub mod runtime;

pub use core::{plan_event, PathAction};
pub use runtime::Pipeline;

/// Lifecycle of a [`Pipeline`].
///
/// `Idle → Precompiling (if enabled) → Watching → Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Precompiling,
    Watching,
    /// The event stream closed or failed, or the precompile pass aborted.
    Terminated,
}

/// Counters kept for the lifetime of a pipeline (not persisted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Artifacts written.
    pub compiled: usize,
    /// Artifacts actually deleted (absent targets are not counted).
    pub removed: usize,
    /// Paths whose processing failed while watching.
    pub failed: usize,
}
