// src/engine/core.rs

//! Pure dispatch planning.
//!
//! Turns one [`SourceEvent`] into the ordered list of per-path actions the IO
//! shell (`engine::runtime::Pipeline`) should carry out. No filesystem, no
//! channels, no Tokio: everything here can be unit tested directly.

use std::path::PathBuf;

use crate::types::{SourceEvent, SourceEventKind};
use crate::watch::{OutputPathFormatter, PathFilter};

/// What to do for a single source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathAction {
    /// Read `source`, compile it and write the artifact to `output`.
    Compile { source: PathBuf, output: PathBuf },
    /// `source` is gone; delete the artifact at `output` if present.
    Remove { source: PathBuf, output: PathBuf },
}

impl PathAction {
    pub fn source(&self) -> &PathBuf {
        match self {
            PathAction::Compile { source, .. } | PathAction::Remove { source, .. } => source,
        }
    }

    pub fn output(&self) -> &PathBuf {
        match self {
            PathAction::Compile { output, .. } | PathAction::Remove { output, .. } => output,
        }
    }
}

/// Plan the actions for one event.
///
/// - `Accessed` and `Other` events produce nothing.
/// - Paths that do not match `filter` are dropped.
/// - The remaining paths keep the order they have in the event.
pub fn plan_event(
    event: &SourceEvent,
    filter: &PathFilter,
    format_output: &dyn OutputPathFormatter,
) -> Vec<PathAction> {
    if !event.kind.is_actionable() {
        return Vec::new();
    }

    event
        .paths
        .iter()
        .filter(|path| filter.matches(path))
        .map(|source| {
            let output = format_output.format(source);
            let source = source.clone();
            match event.kind {
                SourceEventKind::Removed => PathAction::Remove { source, output },
                _ => PathAction::Compile { source, output },
            }
        })
        .collect()
}
