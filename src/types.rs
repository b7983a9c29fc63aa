// src/types.rs

//! Plain data types shared between the watcher, the compiler layer and the
//! pipeline.

use std::path::PathBuf;

use notify::EventKind;

/// What happened to the paths of a [`SourceEvent`].
///
/// `Accessed` and `Other` carry no actionable semantics; the pipeline drops
/// them before looking at individual paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEventKind {
    Created,
    Modified,
    Removed,
    Accessed,
    Other,
}

impl SourceEventKind {
    /// Whether the pipeline should look at the paths of this event at all.
    pub fn is_actionable(self) -> bool {
        matches!(
            self,
            SourceEventKind::Created | SourceEventKind::Modified | SourceEventKind::Removed
        )
    }
}

impl From<&EventKind> for SourceEventKind {
    fn from(kind: &EventKind) -> Self {
        match kind {
            EventKind::Create(_) => SourceEventKind::Created,
            // Renames surface as modifications of both the old and the new
            // name; the old one then fails to read and is treated as removed.
            EventKind::Modify(_) => SourceEventKind::Modified,
            EventKind::Remove(_) => SourceEventKind::Removed,
            EventKind::Access(_) => SourceEventKind::Accessed,
            EventKind::Any | EventKind::Other => SourceEventKind::Other,
        }
    }
}

/// One batch of filesystem changes as reported by the watch primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEvent {
    pub kind: SourceEventKind,
    pub paths: Vec<PathBuf>,
}

impl SourceEvent {
    pub fn new<I, P>(kind: SourceEventKind, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            kind,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<notify::Event> for SourceEvent {
    fn from(event: notify::Event) -> Self {
        Self {
            kind: SourceEventKind::from(&event.kind),
            paths: event.paths,
        }
    }
}

/// Input handed to a compile callback.
///
/// `output_path` is derived from `source_path` before the callback runs and
/// is where the artifact gets written, whatever the callback returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub source_path: PathBuf,
    pub source_text: String,
    pub output_path: PathBuf,
}

/// Output of a compile callback.
///
/// `output_path` is informational only; see [`CompileRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub text: String,
    pub output_path: PathBuf,
}

/// Boxed, sendable future returned by the pluggable collaborators
/// (compile callbacks, output formatters).
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;
