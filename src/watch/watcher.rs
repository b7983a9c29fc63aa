// src/watch/watcher.rs

use std::path::PathBuf;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::info;

use crate::errors::{MdxwatchError, Result};
use crate::types::SourceEvent;

/// Capacity of the channel between the notify callback thread and the
/// pipeline task. When it is full the callback thread blocks and the OS
/// watcher buffers the backlog.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// One item of the event stream: a converted event, or an error reported by
/// the watch primitive itself (fatal for the pipeline).
pub type WatchMessage = Result<SourceEvent>;

/// Create the bounded channel the watcher feeds and the pipeline consumes.
pub fn event_channel() -> (mpsc::Sender<WatchMessage>, mpsc::Receiver<WatchMessage>) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching and, once
/// the last sender is gone, close the event channel.
pub struct WatcherHandle {
    root: PathBuf,
    _inner: RecommendedWatcher,
}

impl WatcherHandle {
    /// Directory being watched (canonicalized when possible).
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Spawn a filesystem watcher that observes `root` recursively and forwards
/// every notify event, converted to a [`SourceEvent`], into `events_tx`.
///
/// No filtering happens here; the pipeline decides what is actionable.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    events_tx: mpsc::Sender<WatchMessage>,
) -> Result<WatcherHandle> {
    let root = root.into();
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or_else(|_| root.clone());

    // Closure called synchronously by notify on its own thread, so a
    // blocking send is fine here.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            let message = res.map(SourceEvent::from).map_err(MdxwatchError::from);
            if let Err(err) = events_tx.blocking_send(message) {
                // We can't log via tracing here easily, so fallback to stderr.
                eprintln!("mdxwatch: failed to forward notify event: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    Ok(WatcherHandle {
        root,
        _inner: watcher,
    })
}
