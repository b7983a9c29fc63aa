// src/output/writer.rs

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::fs::{is_not_found, FileSystem};

/// Writes artifacts and deletes the ones whose source went away.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    fs: Arc<dyn FileSystem>,
}

impl ArtifactWriter {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Create or overwrite the artifact at `path`.
    pub fn write(&self, path: &Path, text: &str) -> Result<()> {
        self.fs.write(path, text.as_bytes())?;
        debug!(?path, bytes = text.len(), "artifact written");
        Ok(())
    }

    /// Delete the artifact at `path`.
    ///
    /// Event delivery races with the filesystem, so an already absent
    /// artifact is not an error. Returns whether a file was actually deleted.
    pub fn remove(&self, path: &Path) -> Result<bool> {
        match self.fs.remove_file(path) {
            Ok(()) => {
                debug!(?path, "artifact removed");
                Ok(true)
            }
            Err(err) if is_not_found(&err) => {
                debug!(?path, "artifact already absent");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}
