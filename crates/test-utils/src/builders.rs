#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mdxwatch::config::{WatchConfiguration, WatchConfigurationBuilder};
use mdxwatch::engine::Pipeline;
use mdxwatch::fs::RealFileSystem;
use mdxwatch::types::{SourceEvent, SourceEventKind};
use tempfile::TempDir;

/// Temporary site directory with helpers to create and inspect files by
/// their path relative to the root.
pub struct Site {
    dir: TempDir,
}

impl Site {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, contents).expect("failed to write file");
        path
    }

    pub fn read(&self, rel: &str) -> Option<String> {
        fs::read_to_string(self.path(rel)).ok()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    pub fn delete(&self, rel: &str) {
        fs::remove_file(self.path(rel)).expect("failed to delete file");
    }

    /// Builder rooted at this site, with precompile and post-processing
    /// switched off so tests opt into what they exercise.
    pub fn config(&self) -> WatchConfigurationBuilder {
        WatchConfiguration::builder(self.root())
            .enable_precompile(false)
            .enable_post_process(false)
    }

    /// Pipeline over the real filesystem.
    pub fn pipeline(&self, builder: WatchConfigurationBuilder) -> Pipeline {
        let config = builder.build().expect("failed to build config");
        Pipeline::new(config, Arc::new(RealFileSystem))
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new()
    }
}

pub fn event(kind: SourceEventKind, paths: &[PathBuf]) -> SourceEvent {
    SourceEvent::new(kind, paths.iter().cloned())
}

pub fn created(paths: &[PathBuf]) -> SourceEvent {
    event(SourceEventKind::Created, paths)
}

pub fn modified(paths: &[PathBuf]) -> SourceEvent {
    event(SourceEventKind::Modified, paths)
}

pub fn removed(paths: &[PathBuf]) -> SourceEvent {
    event(SourceEventKind::Removed, paths)
}

pub fn accessed(paths: &[PathBuf]) -> SourceEvent {
    event(SourceEventKind::Accessed, paths)
}
