// src/watch/scanner.rs

//! Directory walk used by the precompile pass.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::trace;

use crate::fs::FileSystem;
use crate::watch::patterns::PathFilter;

/// Returns true for directories the scanner never descends into.
pub fn is_hidden_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Collect every file under `root` whose full path matches `filter`.
///
/// Directories whose name starts with `.` are skipped, and so are links to
/// directories, which could otherwise lead back up the tree. The result is in
/// enumeration order, which is not sorted and differs between platforms.
pub fn scan(fs: &dyn FileSystem, root: &Path, filter: &PathFilter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    // Manual stack avoids recursion depth issues on nested trees.
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                if is_hidden_dir(&path) {
                    trace!(?path, "skipping hidden directory");
                    continue;
                }
                if fs.is_symlink(&path) {
                    trace!(?path, "skipping linked directory");
                    continue;
                }
                stack.push(path);
            } else if fs.is_file(&path) && filter.matches(&path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}
