// src/watch/output_path.rs

//! Derivation of artifact paths from source paths.
//!
//! The mapping is recomputed every time it is needed; nothing records which
//! artifact belongs to which source. That is what lets a removal event find
//! the artifact of a source that no longer exists.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default artifact extension.
pub const DEFAULT_OUTPUT_EXTENSION: &str = ".jsx";

/// Pure mapping from a source path to the path of its artifact.
///
/// Implementations must not do IO or keep state: the same input always
/// yields the same output. Two sources mapping to the same artifact are not
/// detected.
pub trait OutputPathFormatter: Send + Sync {
    fn format(&self, source: &Path) -> PathBuf;
}

impl<F> OutputPathFormatter for F
where
    F: Fn(&Path) -> PathBuf + Send + Sync,
{
    fn format(&self, source: &Path) -> PathBuf {
        self(source)
    }
}

/// Replace the final extension of the file name with a fixed one.
///
/// `posts/new.mdx` becomes `posts/new.jsx`. Only the last extension is
/// replaced (`a.en.mdx` becomes `a.en.jsx`); a name without one, or ending in
/// a bare dot, keeps its name and gets the extension appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSwap {
    extension: String,
}

impl ExtensionSwap {
    /// `extension` includes the leading dot, e.g. `".jsx"`.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Default for ExtensionSwap {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_EXTENSION)
    }
}

impl OutputPathFormatter for ExtensionSwap {
    fn format(&self, source: &Path) -> PathBuf {
        let Some(name) = source.file_name() else {
            let mut out = source.as_os_str().to_owned();
            out.push(&self.extension);
            return PathBuf::from(out);
        };

        let name = name.to_string_lossy();
        let stem = match name.rfind('.') {
            Some(idx) if idx + 1 < name.len() => &name[..idx],
            _ => &name[..],
        };

        let mut file_name = OsString::from(stem);
        file_name.push(&self.extension);
        source.with_file_name(file_name)
    }
}
