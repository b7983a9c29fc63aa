// src/watch/patterns.rs

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::errors::Result;

/// Default source pattern: MDX documents.
pub const DEFAULT_PATTERN: &str = r"\.mdx$";

/// Compiled source-document matcher.
///
/// The regular expression is tested against the full path string exactly as
/// the watcher or scanner reports it. Separators are not normalized, so the
/// pattern has to fit the platform's path representation.
#[derive(Clone)]
pub struct PathFilter {
    regex: Regex,
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathFilter").field(&self.regex.as_str()).finish()
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_PATTERN).expect("default pattern is a valid regex"),
        }
    }
}

impl PathFilter {
    /// Compile `pattern`. Invalid expressions surface as
    /// [`MdxwatchError::InvalidPattern`](crate::errors::MdxwatchError::InvalidPattern).
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if `path` should be treated as a source document.
    pub fn matches(&self, path: &Path) -> bool {
        self.regex.is_match(&path.to_string_lossy())
    }
}

impl From<Regex> for PathFilter {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}
