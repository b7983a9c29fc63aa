// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// root = "content"
/// pattern = "\\.mdx$"
/// output_extension = ".jsx"
/// precompile = true
/// post_process = true
///
/// [compile]
/// cmd = "node scripts/compile-mdx.mjs"
///
/// [post_process]
/// format_cmd = "deno fmt {path}"
/// ```
///
/// Every key is optional; anything left out falls back to the defaults of
/// [`WatchConfigurationBuilder`](crate::config::WatchConfigurationBuilder).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub compile: CompileSection,

    #[serde(default)]
    pub post_process: PostProcessSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Directory to scan and watch, relative to the config file's directory.
    #[serde(default)]
    pub root: Option<String>,

    /// Regular expression selecting source documents.
    #[serde(default)]
    pub pattern: Option<String>,

    /// Extension (with leading dot) that replaces the source extension.
    #[serde(default)]
    pub output_extension: Option<String>,

    /// Compile every matching file once before watching.
    #[serde(default)]
    pub precompile: Option<bool>,

    /// Run the post-process hook after writes.
    #[serde(default)]
    pub post_process: Option<bool>,
}

/// `[compile]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileSection {
    /// Shell command reading source text on stdin and printing the artifact.
    /// When absent, artifacts are copies of their sources.
    #[serde(default)]
    pub cmd: Option<String>,
}

/// `[post_process]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostProcessSection {
    /// Shell command run on every written artifact (`{path}` placeholder).
    #[serde(default)]
    pub format_cmd: Option<String>,
}

/// A configuration file that passed validation.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`)
/// or [`ConfigFile::new_unchecked`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub watch: WatchSection,
    pub compile: CompileSection,
    pub post_process: PostProcessSection,
}

impl ConfigFile {
    pub fn new_unchecked(
        watch: WatchSection,
        compile: CompileSection,
        post_process: PostProcessSection,
    ) -> Self {
        Self {
            watch,
            compile,
            post_process,
        }
    }
}
