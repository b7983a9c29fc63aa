// src/config/builder.rs

//! The immutable pipeline configuration and the builder that produces it.
//!
//! Callers only state what they want to change; `build()` merges those
//! overrides onto a fully populated default record in one place, so the
//! pipeline never has to deal with missing fields.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::compile::{CommandCompiler, CompileCallback, IdentityCompiler};
use crate::config::model::ConfigFile;
use crate::config::validate::validate_output_extension;
use crate::errors::{MdxwatchError, Result};
use crate::output::{BatchCallback, CommandFormatter, NoopFormatter, OutputFormatter};
use crate::watch::{ExtensionSwap, OutputPathFormatter, PathFilter, DEFAULT_PATTERN};

/// Everything the pipeline needs, fully populated.
#[derive(Clone)]
pub struct WatchConfiguration {
    root: PathBuf,
    filter: PathFilter,
    compile: Arc<dyn CompileCallback>,
    format_output: Arc<dyn OutputPathFormatter>,
    formatter: Arc<dyn OutputFormatter>,
    enable_precompile: bool,
    enable_post_process: bool,
    on_batch_compiled: Option<BatchCallback>,
}

impl std::fmt::Debug for WatchConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchConfiguration")
            .field("root", &self.root)
            .field("filter", &self.filter)
            .field("enable_precompile", &self.enable_precompile)
            .field("enable_post_process", &self.enable_post_process)
            .field("on_batch_compiled", &self.on_batch_compiled.is_some())
            .finish_non_exhaustive()
    }
}

impl WatchConfiguration {
    /// Start a builder for a pipeline rooted at `root`.
    pub fn builder(root: impl Into<PathBuf>) -> WatchConfigurationBuilder {
        WatchConfigurationBuilder::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    pub fn compile(&self) -> &Arc<dyn CompileCallback> {
        &self.compile
    }

    pub fn format_output(&self) -> &dyn OutputPathFormatter {
        self.format_output.as_ref()
    }

    pub fn formatter(&self) -> &Arc<dyn OutputFormatter> {
        &self.formatter
    }

    pub fn enable_precompile(&self) -> bool {
        self.enable_precompile
    }

    pub fn enable_post_process(&self) -> bool {
        self.enable_post_process
    }

    pub fn on_batch_compiled(&self) -> Option<&BatchCallback> {
        self.on_batch_compiled.as_ref()
    }

    /// Derived artifact path for `source`.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        self.format_output.format(source)
    }
}

/// Caller overrides, merged onto defaults by [`build`](Self::build).
///
/// | field | default |
/// |---|---|
/// | pattern | `\.mdx$` |
/// | compile | [`IdentityCompiler`] |
/// | format_output | [`ExtensionSwap`] to `.jsx` |
/// | formatter | [`NoopFormatter`] |
/// | enable_precompile | `true` |
/// | enable_post_process | `true` |
/// | on_batch_compiled | none |
#[derive(Default)]
pub struct WatchConfigurationBuilder {
    root: PathBuf,
    pattern: Option<String>,
    filter: Option<PathFilter>,
    output_extension: Option<String>,
    compile: Option<Arc<dyn CompileCallback>>,
    format_output: Option<Arc<dyn OutputPathFormatter>>,
    formatter: Option<Arc<dyn OutputFormatter>>,
    enable_precompile: Option<bool>,
    enable_post_process: Option<bool>,
    on_batch_compiled: Option<BatchCallback>,
}

impl WatchConfigurationBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Replace the root directory given to [`new`](Self::new).
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Root directory as currently configured.
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Regular expression selecting source documents (compiled in `build`).
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self.filter = None;
        self
    }

    /// Already compiled source matcher.
    pub fn filter(mut self, filter: PathFilter) -> Self {
        self.filter = Some(filter);
        self.pattern = None;
        self
    }

    /// Swap the source extension for `ext` (e.g. `".js"`). Ignored when a
    /// custom [`format_output`](Self::format_output) is set.
    pub fn output_extension(mut self, ext: impl Into<String>) -> Self {
        self.output_extension = Some(ext.into());
        self
    }

    pub fn compile(mut self, compile: Arc<dyn CompileCallback>) -> Self {
        self.compile = Some(compile);
        self
    }

    pub fn format_output(mut self, format_output: Arc<dyn OutputPathFormatter>) -> Self {
        self.format_output = Some(format_output);
        self
    }

    pub fn formatter(mut self, formatter: Arc<dyn OutputFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn enable_precompile(mut self, enabled: bool) -> Self {
        self.enable_precompile = Some(enabled);
        self
    }

    pub fn enable_post_process(mut self, enabled: bool) -> Self {
        self.enable_post_process = Some(enabled);
        self
    }

    pub fn on_batch_compiled(mut self, callback: BatchCallback) -> Self {
        self.on_batch_compiled = Some(callback);
        self
    }

    /// Apply the values present in a config file. Relative `[watch].root`
    /// values are resolved against `base_dir` (the config file's directory).
    ///
    /// Overrides set on the builder before this call are replaced by the
    /// file's values; later calls win over the file.
    pub fn apply_config_file(mut self, base_dir: &Path, file: &ConfigFile) -> Self {
        if let Some(root) = &file.watch.root {
            self.root = base_dir.join(root);
        }
        if let Some(pattern) = &file.watch.pattern {
            self = self.pattern(pattern.clone());
        }
        if let Some(ext) = &file.watch.output_extension {
            self.output_extension = Some(ext.clone());
        }
        if let Some(precompile) = file.watch.precompile {
            self.enable_precompile = Some(precompile);
        }
        if let Some(post_process) = file.watch.post_process {
            self.enable_post_process = Some(post_process);
        }
        if let Some(cmd) = &file.compile.cmd {
            self.compile = Some(Arc::new(CommandCompiler::new(cmd.clone())));
        }
        if let Some(cmd) = &file.post_process.format_cmd {
            self.formatter = Some(Arc::new(CommandFormatter::new(cmd.clone())));
        }
        self
    }

    /// Merge overrides onto defaults and validate the result.
    pub fn build(self) -> Result<WatchConfiguration> {
        if self.root.as_os_str().is_empty() {
            return Err(MdxwatchError::ConfigError(
                "root directory must not be empty".to_string(),
            ));
        }

        let filter = match (self.filter, self.pattern) {
            (Some(filter), _) => filter,
            (None, Some(pattern)) => PathFilter::new(&pattern)?,
            (None, None) => PathFilter::new(DEFAULT_PATTERN)?,
        };

        let format_output: Arc<dyn OutputPathFormatter> = match (self.format_output, self.output_extension) {
            (Some(custom), _) => custom,
            (None, Some(ext)) => {
                validate_output_extension(&ext)?;
                Arc::new(ExtensionSwap::new(ext))
            }
            (None, None) => Arc::new(ExtensionSwap::default()),
        };

        Ok(WatchConfiguration {
            root: self.root,
            filter,
            compile: self.compile.unwrap_or_else(|| Arc::new(IdentityCompiler)),
            format_output,
            formatter: self.formatter.unwrap_or_else(|| Arc::new(NoopFormatter)),
            enable_precompile: self.enable_precompile.unwrap_or(true),
            enable_post_process: self.enable_post_process.unwrap_or(true),
            on_batch_compiled: self.on_batch_compiled,
        })
    }
}
