// src/output/post_process.rs

//! Optional work done after artifacts are written: run a formatter over each
//! artifact, then tell the caller which artifacts the batch produced.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::compile::command::OUTPUT_ENV;
use crate::errors::{MdxwatchError, Result};
use crate::exec::{run_shell, shell_quote};
use crate::types::BoxFuture;

/// Placeholder substituted with the artifact path in a formatter command.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Strategy run on every written artifact.
pub trait OutputFormatter: Send + Sync {
    fn format<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, anyhow::Result<()>>;
}

/// Formatter that leaves artifacts untouched (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl OutputFormatter for NoopFormatter {
    fn format<'a>(&'a self, _path: &'a Path) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async { Ok(()) })
    }
}

/// Formatter backed by an external command, e.g. `deno fmt {path}` or
/// `prettier --write {path}`.
///
/// `{path}` is replaced by the shell-quoted artifact path; a template without
/// the placeholder gets the path appended as its last argument.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    template: String,
}

impl CommandFormatter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The concrete command line for `path`.
    pub fn command_for(&self, path: &Path) -> String {
        let quoted = shell_quote(&path.to_string_lossy());
        if self.template.contains(PATH_PLACEHOLDER) {
            self.template.replace(PATH_PLACEHOLDER, &quoted)
        } else {
            format!("{} {}", self.template, quoted)
        }
    }
}

impl OutputFormatter for CommandFormatter {
    fn format<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            let cmd = self.command_for(path);
            run_shell(&cmd, None, &[(OUTPUT_ENV, path)]).await?;
            Ok(())
        })
    }
}

/// Callback told about the artifacts written by one batch.
pub type BatchCallback = Arc<dyn Fn(&[PathBuf]) + Send + Sync>;

/// Formatter plus batch notification, run after writes.
///
/// Errors are returned to the caller; at startup they abort the precompile
/// pass, while watching they only fail the path being processed.
#[derive(Clone)]
pub struct PostProcessHook {
    formatter: Arc<dyn OutputFormatter>,
    on_batch_compiled: Option<BatchCallback>,
}

impl std::fmt::Debug for PostProcessHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostProcessHook")
            .field("on_batch_compiled", &self.on_batch_compiled.is_some())
            .finish_non_exhaustive()
    }
}

impl PostProcessHook {
    pub fn new(formatter: Arc<dyn OutputFormatter>, on_batch_compiled: Option<BatchCallback>) -> Self {
        Self {
            formatter,
            on_batch_compiled,
        }
    }

    /// Format each path in `written`, then notify the caller once.
    pub async fn run(&self, written: &[PathBuf]) -> Result<()> {
        for path in written {
            debug!(?path, "formatting artifact");
            self.formatter
                .format(path)
                .await
                .map_err(|err| MdxwatchError::PostProcess(format!("{:?}: {err:#}", path)))?;
        }

        if let Some(callback) = &self.on_batch_compiled {
            callback(written);
        }

        info!(count = written.len(), "post-processed batch");
        Ok(())
    }
}
