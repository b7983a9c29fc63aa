// src/engine/runtime.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, trace};

use crate::compile::CompileInvoker;
use crate::config::WatchConfiguration;
use crate::errors::Result;
use crate::fs::{is_not_found, FileSystem};
use crate::output::{ArtifactWriter, PostProcessHook};
use crate::types::{CompileRequest, SourceEvent};
use crate::watch::path_utils::display_path;
use crate::watch::{scan, WatchMessage};

use super::core::{plan_event, PathAction};
use super::{PipelineState, PipelineStats};

/// Drives the whole build: one precompile pass, then one event at a time
/// from the watcher until the stream ends.
///
/// Everything runs on the task that calls [`run`](Self::run); there is never
/// more than one compile in flight, paths of an event are handled in the
/// order they were reported, and events in the order they were delivered.
pub struct Pipeline {
    config: WatchConfiguration,
    fs: Arc<dyn FileSystem>,
    invoker: CompileInvoker,
    writer: ArtifactWriter,
    hook: PostProcessHook,
    state: PipelineState,
    stats: PipelineStats,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn new(config: WatchConfiguration, fs: Arc<dyn FileSystem>) -> Self {
        let invoker = CompileInvoker::new(Arc::clone(config.compile()));
        let writer = ArtifactWriter::new(Arc::clone(&fs));
        let hook = PostProcessHook::new(
            Arc::clone(config.formatter()),
            config.on_batch_compiled().cloned(),
        );
        Self {
            config,
            fs,
            invoker,
            writer,
            hook,
            state: PipelineState::Idle,
            stats: PipelineStats::default(),
        }
    }

    pub fn config(&self) -> &WatchConfiguration {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = ?self.state, to = ?next, "pipeline state change");
        self.state = next;
    }

    /// Precompile (when enabled), then watch `events` until the stream ends.
    ///
    /// Returns an error if the precompile pass fails or the event stream
    /// reports an error; per-path failures while watching are only logged.
    pub async fn run(&mut self, events: mpsc::Receiver<WatchMessage>) -> Result<()> {
        if self.config.enable_precompile() {
            self.precompile().await?;
        } else {
            debug!("precompile disabled");
        }
        self.watch(events).await
    }

    /// Compile every matching file under the root once.
    ///
    /// Files are handled one after another. Any failure aborts the pass and
    /// leaves the pipeline `Terminated`. On success the written artifact
    /// paths are returned (and handed to the post-process hook as one batch).
    pub async fn precompile(&mut self) -> Result<Vec<PathBuf>> {
        self.transition(PipelineState::Precompiling);
        match self.precompile_inner().await {
            Ok(written) => Ok(written),
            Err(err) => {
                error!(error = %err, "precompile failed; aborting");
                self.transition(PipelineState::Terminated);
                Err(err)
            }
        }
    }

    async fn precompile_inner(&mut self) -> Result<Vec<PathBuf>> {
        let sources = scan(self.fs.as_ref(), self.config.root(), self.config.filter())?;
        info!(count = sources.len(), root = ?self.config.root(), "precompiling sources");

        let mut written = Vec::with_capacity(sources.len());
        for source in sources {
            let output = self.config.output_path_for(&source);
            let text = self.fs.read_to_string(&source)?;
            written.push(self.compile_and_write(source, text, output).await?);
        }

        if self.config.enable_post_process() {
            self.hook.run(&written).await?;
        }

        info!(count = written.len(), "precompile finished");
        Ok(written)
    }

    /// Consume the event stream until it closes (`Ok`) or yields an error
    /// (`Err`). Either way the pipeline ends up `Terminated`.
    pub async fn watch(&mut self, mut events: mpsc::Receiver<WatchMessage>) -> Result<()> {
        self.transition(PipelineState::Watching);
        info!(root = ?self.config.root(), pattern = %self.config.filter().as_str(), "watching for changes");

        while let Some(message) = events.recv().await {
            match message {
                Ok(event) => self.handle_event(&event).await,
                Err(err) => {
                    error!(error = %err, "event stream failed; stopping");
                    self.transition(PipelineState::Terminated);
                    return Err(err);
                }
            }
        }

        info!("event stream closed; stopping");
        self.transition(PipelineState::Terminated);
        Ok(())
    }

    /// Process one event. Each path is its own failure boundary: an error is
    /// logged and counted, and the next path is processed as usual.
    pub async fn handle_event(&mut self, event: &SourceEvent) {
        let actions = plan_event(event, self.config.filter(), self.config.format_output());
        if actions.is_empty() {
            trace!(?event, "nothing to do for event");
            return;
        }

        for action in actions {
            if let Err(err) = self.handle_action(&action).await {
                self.stats.failed += 1;
                error!(
                    source = %display_path(self.config.root(), action.source()),
                    error = %err,
                    "failed to process path; continuing"
                );
            }
        }
    }

    async fn handle_action(&mut self, action: &PathAction) -> Result<()> {
        match action {
            PathAction::Remove { output, .. } => {
                info!("Removing {}", display_path(self.config.root(), output));
                self.remove_artifact(output)
            }
            PathAction::Compile { source, output } => {
                let text = match self.fs.read_to_string(source) {
                    Ok(text) => text,
                    // Deleted between the event and our read.
                    Err(err) if is_not_found(&err) => {
                        debug!(?source, "source vanished; removing its artifact");
                        return self.remove_artifact(output);
                    }
                    Err(err) => return Err(err.into()),
                };

                let written = self
                    .compile_and_write(source.clone(), text, output.clone())
                    .await?;

                if self.config.enable_post_process() {
                    self.hook.run(std::slice::from_ref(&written)).await?;
                }
                Ok(())
            }
        }
    }

    fn remove_artifact(&mut self, output: &Path) -> Result<()> {
        if self.writer.remove(output)? {
            self.stats.removed += 1;
        }
        Ok(())
    }

    /// Compile `text` and write it to `output`, returning the written path.
    ///
    /// The artifact always lands at `output`, the path derived before the
    /// compiler ran, whatever path the compiler reports.
    async fn compile_and_write(
        &mut self,
        source: PathBuf,
        text: String,
        output: PathBuf,
    ) -> Result<PathBuf> {
        let root = self.config.root();
        info!(
            "Compiling {} to {}",
            display_path(root, &source),
            display_path(root, &output)
        );

        let request = CompileRequest {
            source_path: source,
            source_text: text,
            output_path: output,
        };
        let result = self.invoker.invoke(&request).await?;

        if result.output_path != request.output_path {
            debug!(
                reported = ?result.output_path,
                derived = ?request.output_path,
                "compile callback reported a different output path; using the derived one"
            );
        }

        self.writer.write(&request.output_path, &result.text)?;
        self.stats.compiled += 1;
        Ok(request.output_path)
    }
}
