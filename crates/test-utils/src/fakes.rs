use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::bail;
use mdxwatch::compile::CompileCallback;
use mdxwatch::output::{BatchCallback, OutputFormatter};
use mdxwatch::types::{BoxFuture, CompileRequest, CompileResult};

/// A fake compiler that:
/// - upper-cases the source text
/// - records the source path of every request
/// - fails for any source whose path contains one of `fail_on`
#[derive(Debug, Clone, Default)]
pub struct FakeCompiler {
    fail_on: Vec<String>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
    reported_output: Option<PathBuf>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every request whose source path contains `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on.push(needle.to_string());
        self
    }

    /// Report `path` as the result's output path instead of the requested one.
    pub fn reporting_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.reported_output = Some(path.into());
        self
    }

    /// Source paths compiled so far, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CompileCallback for FakeCompiler {
    fn compile<'a>(
        &'a self,
        request: &'a CompileRequest,
    ) -> BoxFuture<'a, anyhow::Result<CompileResult>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(request.source_path.clone());

            let path = request.source_path.to_string_lossy();
            if let Some(needle) = self.fail_on.iter().find(|n| path.contains(n.as_str())) {
                bail!("fake compile failure for '{needle}'");
            }

            Ok(CompileResult {
                text: request.source_text.to_uppercase(),
                output_path: self
                    .reported_output
                    .clone()
                    .unwrap_or_else(|| request.output_path.clone()),
            })
        })
    }
}

/// Formatter that records the paths it was asked to format and can be told
/// to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingFormatter {
    fail: bool,
    formatted: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn formatted(&self) -> Vec<PathBuf> {
        self.formatted.lock().unwrap().clone()
    }
}

impl OutputFormatter for RecordingFormatter {
    fn format<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            self.formatted.lock().unwrap().push(path.to_path_buf());
            if self.fail {
                bail!("fake formatter failure");
            }
            Ok(())
        })
    }
}

/// Batch callback that stores each batch it receives.
pub fn recording_batches() -> (BatchCallback, Arc<Mutex<Vec<Vec<PathBuf>>>>) {
    let batches = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&batches);
    let callback: BatchCallback = Arc::new(move |written: &[PathBuf]| {
        sink.lock().unwrap().push(written.to_vec());
    });
    (callback, batches)
}
