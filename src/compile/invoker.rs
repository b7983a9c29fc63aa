// src/compile/invoker.rs

//! Pluggable compiler abstraction.
//!
//! The pipeline talks to a `CompileCallback` instead of a concrete compiler.
//! This makes it easy to plug in an external command in production and a
//! fake in tests.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{MdxwatchError, Result};
use crate::types::{BoxFuture, CompileRequest, CompileResult};

/// Turns source text into artifact text.
///
/// For repeated builds to be reproducible the output should depend only on
/// `request.source_text`. The `output_path` of the returned result is not
/// used to decide where the artifact is written.
pub trait CompileCallback: Send + Sync {
    fn compile<'a>(
        &'a self,
        request: &'a CompileRequest,
    ) -> BoxFuture<'a, anyhow::Result<CompileResult>>;
}

/// Synchronous closures work as callbacks too.
impl<F> CompileCallback for F
where
    F: Fn(&CompileRequest) -> anyhow::Result<CompileResult> + Send + Sync,
{
    fn compile<'a>(
        &'a self,
        request: &'a CompileRequest,
    ) -> BoxFuture<'a, anyhow::Result<CompileResult>> {
        let result = self(request);
        Box::pin(async move { result })
    }
}

/// Default callback: the artifact is the source text, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCompiler;

impl CompileCallback for IdentityCompiler {
    fn compile<'a>(
        &'a self,
        request: &'a CompileRequest,
    ) -> BoxFuture<'a, anyhow::Result<CompileResult>> {
        Box::pin(async move {
            Ok(CompileResult {
                text: request.source_text.clone(),
                output_path: request.output_path.clone(),
            })
        })
    }
}

/// Uniform entry point for running the configured compile callback.
///
/// Performs no recovery: a failing callback comes back as
/// [`MdxwatchError::Compile`] and the caller decides what it means.
#[derive(Clone)]
pub struct CompileInvoker {
    callback: Arc<dyn CompileCallback>,
}

impl std::fmt::Debug for CompileInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompileInvoker").finish_non_exhaustive()
    }
}

impl CompileInvoker {
    pub fn new(callback: Arc<dyn CompileCallback>) -> Self {
        Self { callback }
    }

    pub async fn invoke(&self, request: &CompileRequest) -> Result<CompileResult> {
        debug!(
            source = ?request.source_path,
            output = ?request.output_path,
            bytes = request.source_text.len(),
            "invoking compile callback"
        );

        self.callback
            .compile(request)
            .await
            .map_err(|source| MdxwatchError::Compile {
                path: request.source_path.clone(),
                source,
            })
    }
}
