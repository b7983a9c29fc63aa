// src/compile/command.rs

use anyhow::Context;

use crate::compile::invoker::CompileCallback;
use crate::exec::run_shell;
use crate::types::{BoxFuture, CompileRequest, CompileResult};

/// Environment variable carrying the source path to a compile command.
pub const SOURCE_ENV: &str = "MDXWATCH_SOURCE";
/// Environment variable carrying the derived artifact path to a compile command.
pub const OUTPUT_ENV: &str = "MDXWATCH_OUTPUT";

/// Compile callback backed by an external command.
///
/// The source text goes to the command's stdin and its stdout becomes the
/// artifact text, e.g. `cmd = "node scripts/compile-mdx.mjs"`. The command
/// also sees `MDXWATCH_SOURCE` and `MDXWATCH_OUTPUT` in its environment.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    cmd: String,
}

impl CommandCompiler {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }
}

impl CompileCallback for CommandCompiler {
    fn compile<'a>(
        &'a self,
        request: &'a CompileRequest,
    ) -> BoxFuture<'a, anyhow::Result<CompileResult>> {
        Box::pin(async move {
            let envs = [
                (SOURCE_ENV, request.source_path.as_path()),
                (OUTPUT_ENV, request.output_path.as_path()),
            ];
            let output = run_shell(&self.cmd, Some(&request.source_text), &envs)
                .await
                .with_context(|| format!("compile command `{}`", self.cmd))?;

            Ok(CompileResult {
                text: output.stdout,
                output_path: request.output_path.clone(),
            })
        })
    }
}
