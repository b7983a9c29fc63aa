// tests/commands.rs

#![cfg(unix)]

mod common;
use crate::common::builders::{created, Site};
use crate::common::{init_tracing, with_timeout, TestResult};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mdxwatch::compile::{CommandCompiler, CompileCallback};
use mdxwatch::exec::run_shell;
use mdxwatch::output::{CommandFormatter, OutputFormatter};
use mdxwatch::types::CompileRequest;

fn request(source: &str, text: &str, output: &str) -> CompileRequest {
    CompileRequest {
        source_path: PathBuf::from(source),
        source_text: text.to_string(),
        output_path: PathBuf::from(output),
    }
}

#[tokio::test]
async fn command_compiler_pipes_source_through_stdin() -> TestResult {
    with_timeout(async {
        init_tracing();

        let compiler = CommandCompiler::new("tr a-z A-Z");
        let result = compiler
            .compile(&request("/site/a.mdx", "hello world", "/site/a.jsx"))
            .await?;

        assert_eq!(result.text, "HELLO WORLD");
        assert_eq!(result.output_path, PathBuf::from("/site/a.jsx"));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn command_compiler_exports_paths_in_environment() -> TestResult {
    with_timeout(async {
        init_tracing();

        let compiler =
            CommandCompiler::new(r#"cat >/dev/null; printf '%s|%s' "$MDXWATCH_SOURCE" "$MDXWATCH_OUTPUT""#);
        let result = compiler
            .compile(&request("/site/a.mdx", "ignored", "/site/a.jsx"))
            .await?;

        assert_eq!(result.text, "/site/a.mdx|/site/a.jsx");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn command_compiler_failure_carries_stderr() -> TestResult {
    with_timeout(async {
        init_tracing();

        let compiler = CommandCompiler::new("echo 'syntax error on line 3' >&2; exit 2");
        let err = compiler
            .compile(&request("/site/a.mdx", "text", "/site/a.jsx"))
            .await
            .expect_err("non-zero exit should fail");

        let msg = format!("{err:#}");
        assert!(msg.contains("syntax error on line 3"), "got {msg}");
        assert!(msg.contains("code 2"), "got {msg}");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn command_ignoring_stdin_still_succeeds() -> TestResult {
    with_timeout(async {
        init_tracing();

        let big = "x".repeat(1 << 20);
        let output = run_shell("echo done", Some(&big), &[]).await?;
        assert_eq!(output.stdout.trim(), "done");
        Ok(())
    })
    .await
}

#[test]
fn command_formatter_substitutes_quoted_path() {
    let with_placeholder = CommandFormatter::new("fmt --write {path}");
    assert_eq!(
        with_placeholder.command_for(Path::new("/site/it's here.jsx")),
        r#"fmt --write '/site/it'\''s here.jsx'"#
    );

    let without = CommandFormatter::new("fmt");
    assert_eq!(without.command_for(Path::new("/site/a.jsx")), "fmt '/site/a.jsx'");
}

#[tokio::test]
async fn command_formatter_runs_on_artifact() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        let artifact = site.write("a.jsx", "raw");

        let formatter = CommandFormatter::new("printf formatted > {path}");
        formatter.format(&artifact).await?;

        assert_eq!(site.read("a.jsx").as_deref(), Some("formatted"));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn pipeline_with_command_collaborators() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        let source = site.write("posts/new.mdx", "hello");

        let mut pipeline = site.pipeline(
            site.config()
                .compile(Arc::new(CommandCompiler::new("tr a-z A-Z")))
                .enable_post_process(true)
                .formatter(Arc::new(CommandFormatter::new("printf '\\n' >> {path}"))),
        );

        pipeline.handle_event(&created(&[source])).await;

        assert_eq!(site.read("posts/new.jsx").as_deref(), Some("HELLO\n"));
        assert_eq!(pipeline.stats().failed, 0);
        Ok(())
    })
    .await
}
