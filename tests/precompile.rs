// tests/precompile.rs

mod common;
use crate::common::builders::Site;
use crate::common::fakes::{recording_batches, FakeCompiler, RecordingFormatter};
use crate::common::{init_tracing, with_timeout, TestResult};

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use mdxwatch::engine::PipelineState;
use mdxwatch::MdxwatchError;

#[tokio::test]
async fn precompile_compiles_every_matching_file() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        site.write("index.mdx", "home");
        site.write("posts/one.mdx", "one");
        site.write("posts/nested/two.mdx", "two");
        site.write("posts/readme.txt", "not a source");

        let compiler = FakeCompiler::new();
        let mut pipeline =
            site.pipeline(site.config().compile(Arc::new(compiler.clone())));

        let written = pipeline.precompile().await?;

        // Scan order is not specified; compare as sets.
        let written: BTreeSet<PathBuf> = written.into_iter().collect();
        let expected: BTreeSet<PathBuf> = [
            site.path("index.jsx"),
            site.path("posts/one.jsx"),
            site.path("posts/nested/two.jsx"),
        ]
        .into_iter()
        .collect();
        assert_eq!(written, expected);

        assert_eq!(site.read("index.jsx").as_deref(), Some("HOME"));
        assert_eq!(site.read("posts/one.jsx").as_deref(), Some("ONE"));
        assert_eq!(site.read("posts/nested/two.jsx").as_deref(), Some("TWO"));
        assert!(!site.exists("posts/readme.jsx"));
        assert_eq!(compiler.call_count(), 3);
        assert_eq!(pipeline.stats().compiled, 3);
        assert_eq!(pipeline.state(), PipelineState::Precompiling);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn precompile_skips_hidden_directories() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        site.write("visible.mdx", "seen");
        site.write(".cache/hidden.mdx", "skipped");
        site.write("docs/.drafts/draft.mdx", "skipped too");

        let compiler = FakeCompiler::new();
        let mut pipeline =
            site.pipeline(site.config().compile(Arc::new(compiler.clone())));

        pipeline.precompile().await?;

        assert_eq!(compiler.calls(), vec![site.path("visible.mdx")]);
        assert!(!site.exists(".cache/hidden.jsx"));
        assert!(!site.exists("docs/.drafts/draft.jsx"));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn precompile_failure_is_fatal() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        site.write("broken.mdx", "boom");

        let mut pipeline = site.pipeline(
            site.config()
                .compile(Arc::new(FakeCompiler::new().failing_on("broken.mdx"))),
        );

        let err = pipeline
            .precompile()
            .await
            .expect_err("precompile should fail on a broken source");

        assert!(matches!(err, MdxwatchError::Compile { .. }), "got {err:?}");
        assert_eq!(pipeline.state(), PipelineState::Terminated);
        assert!(!site.exists("broken.jsx"));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn precompile_runs_post_process_once_over_the_batch() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        site.write("a.mdx", "a");
        site.write("b/c.mdx", "c");

        let formatter = RecordingFormatter::new();
        let (callback, batches) = recording_batches();
        let mut pipeline = site.pipeline(
            site.config()
                .enable_post_process(true)
                .formatter(Arc::new(formatter.clone()))
                .on_batch_compiled(callback),
        );

        let written = pipeline.precompile().await?;

        let batches = batches.lock().unwrap().clone();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], written);

        let formatted: BTreeSet<PathBuf> = formatter.formatted().into_iter().collect();
        let expected: BTreeSet<PathBuf> = [site.path("a.jsx"), site.path("b/c.jsx")]
            .into_iter()
            .collect();
        assert_eq!(formatted, expected);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn precompile_of_empty_root_still_notifies_batch() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        let (callback, batches) = recording_batches();
        let mut pipeline = site.pipeline(
            site.config()
                .enable_post_process(true)
                .on_batch_compiled(callback),
        );

        let written = pipeline.precompile().await?;

        assert!(written.is_empty());
        assert_eq!(batches.lock().unwrap().clone(), vec![Vec::<PathBuf>::new()]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn precompile_post_process_failure_is_fatal() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        site.write("a.mdx", "a");

        let mut pipeline = site.pipeline(
            site.config()
                .enable_post_process(true)
                .formatter(Arc::new(RecordingFormatter::failing())),
        );

        let err = pipeline
            .precompile()
            .await
            .expect_err("formatter failure should abort precompile");

        assert!(matches!(err, MdxwatchError::PostProcess(_)), "got {err:?}");
        assert_eq!(pipeline.state(), PipelineState::Terminated);
        // The artifact was written before the formatter ran.
        assert!(site.exists("a.jsx"));
        Ok(())
    })
    .await
}

#[cfg(unix)]
#[tokio::test]
async fn precompile_does_not_follow_directory_links() -> TestResult {
    with_timeout(async {
        init_tracing();

        let site = Site::new();
        site.write("a.mdx", "a");
        std::fs::create_dir_all(site.path("docs"))?;
        // Link back to the root: following it would loop.
        std::os::unix::fs::symlink(site.root(), site.path("docs/loop"))?;

        let compiler = FakeCompiler::new();
        let mut pipeline =
            site.pipeline(site.config().compile(Arc::new(compiler.clone())));

        let written = pipeline.precompile().await?;

        assert_eq!(compiler.calls(), vec![site.path("a.mdx")]);
        assert_eq!(written, vec![site.path("a.jsx")]);
        assert_eq!(pipeline.stats().compiled, 1);
        Ok(())
    })
    .await
}
