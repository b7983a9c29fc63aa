// src/lib.rs

pub mod cli;
pub mod compile;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod output;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, load_or_default, WatchConfiguration};
use crate::engine::Pipeline;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::{event_channel, scan, spawn_watcher};

pub use crate::config::WatchConfigurationBuilder;
pub use crate::errors::MdxwatchError;
pub use crate::types::{CompileRequest, CompileResult, SourceEvent, SourceEventKind};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides merged by the builder)
/// - the file watcher
/// - the pipeline (precompile, then watch)
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let (config_path, explicit) = args.config_path();
    let config_path = PathBuf::from(config_path);
    let file = if explicit {
        load_and_validate(&config_path)
            .with_context(|| format!("loading config {:?}", config_path))?
    } else {
        load_or_default(&config_path)?
    };

    let base_dir = config_base_dir(&config_path);
    let mut builder = WatchConfiguration::builder(&base_dir).apply_config_file(&base_dir, &file);
    if let Some(root) = &args.root {
        builder = builder.root(root);
    }
    if let Some(pattern) = &args.pattern {
        builder = builder.pattern(pattern.clone());
    }
    if args.no_precompile {
        builder = builder.enable_precompile(false);
    }
    if args.no_post_process {
        builder = builder.enable_post_process(false);
    }

    // Resolve the root once so event paths (which notify reports canonical)
    // and scanned paths share a prefix.
    let root = builder
        .root_path()
        .canonicalize()
        .with_context(|| format!("root directory {:?}", builder.root_path()))?;
    let config = builder.root(root).build()?;
    debug!(?config, "effective configuration");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    if args.dry_run {
        print_dry_run(&config, fs.as_ref())?;
        return Ok(());
    }

    let mut pipeline = Pipeline::new(config, fs);

    if args.once {
        if !pipeline.config().enable_precompile() {
            return Err(MdxwatchError::ConfigError(
                "--once needs the precompile pass, but [watch].precompile is false".to_string(),
            )
            .into());
        }
        let written = pipeline.precompile().await?;
        info!(count = written.len(), "--once: precompile done, exiting");
        return Ok(());
    }

    // Start watching before the precompile pass so edits made while it runs
    // are queued rather than missed.
    let (events_tx, events_rx) = event_channel();
    let _watcher = spawn_watcher(pipeline.config().root(), events_tx)?;

    tokio::select! {
        res = pipeline.run(events_rx) => res?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("listening for Ctrl+C")?;
            info!("Ctrl+C received; shutting down");
        }
    }

    let stats = pipeline.stats();
    info!(
        compiled = stats.compiled,
        removed = stats.removed,
        failed = stats.failed,
        "mdxwatch stopped"
    );
    Ok(())
}

/// Directory that relative paths in the config file are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "site/Mdxwatch.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Mdxwatch.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Simple dry-run output: effective settings plus precompile candidates.
fn print_dry_run(config: &WatchConfiguration, fs: &dyn FileSystem) -> Result<()> {
    println!("mdxwatch dry-run");
    println!("  root = {}", config.root().display());
    println!("  pattern = {}", config.filter().as_str());
    println!("  precompile = {}", config.enable_precompile());
    println!("  post_process = {}", config.enable_post_process());
    println!();

    let mut sources = scan(fs, config.root(), config.filter())?;
    // Sorted for display only; the pipeline itself uses scan order.
    sources.sort();

    println!("sources ({}):", sources.len());
    for source in &sources {
        println!(
            "  - {} -> {}",
            source.display(),
            config.output_path_for(source).display()
        );
    }

    debug!("dry-run complete (nothing compiled)");
    Ok(())
}
