// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::loader::DEFAULT_CONFIG_FILE;

/// Command-line arguments for `mdxwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mdxwatch",
    version,
    about = "Compile MDX documents to JSX and keep the output in sync while you edit.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Mdxwatch.toml` in the current working directory; it is fine
    /// for the default file not to exist.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Directory to scan and watch. Overrides `[watch].root`.
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Regular expression selecting source documents. Overrides `[watch].pattern`.
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Skip the initial compile of all matching files.
    #[arg(long)]
    pub no_precompile: bool,

    /// Do not run the formatter / batch hook after writes.
    #[arg(long)]
    pub no_post_process: bool,

    /// Precompile once and exit, no watching.
    #[arg(long, conflicts_with = "no_precompile")]
    pub once: bool,

    /// Print the effective configuration and the files a precompile would
    /// touch, without compiling anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MDXWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// Config path to load and whether the user asked for it explicitly.
    pub fn config_path(&self) -> (String, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (DEFAULT_CONFIG_FILE.to_string(), false),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
