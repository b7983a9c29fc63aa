// src/exec/mod.rs

//! Process execution layer.
//!
//! External tools (a compile command, a formatter) are run through the
//! platform shell with `tokio::process::Command`.

pub mod command;

pub use command::{run_shell, shell_command, shell_quote, CommandOutput};
