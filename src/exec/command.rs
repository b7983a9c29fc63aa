// src/exec/command.rs

//! Shell process helper shared by the command compiler and the command
//! formatter.

use std::path::Path;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished shell command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Build a shell command appropriate for the platform.
pub fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

/// Quote `arg` so the platform shell passes it through as one word.
pub fn shell_quote(arg: &str) -> String {
    if cfg!(windows) {
        format!("\"{}\"", arg.replace('"', "\"\""))
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

/// Run `cmd` through the shell, optionally feeding `stdin`, and wait for it.
///
/// `envs` are added to the child's environment. A non-zero exit status is an
/// error carrying the command's stderr.
pub async fn run_shell(
    cmd: &str,
    stdin: Option<&str>,
    envs: &[(&str, &Path)],
) -> Result<CommandOutput> {
    let mut command = shell_command(cmd);
    for (key, value) in envs {
        command.env(key, value);
    }
    command
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(cmd = %cmd, "spawning shell command");

    let mut child = command
        .spawn()
        .with_context(|| format!("spawning `{cmd}`"))?;

    // Feed stdin from its own task so a child that writes before it has read
    // all of its input cannot fill the stdout pipe and stall us.
    let writer = match stdin {
        Some(input) => {
            let mut pipe = child
                .stdin
                .take()
                .context("child stdin was not captured")?;
            let input = input.to_owned();
            // Dropping the pipe at the end of the task closes stdin (EOF).
            Some(tokio::spawn(async move { pipe.write_all(input.as_bytes()).await }))
        }
        None => None,
    };

    let output = child
        .wait_with_output()
        .await
        .with_context(|| format!("waiting for `{cmd}`"))?;

    if let Some(writer) = writer {
        match writer.await.context("stdin writer task panicked")? {
            Ok(()) => {}
            // The child exited without reading all of its input.
            Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!(cmd = %cmd, "child closed stdin early");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("writing stdin of `{cmd}`"));
            }
        }
    }

    let stdout = String::from_utf8(output.stdout)
        .with_context(|| format!("stdout of `{cmd}` is not valid UTF-8"))?;
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !stderr.is_empty() {
        debug!(cmd = %cmd, "stderr: {}", stderr.trim_end());
    }

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        bail!("`{cmd}` exited with code {code}: {}", stderr.trim_end());
    }

    Ok(CommandOutput { stdout, stderr })
}
