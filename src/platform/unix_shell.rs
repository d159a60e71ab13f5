use std::{
    io::{self, Write},
    process::{Command, Stdio},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{CommandOutcome, Environment};

const DEFAULT_SHELL: &str = "bash";
const CLEAR_PROGRAM: &str = "clear";
const ANSI_CLEAR: &str = "\x1b[2J\x1b[H";

pub struct ShellEnvironment {
    shell: String,
}

impl ShellEnvironment {
    pub fn new() -> Self {
        Self::with_shell(DEFAULT_SHELL)
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for ShellEnvironment {
    fn clear_screen(&mut self) -> Result<()> {
        let status = Command::new(CLEAR_PROGRAM)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .status();
        match status {
            Ok(status) if status.success() => Ok(()),
            // No usable `clear` (missing binary, no TERM): emit the escape ourselves.
            other => {
                debug!("`{CLEAR_PROGRAM}` unavailable ({other:?}), falling back to ANSI clear");
                let mut stdout = io::stdout();
                stdout
                    .write_all(ANSI_CLEAR.as_bytes())
                    .and_then(|()| stdout.flush())
                    .context("write clear-screen sequence")
            }
        }
    }

    fn run_shell(&mut self, command: &str) -> Result<CommandOutcome> {
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("running {} -c {command:?}", self.shell))?;

        if status.success() {
            return Ok(CommandOutcome::Success);
        }
        warn!("command {command:?} exited with {status}");
        Ok(CommandOutcome::Failed {
            code: status.code(),
        })
    }

    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}
