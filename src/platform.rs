use std::time::Duration;

use anyhow::Result;

/// How a shell command ended once it was successfully spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// `code` is `None` when the child was killed by a signal.
    Failed { code: Option<i32> },
}

/// Process-level side effects the launcher needs.
///
/// The session only talks to the terminal and child processes through this
/// trait, so tests can swap in a recorder.
pub trait Environment {
    fn clear_screen(&mut self) -> Result<()>;

    /// Runs `command` through a shell with the launcher's stdout/stderr
    /// inherited and blocks until it exits. `Err` means it never started.
    fn run_shell(&mut self, command: &str) -> Result<CommandOutcome>;

    fn pause(&mut self, duration: Duration);
}

#[cfg(unix)]
mod unix_shell;

#[cfg(unix)]
pub use unix_shell::ShellEnvironment;

pub fn environment() -> Result<Box<dyn Environment>> {
    #[cfg(unix)]
    {
        return Ok(Box::new(unix_shell::ShellEnvironment::default()));
    }

    #[cfg(not(unix))]
    {
        use anyhow::bail;
        bail!("Unsupported OS (menu needs `bash` and `clear`, which are only wired up on Unix).");
    }
}
