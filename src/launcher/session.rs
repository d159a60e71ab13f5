use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use log::{info, warn};

use super::{executor, model::LauncherModel, model::State, render};
use crate::{config::Menu, platform::Environment};

/// Fixed delays of the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pauses {
    /// After "Invalid option", before the menu is redrawn.
    pub invalid_input: Duration,
    /// After a command finished, before the menu is redrawn.
    pub after_command: Duration,
}

impl Default for Pauses {
    fn default() -> Self {
        Self {
            invalid_input: Duration::from_secs(2),
            after_command: Duration::from_secs(5),
        }
    }
}

impl Pauses {
    pub fn none() -> Self {
        Self {
            invalid_input: Duration::ZERO,
            after_command: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user entered `q`.
    Quit,
    /// The menu has too many items; the loop never started.
    OverLimit,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading stdin failed or hit end of input.
    #[error("{0}")]
    InputRead(#[source] io::Error),

    #[error("writing to terminal: {0}")]
    Output(#[from] io::Error),
}

/// Runs the menu until the user quits.
///
/// `input` only feeds the prompt; commands get a null stdin.
pub fn run<R, W>(
    menu: &Menu,
    mut input: R,
    mut output: W,
    env: &mut dyn Environment,
    pauses: &Pauses,
) -> Result<Exit, SessionError>
where
    R: BufRead,
    W: Write,
{
    if let Err(err) = menu.ensure_within_limit() {
        warn!("{err}");
        writeln!(output, "Maximum limit of {} menu items exceeded.", err.max)?;
        writeln!(output, "Please reduce the number of items in the menu.")?;
        output.flush()?;
        return Ok(Exit::OverLimit);
    }

    let mut model = LauncherModel::new(menu.items.len());
    while model.state() == State::Displaying {
        clear_screen(env, &mut output)?;
        output.write_all(render::render_menu(menu).as_bytes())?;
        output.write_all(render::prompt(menu.items.len()).as_bytes())?;
        output.flush()?;

        let line = read_line(&mut input)?;
        let update = model.handle(&line);

        if let Some(item) = update.dispatch.and_then(|i| menu.items.get(i)) {
            info!("selected '{}'", item.label);
            executor::execute(item, env, &mut output, pauses.after_command)?;
        }

        if update.invalid_input {
            writeln!(output, "Invalid option. Please try again.")?;
            output.flush()?;
            env.pause(pauses.invalid_input);
        }
    }

    clear_screen(env, &mut output)?;
    info!("session ended by user");
    Ok(Exit::Quit)
}

/// Clears through `env` after flushing `output`, so nothing buffered lands
/// on the fresh screen. A failed clear is reported and otherwise ignored.
pub(crate) fn clear_screen<W: Write>(env: &mut dyn Environment, output: &mut W) -> io::Result<()> {
    output.flush()?;
    if let Err(err) = env.clear_screen() {
        warn!("clear screen failed: {err:#}");
        writeln!(output, "Could not clear screen: {err:#}")?;
    }
    Ok(())
}

/// Reads one raw line. Bytes that are not UTF-8 are replaced rather than
/// rejected, so they decode as an invalid selection.
fn read_line<R: BufRead>(input: &mut R) -> Result<String, SessionError> {
    let mut buf = Vec::new();
    let n = input
        .read_until(b'\n', &mut buf)
        .map_err(SessionError::InputRead)?;
    if n == 0 {
        return Err(SessionError::InputRead(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "EOF",
        )));
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
