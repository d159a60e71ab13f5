use std::{
    io::{self, Write},
    time::Duration,
};

use log::{info, warn};

use super::{render, session};
use crate::{
    config::MenuItem,
    platform::{CommandOutcome, Environment},
};

/// Runs one item's command on a cleared screen, then holds the output on
/// screen for `pause`. Command failures are printed, never returned.
pub fn execute<W: Write>(
    item: &MenuItem,
    env: &mut dyn Environment,
    output: &mut W,
    pause: Duration,
) -> io::Result<()> {
    session::clear_screen(env, output)?;
    writeln!(output, "{}", render::colorize(&item.color, &item.label))?;
    // The child writes straight to the inherited stdout.
    output.flush()?;

    match env.run_shell(&item.command) {
        Ok(CommandOutcome::Success) => info!("command {:?} succeeded", item.command),
        Ok(CommandOutcome::Failed { code: Some(code) }) => {
            writeln!(output, "Error running command: exit status {code}")?;
        }
        Ok(CommandOutcome::Failed { code: None }) => {
            writeln!(output, "Error running command: terminated by signal")?;
        }
        Err(err) => {
            warn!("command {:?} could not start: {err:#}", item.command);
            writeln!(output, "Error running command: {err:#}")?;
        }
    }

    writeln!(
        output,
        "The command [{}] has finished executing",
        item.command
    )?;
    output.flush()?;
    env.pause(pause);
    Ok(())
}
