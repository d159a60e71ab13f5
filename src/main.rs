use std::{
    env,
    ffi::OsString,
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{builder::BoolishValueParser, ArgAction, Parser};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use termmenu::{
    config::{self, ConfigError},
    launcher::{self, Exit, Pauses, SessionError},
    platform, usage,
};

#[derive(Parser, Debug)]
#[command(
    name = "menu",
    version,
    about = "Boxed terminal menu that runs shell commands",
    disable_help_flag = true
)]
struct Cli {
    /// Create an example config file and exit.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    create: bool,

    /// Display usage instructions.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    help: bool,

    /// Path to the config file (default: $MENU_CONFIG or config.json).
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Append diagnostic logs to this file.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

/// Flags that may be spelled with a single dash, e.g. `-file x` or `-create`.
const LONG_FLAGS: [&str; 5] = ["create", "help", "file", "log", "version"];

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(env::args_os()));

    if let Some(path) = cli.log.as_deref() {
        init_logging(path)?;
    }
    log::info!("menu starting: {cli:?}");

    if cli.help {
        print!("{}", usage::usage());
        return Ok(());
    }

    let path = config::resolve_config_path(cli.file.as_deref());

    if cli.create {
        config::create_example(&path, &mut io::stdout().lock())?;
        println!("Example config.json created.");
        return Ok(());
    }

    let menu = match config::load(&path) {
        Ok(menu) => menu,
        Err(ConfigError::NotFound { path }) => {
            log::warn!("config not found at {}", path.display());
            println!(
                "config.json not found at {}. Run 'menu -help' for usage instructions.",
                path.display()
            );
            return Ok(());
        }
        Err(err) => {
            log::warn!("{err}");
            println!("Could not load config: {err}. Run 'menu -help' for usage instructions.");
            return Ok(());
        }
    };

    let mut env = platform::environment()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    match launcher::run(
        &menu,
        stdin.lock(),
        stdout.lock(),
        &mut *env,
        &Pauses::default(),
    ) {
        Ok(Exit::Quit) | Ok(Exit::OverLimit) => Ok(()),
        Err(SessionError::InputRead(err)) => {
            log::error!("reading input: {err}");
            println!("{err}");
            process::exit(1);
        }
        Err(err) => Err(err).context("menu session"),
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    WriteLogger::init(LevelFilter::Debug, log_config, file).context("install logger")?;
    Ok(())
}

/// Rewrites `-flag` / `-flag=value` to `--flag` / `--flag=value` for the
/// known long flags; everything else passes through untouched.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = s.strip_prefix('-') else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if !rest.starts_with('-') && LONG_FLAGS.contains(&name) {
                return OsString::from(format!("-{s}"));
            }
            arg
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let args = std::iter::once("menu")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::try_parse_from(normalize_args(args)).unwrap()
    }

    #[test]
    fn go_style_flags_are_accepted() {
        let cli = parse(&["-create", "-file", "menus/dev.json"]);
        assert!(cli.create);
        assert!(!cli.help);
        assert_eq!(cli.file, Some(PathBuf::from("menus/dev.json")));

        let cli = parse(&["-file=other.json", "-help"]);
        assert!(cli.help);
        assert_eq!(cli.file, Some(PathBuf::from("other.json")));
    }

    #[test]
    fn boolean_flags_take_explicit_values() {
        let cli = parse(&["-create=true", "-help=false"]);
        assert!(cli.create);
        assert!(!cli.help);

        let cli = parse(&["--help=1", "-create=f"]);
        assert!(cli.help);
        assert!(!cli.create);
    }

    #[test]
    fn bare_boolean_flag_does_not_swallow_next_arg() {
        let cli = parse(&["-create", "-file", "x.json"]);
        assert!(cli.create);
        assert_eq!(cli.file, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn double_dash_flags_still_work() {
        let cli = parse(&["--file", "x.json", "--log", "menu.log"]);
        assert_eq!(cli.file, Some(PathBuf::from("x.json")));
        assert_eq!(cli.log, Some(PathBuf::from("menu.log")));
    }

    #[test]
    fn only_known_flags_are_rewritten() {
        let normalized =
            normalize_args(["menu", "-file", "-odd.json", "-x", "--log"].map(OsString::from));
        assert_eq!(
            normalized,
            ["menu", "--file", "-odd.json", "-x", "--log"].map(OsString::from)
        );
    }

    #[test]
    fn defaults_to_run_mode() {
        let cli = parse(&[]);
        assert!(!cli.create && !cli.help);
        assert_eq!(cli.file, None);
        assert_eq!(cli.log, None);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let args = ["menu", "-bogus"].map(OsString::from);
        assert!(Cli::try_parse_from(normalize_args(args)).is_err());
    }
}
