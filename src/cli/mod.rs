//! Command-line interface for appname
//!
//! Global flags choose the config file, environment file and log file. Before
//! any subcommand runs, configuration is consolidated and the file logger is
//! initialised.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::Path;

use crate::config::resolve;
use crate::domain::Config;
use crate::error::{with_exit_code, EXIT_INVALID_ARGS};
use crate::{logging, APP_NAME, DEFAULT_LOG_PATH, VERSION};

mod version;

#[derive(Parser, Debug)]
#[command(name = APP_NAME, version = VERSION)]
#[command(author, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config file
    #[arg(
        long = "config-file",
        alias = "cfg",
        value_name = "FILE",
        env = "APPNAME_CONFIG",
        global = true,
        hide = true
    )]
    pub config_file: Option<String>,

    /// Path to environment file
    #[arg(
        long = "environment-file",
        alias = "env",
        value_name = "FILE",
        env = "APPNAME_ENV",
        global = true,
        hide = true
    )]
    pub environment_file: Option<String>,

    /// Path to log file
    #[arg(
        short = 'l',
        long,
        value_name = "FILE",
        env = "APPNAME_LOG",
        global = true,
        hide = true
    )]
    pub log: Option<String>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Version => "version",
        }
    }
}

/// Parse `args` (program name first), bootstrap and dispatch.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let matches = match Cli::command().try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(usage_error(err)),
    };
    let cli = Cli::from_arg_matches(&matches).map_err(usage_error)?;

    bootstrap(&cli, &positional_args(&matches))?;

    match cli.command {
        Some(Commands::Version) => version::run(),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Consolidate configuration, initialise logging and record the invocation.
fn bootstrap(cli: &Cli, args: &[String]) -> Result<Config> {
    let resolved = resolve(
        cli.config_file.as_deref().unwrap_or_default(),
        cli.environment_file.as_deref().unwrap_or_default(),
        DEFAULT_LOG_PATH,
        cli.log.as_deref().unwrap_or_default(),
        std::env::vars_os(),
    )
    .context("config")?;

    logging::init(Path::new(&resolved.config.log_path), cli.verbose);
    resolved.log_sources();

    let command = cli.command.as_ref().map_or("default", Commands::name);
    logging::log_cli_action(command, args);

    Ok(resolved.config)
}

/// Subcommand name followed by its positional values; flags and their values
/// are left out.
fn positional_args(matches: &ArgMatches) -> Vec<String> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        return Vec::new();
    };
    let mut args = vec![name.to_string()];
    let command = Cli::command();
    if let Some(sub) = command.find_subcommand(name) {
        for arg in sub.get_positionals() {
            if let Some(values) = sub_matches.get_raw(arg.get_id().as_str()) {
                args.extend(values.map(|v| v.to_string_lossy().into_owned()));
            }
        }
    }
    args
}

/// Clap usage error with exit code 2, minus clap's own `error: ` prefix.
fn usage_error(err: clap::Error) -> anyhow::Error {
    let rendered = err.to_string();
    let message = rendered.trim_end();
    let message = message.strip_prefix("error: ").unwrap_or(message);
    with_exit_code(anyhow::anyhow!(message.to_string()), EXIT_INVALID_ARGS)
}
