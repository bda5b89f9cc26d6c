use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::Level;

use crate::config::DEFAULT_CONFIG_PATH;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve(ServeArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    pub config_path: PathBuf,
    pub port: u16,
    pub log_level: Level,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            port: DEFAULT_PORT,
            log_level: Level::INFO,
        }
    }
}

/// Parse the arguments that follow the program name.
///
/// Supported forms:
///   redmine-board
///   redmine-board -c sources.yaml
///   redmine-board --config sources.toml --port 9000 -v
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut serve = ServeArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-c" | "--config" => {
                i += 1;
                let value = args.get(i).context("Missing value for -c/--config flag")?;
                serve.config_path = PathBuf::from(value);
            }
            "-p" | "--port" => {
                i += 1;
                let value = args.get(i).context("Missing value for -p/--port flag")?;
                serve.port = value
                    .parse()
                    .with_context(|| format!("Invalid port: {value}"))?;
            }
            "-v" | "--verbose" => serve.log_level = Level::DEBUG,
            "-q" | "--quiet" => serve.log_level = Level::WARN,
            other => bail!("Unknown argument: {other}\n\nRun with --help for usage."),
        }
        i += 1;
    }

    Ok(Command::Serve(serve))
}

pub fn print_help() {
    println!("redmine-board — issues from several Redmine instances on one page\n");
    println!("USAGE:");
    println!("  redmine-board [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -c, --config <path>  Source list, YAML or .toml (default: {DEFAULT_CONFIG_PATH})");
    println!("  -p, --port <port>    Port to listen on (default: {DEFAULT_PORT})");
    println!("  -v, --verbose        Log at debug level");
    println!("  -q, --quiet          Log warnings and errors only");
    println!("  -h, --help           Show this help");
}
