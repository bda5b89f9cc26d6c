use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use redmine_board::cli::{self, Command};
use redmine_board::server::{self, AppState};
use redmine_board::{config, providers, render};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let serve = match cli::parse_args(&args)? {
        Command::Help => {
            cli::print_help();
            return Ok(());
        }
        Command::Serve(serve) => serve,
    };

    init_logging(serve.log_level)?;

    let config = config::load_config(&serve.config_path).context("Failed to load config")?;
    let template = render::Template::page().context("Failed to parse template")?;

    let state = AppState {
        providers: providers::create_providers(&config),
        template,
    };

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, serve.port));
    server::serve(addr, state).await
}

fn init_logging(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}
