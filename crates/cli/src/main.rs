mod commands;
mod config;
mod progress;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::AppConfig;
use crate::session::Session;

#[derive(Parser)]
#[command(
    name = "storeseed",
    version,
    about = "Seed, update and empty a store through its Admin REST API"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed payload file, overriding the config
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Save file, overriding the config
    #[arg(long, global = true)]
    save_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let open_session = || -> Result<Session> {
        let config = AppConfig::load(&config_path)?;
        Session::open(&config, cli.data_file, cli.save_file)
    };

    match cli.command.unwrap_or(Command::Menu) {
        Command::Init(args) => commands::init::run(args, &config_path),
        Command::Menu => commands::menu::run(&mut open_session()?).await,
        Command::Create => commands::create::run(&mut open_session()?).await,
        Command::Update => commands::update::run(&mut open_session()?).await,
        Command::Delete(args) => commands::delete::command(args, &mut open_session()?).await,
    }
}
