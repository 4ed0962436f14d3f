//! Boxforge CLI entry point

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref()).await,
        Commands::Scaffold(args) => commands::scaffold::run(args, cli.config.as_deref()).await,
        Commands::Validate(args) => commands::validate::run(args, cli.config.as_deref()).await,
        Commands::Build(args) => commands::build::run(args, cli.config.as_deref()).await,
        Commands::Up(args) => commands::up::run(args, cli.config.as_deref()).await,
        Commands::Ssh(args) => commands::ssh::run(args, cli.config.as_deref()).await,
        Commands::Halt(args) => commands::halt::run(args, cli.config.as_deref()).await,
        Commands::Destroy(args) => commands::destroy::run(args, cli.config.as_deref()).await,
        Commands::Status(args) => commands::status::run(args, cli.config.as_deref()).await,
        Commands::Doctor(args) => commands::doctor::run(args).await,
        Commands::Completions(args) => commands::completions::run(args),
    }
}

/// Map the -v/-q flags onto a tracing filter
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::new(level))
        .init();
}
