mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use sqlmask_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;
    let ctx = commands::Context::new(config, cli.db);

    match cli.command {
        cli::Commands::Mask {
            file,
            json,
            no_save,
        } => commands::mask::handle(&ctx, file, json, no_save).await,
        cli::Commands::Unmask {
            file,
            id,
            mapping,
            json,
        } => commands::unmask::handle(&ctx, file, id, mapping, json).await,
        cli::Commands::History(cmd) => commands::history::handle(&ctx, cmd).await,
        cli::Commands::Serve {
            host,
            port,
            read_only,
        } => commands::serve::handle(&ctx, host, port, read_only).await,
        cli::Commands::Config(cmd) => commands::config::handle(&ctx, cmd),
    }
}
