use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod state;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = state::load_config(cli.config.as_deref())?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    commands::run_command(cli, config)
}
