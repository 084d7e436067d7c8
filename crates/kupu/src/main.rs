use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use kupu::cli::Cli;
use kupu::commands::run;
use kupu::config::{Config, DEFAULT_LOG_LEVEL};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli);
    init_tracing(&config.log_level);
    debug!(?config, "resolved configuration");

    let output = run(&cli.command, &config)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
