mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::io::{self, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use inflation_watch::{AppConfig, Pipeline, ReqwestClient};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;
    debug!("Effective config: {:?}", config.mode);

    let client = ReqwestClient::new(config.timeout(), &config.user_agent)?;
    let pipeline = Pipeline::new(&config, &client)?.json_output(cli.json);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    pipeline.run(&mut out)?;
    out.flush()?;

    Ok(())
}
