use clap::Parser;
use std::path::PathBuf;

use inflation_watch::{AppConfig, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "inflation-watch")]
#[command(
    version,
    about = "Latest and historical US & India inflation (CPI, PPI/WPI)"
)]
#[command(
    long_about = "Scrape the latest CPI and PPI/WPI readings for the United States and India from tradingeconomics.com, print them as a table and render a bar chart. With an API key, also download historical series and draw trend charts."
)]
pub struct Cli {
    /// Output mode: console only, bar chart, or bar chart plus historical trends
    #[arg(short, long, value_enum)]
    pub mode: Option<OutputMode>,

    /// tradingeconomics API client key (enables historical trend charts)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Bar chart output path (SVG)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for the historical trend charts
    #[arg(long)]
    pub trend_dir: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the scrape site root
    #[arg(long, hide = true)]
    pub scrape_base_url: Option<String>,

    /// Override the historical API root
    #[arg(long, hide = true)]
    pub api_base_url: Option<String>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Output the readings table in JSON format
    #[arg(long = "json")]
    pub json: bool,
}

impl Cli {
    /// Flags take precedence over file and environment values
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(output) = &self.output {
            config.bar_chart_path = output.clone();
        }
        if let Some(dir) = &self.trend_dir {
            config.trend_dir = dir.clone();
        }
        if let Some(url) = &self.scrape_base_url {
            config.scrape_base_url = url.clone();
        }
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
    }
}
