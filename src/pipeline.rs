//! The fetch → extract → aggregate → render run
//!
//! Strictly sequential. Every per-source failure degrades to an absent value
//! or a skipped chart and is reported on the output; only I/O problems with
//! the chart files abort the run.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::charts::{render_bar_chart, render_trend_chart, TrendChart};
use crate::config::{AppConfig, OutputMode};
use crate::error::InflationError;
use crate::history::{HistoricalSeries, HistoryClient, HistoryOutcome};
use crate::indicators::{IndicatorReading, ReadingTable, SeriesKey};
use crate::reports;
use crate::scraping::{scrape_reading, CellExtractor, HttpClient};

/// How the historical stage ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStatus {
    /// Mode does not ask for trend charts
    Skipped,
    /// Mode asks for them but no API key is configured
    NotConfigured,
    /// The US/India CPI pair could not be fetched
    MissingCpi,
    /// CPI chart written; PPI/WPI chart written when both series came back
    Rendered { cpi: PathBuf, ppi_wpi: Option<PathBuf> },
}

#[derive(Debug)]
pub struct RunReport {
    pub table: ReadingTable,
    pub bar_chart: Option<PathBuf>,
    pub history: HistoryStatus,
}

pub struct Pipeline<'a, C: HttpClient + ?Sized> {
    config: &'a AppConfig,
    client: &'a C,
    extractor: CellExtractor,
    json: bool,
}

impl<'a, C: HttpClient + ?Sized> Pipeline<'a, C> {
    pub fn new(config: &'a AppConfig, client: &'a C) -> Result<Self> {
        let extractor = CellExtractor::new(&config.selector)
            .map_err(|e| InflationError::Config(e.to_string()))?;
        Ok(Self {
            config,
            client,
            extractor,
            json: false,
        })
    }

    /// Print the table as JSON; status lines go to the log instead of `out`
    pub fn json_output(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunReport> {
        info!("Starting run in {} mode", self.config.mode.as_str());

        let readings = self.scrape_all(out)?;
        let table = ReadingTable::assemble(readings);

        if self.json {
            writeln!(out, "{}", reports::format_readings_json(&table))?;
        } else {
            write!(out, "{}", reports::format_latest_lines(&table))?;
            write!(out, "{}", reports::format_readings_table(&table))?;
        }

        let bar_chart = if self.config.mode.draws_bar_chart() {
            let path = self.config.bar_chart_path.clone();
            render_bar_chart(&table, &path)
                .with_context(|| format!("Failed to write bar chart {}", path.display()))?;
            self.notice(
                out,
                &format!("{} Bar chart saved to {}", "✓".green().bold(), path.display()),
            )?;
            Some(path)
        } else {
            None
        };

        let history = if self.config.mode == OutputMode::Historical {
            self.render_history(out)?
        } else {
            if self.config.api_key().is_some() {
                info!(
                    "API key is set but mode is {}; trend charts need --mode historical",
                    self.config.mode.as_str()
                );
            }
            HistoryStatus::Skipped
        };

        info!(
            "Run complete: {}/4 readings available",
            table.available_count()
        );
        Ok(RunReport {
            table,
            bar_chart,
            history,
        })
    }

    fn scrape_all<W: Write>(&self, out: &mut W) -> Result<Vec<IndicatorReading>> {
        let mut readings = Vec::with_capacity(SeriesKey::ALL.len());
        for series in SeriesKey::ALL {
            let reading = scrape_reading(
                self.client,
                &self.extractor,
                series,
                &self.config.scrape_base_url,
            );
            if let Some(reason) = reading.failure.as_deref() {
                let url = reading.source_url.as_deref().unwrap_or_default();
                self.alert(
                    out,
                    &format!("{} Error fetching {}: {}", "✗".red().bold(), url, reason),
                )?;
            }
            readings.push(reading);
        }
        Ok(readings)
    }

    fn render_history<W: Write>(&self, out: &mut W) -> Result<HistoryStatus> {
        let history = HistoryClient::new(
            self.client,
            self.config.api_key(),
            &self.config.api_base_url,
        );
        if !history.is_configured() {
            self.alert(
                out,
                &format!(
                    "\n{} API key not provided – trend charts not downloaded.",
                    "⚠".yellow().bold()
                ),
            )?;
            return Ok(HistoryStatus::NotConfigured);
        }

        self.notice(out, "\nFetching historical data using API...")?;

        let us_cpi = self.fetch_history(&history, SeriesKey::UsCpi, out)?;
        let us_ppi = self.fetch_history(&history, SeriesKey::UsPpi, out)?;
        let india_cpi = self.fetch_history(&history, SeriesKey::IndiaCpi, out)?;
        let india_wpi = self.fetch_history(&history, SeriesKey::IndiaWpi, out)?;

        let (Some(us_cpi), Some(india_cpi)) = (us_cpi, india_cpi) else {
            self.alert(
                out,
                &format!(
                    "{} No historical CPI data – skipping trend charts.",
                    "⚠".yellow().bold()
                ),
            )?;
            return Ok(HistoryStatus::MissingCpi);
        };

        let cpi_path = self.config.cpi_trend_path();
        render_trend_chart(
            &TrendChart {
                title: "CPI Trend: United States vs India",
                y_desc: "Inflation Rate (%)",
                lines: vec![&us_cpi, &india_cpi],
            },
            &cpi_path,
        )
        .with_context(|| format!("Failed to write trend chart {}", cpi_path.display()))?;
        self.notice(
            out,
            &format!("{} CPI trend chart saved to {}", "✓".green().bold(), cpi_path.display()),
        )?;

        let ppi_wpi = match (us_ppi, india_wpi) {
            (Some(us_ppi), Some(india_wpi)) => {
                let path = self.config.ppi_wpi_trend_path();
                render_trend_chart(
                    &TrendChart {
                        title: "PPI/WPI Trend: United States vs India",
                        y_desc: "Producer/Wholesale Inflation (%)",
                        lines: vec![&us_ppi, &india_wpi],
                    },
                    &path,
                )
                .with_context(|| format!("Failed to write trend chart {}", path.display()))?;
                self.notice(
                    out,
                    &format!(
                        "{} PPI/WPI trend chart saved to {}",
                        "✓".green().bold(),
                        path.display()
                    ),
                )?;
                Some(path)
            }
            _ => {
                info!("PPI/WPI history incomplete, skipping second trend chart");
                None
            }
        };

        Ok(HistoryStatus::Rendered {
            cpi: cpi_path,
            ppi_wpi,
        })
    }

    /// One series' history; failures are reported and come back as `None`
    fn fetch_history<W: Write>(
        &self,
        history: &HistoryClient<'_, C>,
        series: SeriesKey,
        out: &mut W,
    ) -> Result<Option<HistoricalSeries>> {
        let outcome = history.fetch(series);
        if let HistoryOutcome::Failed { url, reason } = &outcome {
            self.alert(
                out,
                &format!(
                    "{} Error fetching {} history from {}: {}",
                    "✗".red().bold(),
                    series.label(),
                    url,
                    reason
                ),
            )?;
        }
        Ok(outcome.into_series().filter(|s| !s.is_empty()))
    }

    fn notice<W: Write>(&self, out: &mut W, line: &str) -> Result<()> {
        if self.json {
            info!("{}", line.trim());
        } else {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn alert<W: Write>(&self, out: &mut W, line: &str) -> Result<()> {
        if self.json {
            warn!("{}", line.trim());
        } else {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
