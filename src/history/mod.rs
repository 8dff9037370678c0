// Historical series from the tradingeconomics JSON API
//
// Only reachable with a client key. Without one, nothing is requested and the
// caller gets `HistoryOutcome::NotConfigured`.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::indicators::SeriesKey;
use crate::scraping::HttpClient;
use crate::utils::redact_url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.tradingeconomics.com";

/// One row of the API response; other fields are ignored
#[derive(Debug, Deserialize)]
struct ApiRow {
    #[serde(rename = "DateTime")]
    date_time: String,
    #[serde(rename = "Value")]
    value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Chronologically ordered (date, value) pairs for one series
#[derive(Debug, Clone)]
pub struct HistoricalSeries {
    pub series: SeriesKey,
    pub points: Vec<HistoricalPoint>,
}

impl HistoricalSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

#[derive(Debug, Clone)]
pub enum HistoryOutcome {
    Series(HistoricalSeries),
    /// No API key configured; no request was made
    NotConfigured,
    /// `url` has the API key redacted and is safe to print
    Failed { url: String, reason: String },
}

impl HistoryOutcome {
    pub fn into_series(self) -> Option<HistoricalSeries> {
        match self {
            HistoryOutcome::Series(s) => Some(s),
            _ => None,
        }
    }
}

/// Authenticated client for the historical endpoint
pub struct HistoryClient<'a, C: HttpClient + ?Sized> {
    client: &'a C,
    api_key: Option<String>,
    base_url: String,
}

impl<'a, C: HttpClient + ?Sized> HistoryClient<'a, C> {
    /// Blank keys count as not configured.
    pub fn new(client: &'a C, api_key: Option<&str>, base_url: &str) -> Self {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        Self {
            client,
            api_key,
            base_url: base_url.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn fetch(&self, series: SeriesKey) -> HistoryOutcome {
        let Some(key) = self.api_key.as_deref() else {
            debug!("No API key, skipping history for {}", series.label());
            return HistoryOutcome::NotConfigured;
        };

        let url = match build_history_url(&self.base_url, series, key) {
            Ok(url) => url,
            Err(err) => {
                return HistoryOutcome::Failed {
                    url: redact_url(&self.base_url),
                    reason: format!("{:#}", err),
                };
            }
        };
        let shown = redact_url(&url);

        info!("Fetching history for {} from {}", series.label(), shown);
        let body = match self.client.get(&url) {
            Ok(body) => body,
            Err(err) => {
                warn!("History fetch failed for {} ({}): {}", series.label(), shown, err);
                return HistoryOutcome::Failed {
                    url: shown,
                    reason: err.to_string(),
                };
            }
        };

        match parse_history(series, &body) {
            Ok(parsed) => {
                info!("{} history: {} points", series.label(), parsed.points.len());
                HistoryOutcome::Series(parsed)
            }
            Err(err) => {
                warn!("History parse failed for {} ({}): {:#}", series.label(), shown, err);
                HistoryOutcome::Failed {
                    url: shown,
                    reason: format!("{:#}", err),
                }
            }
        }
    }
}

/// `{base}/historical/country/{country}/indicator/{indicator}?client={key}`
pub fn build_history_url(base_url: &str, series: SeriesKey, api_key: &str) -> Result<String> {
    let mut url = Url::parse(base_url)
        .with_context(|| format!("Invalid API base URL: {}", base_url))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("API base URL cannot carry a path: {}", base_url))?
        .pop_if_empty()
        .extend([
            "historical",
            "country",
            series.country().api_name(),
            "indicator",
            series.api_indicator(),
        ]);
    url.query_pairs_mut().append_pair("client", api_key);
    Ok(url.to_string())
}

/// Parse the API JSON array into a chronologically sorted series.
/// Rows with a null `Value` are skipped.
pub fn parse_history(series: SeriesKey, body: &str) -> Result<HistoricalSeries> {
    let rows: Vec<ApiRow> =
        serde_json::from_str(body).context("Failed to parse historical API response")?;

    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(value) = row.value else {
            continue;
        };
        let date = parse_api_date(&row.date_time)?;
        points.push(HistoricalPoint { date, value });
    }
    points.sort_by_key(|p| p.date);

    Ok(HistoricalSeries { series, points })
}

/// Accepts `2024-01-31T00:00:00`, with optional fraction or zone, or a bare date
fn parse_api_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .with_context(|| format!("Failed to parse date: {}", raw))
}
