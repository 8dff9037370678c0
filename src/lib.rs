//! Inflation Watch - US and India inflation tracker
//!
//! This library scrapes the latest CPI and PPI/WPI readings for the United
//! States and India, assembles them into a fixed four-row table and renders
//! console output, a bar chart and optional historical trend charts.

pub mod charts;
pub mod config;
pub mod error;
pub mod history;
pub mod indicators;
pub mod pipeline;
pub mod reports;
pub mod scraping;
pub mod utils;

pub use config::{AppConfig, OutputMode};
pub use indicators::{IndicatorReading, ReadingTable, SeriesKey};
pub use pipeline::{HistoryStatus, Pipeline, RunReport};
pub use scraping::{HttpClient, ReqwestClient};
