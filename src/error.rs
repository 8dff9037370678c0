//! Error handling for inflation-watch
//!
//! Typed failure kinds for the fetch/extract stages, with a unified Result
//! type using anyhow for context chaining at the application edges.

use std::time::Duration;
use thiserror::Error;

/// Transport-level failure of a single GET request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Failure to pull a value out of a fetched HTML page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no element matches selector '{0}'")]
    NoMatch(String),

    #[error("element matching '{0}' has no text")]
    EmptyText(String),

    #[error("invalid selector '{0}'")]
    InvalidSelector(String),
}

/// Core error types surfaced by the pipeline
#[derive(Error, Debug)]
pub enum InflationError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = anyhow::Result<T>;
