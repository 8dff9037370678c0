// Web scraping of the latest published indicator values
// Plain GET + HTML parse; tradingeconomics serves the value in static markup

pub mod extractor;
pub mod fetcher;

pub use extractor::{CellExtractor, VALUE_CELL_SELECTOR};
pub use fetcher::{HttpClient, ReqwestClient, DEFAULT_USER_AGENT};

use tracing::{info, warn};

use crate::indicators::{IndicatorReading, SeriesKey};

pub const DEFAULT_SCRAPE_BASE_URL: &str = "https://tradingeconomics.com";

/// Fetches one series page and extracts its latest value.
///
/// Never fails: transport and parse problems come back as a reading with an
/// absent value and the reason in `failure`.
pub fn scrape_reading<C: HttpClient + ?Sized>(
    client: &C,
    extractor: &CellExtractor,
    series: SeriesKey,
    base_url: &str,
) -> IndicatorReading {
    let url = series.page_url(base_url);
    info!("Scraping {} from {}", series.label(), url);

    let html = match client.get(&url) {
        Ok(html) => html,
        Err(err) => {
            warn!("Fetch failed for {}: {}", url, err);
            return IndicatorReading::failed(series, &url, err.to_string());
        }
    };

    match extractor.extract(&html) {
        Ok(value) => {
            info!("{} = {}", series.label(), value);
            IndicatorReading::found(series, &url, value)
        }
        Err(err) => {
            warn!("Extraction failed for {}: {}", url, err);
            IndicatorReading::failed(series, &url, err.to_string())
        }
    }
}
