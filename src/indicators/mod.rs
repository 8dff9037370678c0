//! Indicator data model and the fixed four-row reading table
//!
//! The four series tracked are hardcoded; [`SeriesKey::ALL`] fixes the order
//! every consumer (console, JSON, bar chart) sees them in.

use chrono::{DateTime, Utc};
use std::fmt;

/// Placeholder shown wherever a reading has no value
pub const ABSENT: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    UnitedStates,
    India,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::UnitedStates => "United States",
            Country::India => "India",
        }
    }

    /// Country name as the historical API expects it in the URL path
    pub fn api_name(&self) -> &'static str {
        match self {
            Country::UnitedStates => "united states",
            Country::India => "india",
        }
    }

    fn short(&self) -> &'static str {
        match self {
            Country::UnitedStates => "US",
            Country::India => "India",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Consumer Price Index
    Cpi,
    /// Producer Price Index
    Ppi,
    /// Wholesale Price Index
    Wpi,
}

impl Indicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Cpi => "CPI",
            Indicator::Ppi => "PPI",
            Indicator::Wpi => "WPI",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four tracked series. Declaration order is table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKey {
    UsCpi,
    UsPpi,
    IndiaCpi,
    IndiaWpi,
}

impl SeriesKey {
    pub const ALL: [SeriesKey; 4] = [
        SeriesKey::UsCpi,
        SeriesKey::UsPpi,
        SeriesKey::IndiaCpi,
        SeriesKey::IndiaWpi,
    ];

    pub fn country(&self) -> Country {
        match self {
            SeriesKey::UsCpi | SeriesKey::UsPpi => Country::UnitedStates,
            SeriesKey::IndiaCpi | SeriesKey::IndiaWpi => Country::India,
        }
    }

    pub fn indicator(&self) -> Indicator {
        match self {
            SeriesKey::UsCpi | SeriesKey::IndiaCpi => Indicator::Cpi,
            SeriesKey::UsPpi => Indicator::Ppi,
            SeriesKey::IndiaWpi => Indicator::Wpi,
        }
    }

    /// Key used in the console listing, e.g. `US_CPI`
    pub fn label(&self) -> &'static str {
        match self {
            SeriesKey::UsCpi => "US_CPI",
            SeriesKey::UsPpi => "US_PPI",
            SeriesKey::IndiaCpi => "India_CPI",
            SeriesKey::IndiaWpi => "India_WPI",
        }
    }

    /// Human label used on charts, e.g. `US CPI`
    pub fn display_name(&self) -> String {
        format!("{} {}", self.country().short(), self.indicator())
    }

    /// Path of the scrape page relative to the site root
    pub fn page_path(&self) -> &'static str {
        match self {
            SeriesKey::UsCpi => "/united-states/inflation-cpi",
            SeriesKey::UsPpi => "/united-states/producer-prices-change",
            SeriesKey::IndiaCpi => "/india/inflation-cpi",
            SeriesKey::IndiaWpi => "/india/wholesale-price-index",
        }
    }

    /// Indicator name as the historical API expects it in the URL path
    pub fn api_indicator(&self) -> &'static str {
        match self {
            SeriesKey::UsCpi | SeriesKey::IndiaCpi => "inflation rate",
            SeriesKey::UsPpi => "producer prices change",
            SeriesKey::IndiaWpi => "wholesale price index inflation yoy",
        }
    }

    pub fn page_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.page_path())
    }
}

/// Latest value scraped for one series
#[derive(Debug, Clone)]
pub struct IndicatorReading {
    pub series: SeriesKey,
    pub country: Country,
    pub indicator: Indicator,
    pub source_url: Option<String>,
    /// Raw scraped text; never coerced to a number
    pub value: Option<String>,
    /// Why `value` is absent, when it is
    pub failure: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl IndicatorReading {
    pub fn found(series: SeriesKey, source_url: &str, value: String) -> Self {
        Self {
            series,
            country: series.country(),
            indicator: series.indicator(),
            source_url: Some(source_url.to_string()),
            value: Some(value),
            failure: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn failed(series: SeriesKey, source_url: &str, reason: impl Into<String>) -> Self {
        Self {
            series,
            country: series.country(),
            indicator: series.indicator(),
            source_url: Some(source_url.to_string()),
            value: None,
            failure: Some(reason.into()),
            fetched_at: Utc::now(),
        }
    }

    /// Placeholder row for a series nobody supplied a reading for
    pub fn absent(series: SeriesKey) -> Self {
        Self {
            series,
            country: series.country(),
            indicator: series.indicator(),
            source_url: None,
            value: None,
            failure: Some("not fetched".to_string()),
            fetched_at: Utc::now(),
        }
    }

    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(ABSENT)
    }
}

/// The assembled table: always exactly one row per [`SeriesKey`], in order.
#[derive(Debug, Clone)]
pub struct ReadingTable {
    rows: Vec<IndicatorReading>,
}

impl ReadingTable {
    /// Place readings into their fixed slots. Missing series get an absent
    /// row; a later reading for the same series replaces an earlier one.
    pub fn assemble(readings: impl IntoIterator<Item = IndicatorReading>) -> Self {
        let mut slots: [Option<IndicatorReading>; 4] = [None, None, None, None];
        for reading in readings {
            let idx = reading.series as usize;
            slots[idx] = Some(reading);
        }

        let rows = SeriesKey::ALL
            .iter()
            .zip(slots)
            .map(|(key, slot)| slot.unwrap_or_else(|| IndicatorReading::absent(*key)))
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[IndicatorReading] {
        &self.rows
    }

    pub fn get(&self, series: SeriesKey) -> &IndicatorReading {
        &self.rows[series as usize]
    }

    pub fn available_count(&self) -> usize {
        self.rows.iter().filter(|r| r.value.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_empty_yields_four_absent_rows_in_order() {
        let table = ReadingTable::assemble(Vec::new());
        let order: Vec<SeriesKey> = table.rows().iter().map(|r| r.series).collect();
        assert_eq!(order, SeriesKey::ALL.to_vec());
        assert!(table.rows().iter().all(|r| r.value.is_none()));
        assert_eq!(table.available_count(), 0);
    }

    #[test]
    fn test_assemble_keeps_fixed_order_for_shuffled_input() {
        let readings = vec![
            IndicatorReading::found(SeriesKey::IndiaWpi, "u4", "2.1%".to_string()),
            IndicatorReading::failed(SeriesKey::UsCpi, "u1", "HTTP status 500"),
            IndicatorReading::found(SeriesKey::IndiaCpi, "u3", "5.5".to_string()),
        ];
        let table = ReadingTable::assemble(readings);

        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.rows()[0].series, SeriesKey::UsCpi);
        assert_eq!(table.rows()[0].display_value(), ABSENT);
        assert_eq!(table.rows()[1].series, SeriesKey::UsPpi);
        assert_eq!(table.rows()[1].failure.as_deref(), Some("not fetched"));
        assert_eq!(table.get(SeriesKey::IndiaCpi).display_value(), "5.5");
        assert_eq!(table.get(SeriesKey::IndiaWpi).display_value(), "2.1%");
        assert_eq!(table.available_count(), 2);
    }

    #[test]
    fn test_assemble_last_reading_wins() {
        let readings = vec![
            IndicatorReading::found(SeriesKey::UsPpi, "u", "1.0".to_string()),
            IndicatorReading::found(SeriesKey::UsPpi, "u", "1.4".to_string()),
        ];
        let table = ReadingTable::assemble(readings);
        assert_eq!(table.get(SeriesKey::UsPpi).display_value(), "1.4");
    }

    #[test]
    fn test_series_metadata() {
        assert_eq!(SeriesKey::IndiaWpi.label(), "India_WPI");
        assert_eq!(SeriesKey::IndiaWpi.country(), Country::India);
        assert_eq!(SeriesKey::IndiaWpi.indicator(), Indicator::Wpi);
        assert_eq!(SeriesKey::UsPpi.display_name(), "US PPI");
        assert_eq!(
            SeriesKey::UsCpi.page_url("https://tradingeconomics.com/"),
            "https://tradingeconomics.com/united-states/inflation-cpi"
        );
    }
}
