//! Console formatting for the latest readings
//!
//! Formatting is kept apart from fetching: every function here takes the
//! assembled table and returns a String for the caller to print.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::indicators::{ReadingTable, ABSENT};

pub const LATEST_HEADER: &str = "===== LATEST INFLATION DATA (US & INDIA) =====";
pub const TABLE_HEADER: &str = "===== INFLATION TABLE =====";

/// One `LABEL: value` line per series under the header
pub fn format_latest_lines(table: &ReadingTable) -> String {
    let mut output = format!("{}\n", LATEST_HEADER.bold());
    for reading in table.rows() {
        let value = match reading.value.as_deref() {
            Some(v) => v.to_string(),
            None => ABSENT.yellow().to_string(),
        };
        output.push_str(&format!("{}: {}\n", reading.series.label(), value));
    }
    output
}

/// The Country / Indicator / Value table
pub fn format_readings_table(table: &ReadingTable) -> String {
    #[derive(Tabled)]
    struct ReadingRow {
        #[tabled(rename = "Country")]
        country: String,
        #[tabled(rename = "Indicator")]
        indicator: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows: Vec<ReadingRow> = table
        .rows()
        .iter()
        .map(|r| ReadingRow {
            country: r.country.as_str().to_string(),
            indicator: r.indicator.as_str().to_string(),
            value: r.display_value().to_string(),
        })
        .collect();

    let mut rendered = Table::new(&rows);
    rendered.with(Style::rounded());
    rendered.modify(Columns::new(2..), Alignment::right());

    format!("\n{}\n{}\n", TABLE_HEADER.bold(), rendered)
}

/// The assembled table as pretty JSON, failures included
pub fn format_readings_json(table: &ReadingTable) -> String {
    #[derive(Serialize)]
    struct JsonReading<'a> {
        key: &'a str,
        country: &'a str,
        indicator: &'a str,
        value: Option<&'a str>,
        error: Option<&'a str>,
        source_url: Option<&'a str>,
        fetched_at: String,
    }

    let readings: Vec<JsonReading> = table
        .rows()
        .iter()
        .map(|r| JsonReading {
            key: r.series.label(),
            country: r.country.as_str(),
            indicator: r.indicator.as_str(),
            value: r.value.as_deref(),
            error: r.failure.as_deref(),
            source_url: r.source_url.as_deref(),
            fetched_at: r.fetched_at.to_rfc3339(),
        })
        .collect();

    serde_json::to_string_pretty(&readings)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{IndicatorReading, SeriesKey};

    fn sample() -> ReadingTable {
        ReadingTable::assemble(vec![
            IndicatorReading::found(SeriesKey::UsCpi, "u1", "3.2%".to_string()),
            IndicatorReading::failed(SeriesKey::IndiaCpi, "u3", "HTTP status 403"),
        ])
    }

    #[test]
    fn test_latest_lines_in_fixed_order() {
        colored::control::set_override(false);
        let text = format_latest_lines(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                LATEST_HEADER,
                "US_CPI: 3.2%",
                "US_PPI: N/A",
                "India_CPI: N/A",
                "India_WPI: N/A",
            ]
        );
    }

    #[test]
    fn test_table_has_every_row() {
        colored::control::set_override(false);
        let text = format_readings_table(&sample());
        assert!(text.contains("Country"));
        assert!(text.contains("United States"));
        assert!(text.contains("WPI"));
        assert_eq!(text.matches("N/A").count(), 3);
    }

    #[test]
    fn test_json_keeps_absent_as_null() {
        let json = format_readings_json(&sample());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["key"], "US_CPI");
        assert_eq!(rows[0]["value"], "3.2%");
        assert!(rows[2]["value"].is_null());
        assert_eq!(rows[2]["error"], "HTTP status 403");
    }
}
