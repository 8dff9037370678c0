//! Utility functions for reading and formatting scraped values
//!
//! Scraped values stay raw strings everywhere except at the chart boundary,
//! where bar heights need a number. These helpers derive that number
//! without changing the raw value.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Query parameters that carry credentials
const SECRET_QUERY_PARAMS: &[&str] = &["client"];
const REDACTED: &str = "REDACTED";

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").expect("static regex is valid"));

/// Best-effort numeric reading of a scraped value.
///
/// Takes the first decimal number in the text, ignoring `%`, surrounding
/// words and thousands separators. Returns `None` when no number is present.
///
/// # Examples
/// ```
/// use inflation_watch::utils::parse_numeric;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_numeric("3.2%"), Some(dec!(3.2)));
/// assert_eq!(parse_numeric(" -0.4 percent"), Some(dec!(-0.4)));
/// assert_eq!(parse_numeric("N/A"), None);
/// ```
pub fn parse_numeric(raw: &str) -> Option<Decimal> {
    let cleaned = raw.replace(',', "").replace('\u{2212}', "-");
    let m = NUMBER.find(&cleaned)?;
    Decimal::from_str(m.as_str().trim_start_matches('+')).ok()
}

/// Numeric value as `f64` for plotting; absent or unparseable values plot as zero
pub fn bar_height(raw: Option<&str>) -> f64 {
    raw.and_then(parse_numeric)
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

/// Category label for a bar: name plus the raw value or the placeholder
///
/// # Examples
/// ```
/// use inflation_watch::utils::bar_label;
///
/// assert_eq!(bar_label("US CPI", Some("3.2%")), "US CPI (3.2%)");
/// assert_eq!(bar_label("India WPI", None), "India WPI (N/A)");
/// ```
pub fn bar_label(name: &str, raw: Option<&str>) -> String {
    format!("{} ({})", name, raw.unwrap_or(crate::indicators::ABSENT))
}

/// URL safe to print or log: credential query values are replaced.
///
/// # Examples
/// ```
/// use inflation_watch::utils::redact_url;
///
/// assert_eq!(
///     redact_url("https://api.test/historical?client=secret"),
///     "https://api.test/historical?client=REDACTED"
/// );
/// assert_eq!(redact_url("https://a.test/page"), "https://a.test/page");
/// ```
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        // Not parseable, so drop the whole query rather than guess
        return url.split('?').next().unwrap_or_default().to_string();
    };
    let is_secret = |key: &str| SECRET_QUERY_PARAMS.contains(&key);
    if !parsed.query_pairs().any(|(k, _)| is_secret(k.as_ref())) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let value = if is_secret(k.as_ref()) {
                REDACTED.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}
