// Pulls the latest indicator value out of a tradingeconomics page.
//
// The value lives in the first `td.datatable-item` cell. The HTML5 parser
// recovers from malformed markup, so the only failures are a selector miss or
// an empty cell. A `td` outside any table is dropped by the parser and never
// matches.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::error::ExtractError;

pub const VALUE_CELL_SELECTOR: &str = "td.datatable-item";

static VALUE_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(VALUE_CELL_SELECTOR).expect("static selector is valid"));

/// Finds the first element matching a CSS selector and returns its trimmed text
#[derive(Debug, Clone)]
pub struct CellExtractor {
    selector: Selector,
    css: String,
}

impl CellExtractor {
    pub fn new(css: &str) -> Result<Self, ExtractError> {
        let selector =
            Selector::parse(css).map_err(|_| ExtractError::InvalidSelector(css.to_string()))?;
        Ok(Self {
            selector,
            css: css.to_string(),
        })
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    /// Raw text of the first match, whitespace trimmed at both ends only
    pub fn extract(&self, html: &str) -> Result<String, ExtractError> {
        let document = Html::parse_document(html);
        let element = document
            .select(&self.selector)
            .next()
            .ok_or_else(|| ExtractError::NoMatch(self.css.clone()))?;

        let text: String = element.text().collect();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ExtractError::EmptyText(self.css.clone()));
        }

        Ok(trimmed.to_string())
    }
}

impl Default for CellExtractor {
    fn default() -> Self {
        Self {
            selector: VALUE_CELL.clone(),
            css: VALUE_CELL_SELECTOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_trims_surrounding_whitespace_only() {
        let html = r#"<table><tr><td class="datatable-item"> 3.2% </td></tr></table>"#;
        let value = CellExtractor::default().extract(html).unwrap();
        assert_eq!(value, "3.2%");
    }

    #[test]
    fn test_extract_takes_first_matching_cell() {
        let html = r#"
            <table>
              <tr><td>Inflation Rate</td><td class="datatable-item">2.9</td></tr>
              <tr><td class="datatable-item">3.4</td></tr>
            </table>"#;
        assert_eq!(CellExtractor::default().extract(html).unwrap(), "2.9");
    }

    #[test]
    fn test_extract_matches_cell_with_extra_classes() {
        let html = r#"<table><tr><td class="datatable-item datatable-heatmap"> -0.5 </td></tr></table>"#;
        assert_eq!(CellExtractor::default().extract(html).unwrap(), "-0.5");
    }

    #[test]
    fn test_extract_joins_nested_text() {
        let html = r#"<table><tr><td class="datatable-item"><span>5.49</span>%</td></tr></table>"#;
        assert_eq!(CellExtractor::default().extract(html).unwrap(), "5.49%");
    }

    #[test]
    fn test_extract_no_match() {
        let html = "<html><body><p>Access denied</p></body></html>";
        let err = CellExtractor::default().extract(html).unwrap_err();
        assert_eq!(err, ExtractError::NoMatch(VALUE_CELL_SELECTOR.to_string()));
    }

    #[test]
    fn test_extract_ignores_cell_outside_table() {
        let html = "<html><body><td class=\"datatable-item\">3.2%</td></body></html>";
        let err = CellExtractor::default().extract(html).unwrap_err();
        assert_eq!(err, ExtractError::NoMatch(VALUE_CELL_SELECTOR.to_string()));
    }

    #[test]
    fn test_extract_whitespace_only_cell_is_empty() {
        let html = "<table><tr><td class=\"datatable-item\">  \n\t </td></tr></table>";
        let err = CellExtractor::default().extract(html).unwrap_err();
        assert_eq!(err, ExtractError::EmptyText(VALUE_CELL_SELECTOR.to_string()));
    }

    #[test]
    fn test_extract_survives_malformed_markup() {
        let html = "<table><tr><td class=\"datatable-item\">4.1<td><div></table";
        assert_eq!(CellExtractor::default().extract(html).unwrap(), "4.1");
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let err = CellExtractor::new("td[").unwrap_err();
        assert_eq!(err, ExtractError::InvalidSelector("td[".to_string()));
    }

    #[test]
    fn test_custom_selector() {
        let extractor = CellExtractor::new("span.value").unwrap();
        assert_eq!(extractor.css(), "span.value");
        let html = "<div><span class=\"value\"> 7 </span></div>";
        assert_eq!(extractor.extract(html).unwrap(), "7");
    }
}
