//! Historical trend line charts on a shared date axis

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use super::{ensure_parent_dir, padded_bounds, render_err, SERIES_COLORS};
use crate::error::InflationError;
use crate::history::HistoricalSeries;

const TREND_CHART_SIZE: (u32, u32) = (1000, 500);

/// One chart: a title, a y-axis description and one line per series
#[derive(Debug, Clone)]
pub struct TrendChart<'a> {
    pub title: &'a str,
    pub y_desc: &'a str,
    pub lines: Vec<&'a HistoricalSeries>,
}

impl TrendChart<'_> {
    fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.lines.iter().filter_map(|s| s.first_date()).min()?;
        let end = self.lines.iter().filter_map(|s| s.last_date()).max()?;
        if end > start {
            Some((start, end))
        } else {
            Some((start, start + Duration::days(1)))
        }
    }
}

pub fn render_trend_chart(trend: &TrendChart<'_>, path: &Path) -> Result<()> {
    let (start, end) = trend.date_span().ok_or_else(|| {
        InflationError::Render(format!("no data points for '{}'", trend.title))
    })?;

    ensure_parent_dir(path)?;

    let (y_min, y_max) = padded_bounds(
        trend
            .lines
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.value)),
    );

    let root = SVGBackend::new(path, TREND_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(trend.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(start..end, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(trend.y_desc)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y").to_string())
        .draw()
        .map_err(render_err)?;

    for (idx, series) in trend.lines.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                series.points.iter().map(|p| (p.date, p.value)),
                color.stroke_width(2),
            ))
            .map_err(render_err)?
            .label(series.series.display_name())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!("Trend chart '{}' written to {}", trend.title, path.display());
    Ok(())
}
