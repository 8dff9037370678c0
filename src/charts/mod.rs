//! Chart rendering
//!
//! Charts are written as SVG through plotters. The SVG backend emits text as
//! markup, so rendering needs neither a display nor system fonts.

pub mod trend;

pub use trend::{render_trend_chart, TrendChart};

use anyhow::Result;
use plotters::prelude::*;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::InflationError;
use crate::indicators::ReadingTable;
use crate::utils::{bar_height, bar_label};

pub const DEFAULT_BAR_CHART_PATH: &str = "us_india_inflation.svg";

const BAR_CHART_SIZE: (u32, u32) = (960, 540);

pub(crate) const SERIES_COLORS: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

pub(crate) fn render_err(err: impl std::fmt::Display) -> InflationError {
    InflationError::Render(err.to_string())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(InflationError::Io)?;
        }
    }
    Ok(())
}

/// Y bounds that always include zero, padded so bars do not touch the frame
pub(crate) fn padded_bounds(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if hi - lo < f64::EPSILON {
        hi = 1.0;
    }
    let pad = (hi - lo) * 0.15;
    (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
}

#[derive(Debug, Clone)]
struct Bar {
    label: String,
    height: f64,
}

/// Bar chart of the four latest readings.
///
/// Absent or non-numeric values draw a zero-height bar; the category label
/// still shows the raw text or `N/A`.
pub fn render_bar_chart(table: &ReadingTable, path: &Path) -> Result<()> {
    let bars: Vec<Bar> = table
        .rows()
        .iter()
        .map(|r| Bar {
            label: bar_label(&r.series.display_name(), r.value.as_deref()),
            height: bar_height(r.value.as_deref()),
        })
        .collect();

    ensure_parent_dir(path)?;

    let (y_min, y_max) = padded_bounds(bars.iter().map(|b| b.height));
    let root = SVGBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Latest Inflation: United States vs India", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..bars.len() as u32).into_segmented(), y_min..y_max)
        .map_err(render_err)?;

    let label_for = |seg: &SegmentValue<u32>| match seg {
        SegmentValue::CenterOf(i) => bars
            .get(*i as usize)
            .map(|b| b.label.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len() * 2)
        .x_label_formatter(&label_for)
        .y_desc("Latest reading (%)")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let i = i as u32;
            let color = SERIES_COLORS[i as usize % SERIES_COLORS.len()];
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), bar.height),
                ],
                color.filled(),
            );
            rect.set_margin(0, 0, 12, 12);
            rect
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!("Bar chart written to {}", path.display());
    Ok(())
}
