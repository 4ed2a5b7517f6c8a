//! Chart rendering: four fixed chart types drawn offscreen into an
//! in-memory RGB raster. No temp files; packagers consume the pixel
//! buffer (or its PNG encoding) directly.

pub mod annual;
pub mod boxplot;
pub mod heatmap;
pub mod palette;
pub mod series;
pub mod stats;
pub mod style;

use std::fmt;
use std::io::Cursor;

use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::model::Table;
use crate::data::select::{SelectedView, Selection};
use crate::error::{Error, Result};

pub use style::ChartStyle;

// ---------------------------------------------------------------------------
// ChartKind
// ---------------------------------------------------------------------------

/// The four fixed chart types offered by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    TimeSeries,
    BoxPlot,
    CorrelationHeatmap,
    AnnualSales,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::TimeSeries,
        ChartKind::BoxPlot,
        ChartKind::CorrelationHeatmap,
        ChartKind::AnnualSales,
    ];

    /// Human-facing label, matching the selector entries in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::TimeSeries => "Time Series",
            ChartKind::BoxPlot => "Box Plot",
            ChartKind::CorrelationHeatmap => "Correlation Heatmap",
            ChartKind::AnnualSales => "Annual Sales",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Chart: one rendered visual artifact
// ---------------------------------------------------------------------------

/// A rendered chart: an RGB8 raster held in memory for the duration of
/// one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    kind: ChartKind,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Chart {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB8 pixel data, row-major, `width * height * 3` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Encode the raster as PNG. The raster itself is left untouched, so
    /// repeated encodings are byte-identical.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let img = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| Error::Draw("pixel buffer does not match chart dimensions".into()))?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Rendering entry-points
// ---------------------------------------------------------------------------

pub(crate) fn draw_err<E: fmt::Display>(e: E) -> Error {
    Error::Draw(e.to_string())
}

/// Render one chart from a table and a validated selection.
pub fn render(table: &Table, selection: &Selection, kind: ChartKind) -> Result<Chart> {
    render_styled(table, selection, kind, &ChartStyle::default())
}

/// As [`render`], with explicit style knobs.
pub fn render_styled(
    table: &Table,
    selection: &Selection,
    kind: ChartKind,
    style: &ChartStyle,
) -> Result<Chart> {
    let view = table.select(selection)?;
    if view.is_empty() {
        return Err(Error::EmptyTable);
    }

    let (width, height) = style.dimensions(kind);
    let mut pixels = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        match kind {
            ChartKind::TimeSeries => series::draw(&root, &view, style)?,
            ChartKind::BoxPlot => boxplot::draw(&root, &view, style)?,
            ChartKind::CorrelationHeatmap => heatmap::draw(&root, &view, style)?,
            ChartKind::AnnualSales => annual::draw(&root, &view, style)?,
        }
        root.present().map_err(draw_err)?;
    }

    Ok(Chart {
        kind,
        width,
        height,
        pixels,
    })
}

/// Y-axis range with a little headroom, so lines and whiskers never sit
/// on the frame. Falls back to a unit band for flat data.
pub(crate) fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

pub(crate) fn value_range(view: &SelectedView) -> Result<(f64, f64)> {
    let (lo, hi) = view
        .value_extent()
        .ok_or_else(|| Error::Draw("selected columns contain no numeric values".into()))?;
    Ok(padded_range(lo, hi))
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::{Series, Table};

    pub(crate) fn sample_table() -> Table {
        let dates: Vec<NaiveDate> = (0..24)
            .map(|i| NaiveDate::from_ymd_opt(2019 + i / 12, (i % 12 + 1) as u32, 1).unwrap())
            .collect();
        let a: Vec<f64> = (0..24).map(|i| 40.0 + (i as f64 * 0.7).sin() * 10.0).collect();
        let b: Vec<f64> = (0..24).map(|i| 25.0 + i as f64).collect();
        Table::new(
            dates,
            vec![Series::new("DrugA", a), Series::new("DrugB", b)],
        )
        .unwrap()
    }

    #[test]
    fn labels_match_the_ui_strings() {
        assert_eq!(ChartKind::TimeSeries.label(), "Time Series");
        assert_eq!(ChartKind::AnnualSales.to_string(), "Annual Sales");
        assert_eq!(ChartKind::ALL.len(), 4);
    }

    #[test]
    fn every_kind_renders_at_its_configured_size() {
        let table = sample_table();
        let sel = Selection::new(["DrugA", "DrugB"], &table).unwrap();
        let style = ChartStyle::default();

        for kind in ChartKind::ALL {
            let chart = render(&table, &sel, kind).unwrap();
            let (w, h) = style.dimensions(kind);
            assert_eq!(chart.width(), w);
            assert_eq!(chart.height(), h);
            assert_eq!(chart.pixels().len(), (w * h * 3) as usize);
            // Something was actually drawn on the white canvas.
            assert!(chart.pixels().iter().any(|&p| p != 255));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let table = sample_table();
        let sel = Selection::new(["DrugA", "DrugB"], &table).unwrap();
        let first = render(&table, &sel, ChartKind::TimeSeries).unwrap();
        let second = render(&table, &sel, ChartKind::TimeSeries).unwrap();
        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn zero_row_table_is_rejected_before_drawing() {
        let table = Table::new(vec![], vec![Series::new("DrugA", vec![])]).unwrap();
        let sel = Selection::new(["DrugA"], &table).unwrap();
        let err = render(&table, &sel, ChartKind::TimeSeries).unwrap_err();
        assert!(matches!(err, Error::EmptyTable));
    }

    #[test]
    fn png_encoding_round_trips_dimensions() {
        let table = sample_table();
        let sel = Selection::new(["DrugA"], &table).unwrap();
        let chart = render(&table, &sel, ChartKind::TimeSeries).unwrap();
        let png = chart.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(chart.to_png().unwrap(), png);
    }

    #[test]
    fn padded_range_handles_flat_data() {
        let (lo, hi) = padded_range(5.0, 5.0);
        assert!(lo < 5.0 && hi > 5.0);
        let (lo, hi) = padded_range(0.0, 100.0);
        assert_eq!((lo, hi), (-5.0, 105.0));
    }
}
