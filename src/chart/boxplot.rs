//! Box plot: one five-number box per selected column.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::palette::generate_palette;
use super::style::ChartStyle;
use super::{draw_err, padded_range, stats};
use crate::data::select::SelectedView;
use crate::error::{Error, Result};

pub(crate) fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    view: &SelectedView,
    style: &ChartStyle,
) -> Result<()> {
    let n = view.series.len();

    let mut summaries = Vec::with_capacity(n);
    for series in &view.series {
        let values = stats::finite_values(&series.values);
        if values.is_empty() {
            return Err(Error::Draw(format!(
                "column '{}' has no numeric values",
                series.name
            )));
        }
        summaries.push(Quartiles::new(&values));
    }

    // Whisker extent over all categories drives the y-range.
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for q in &summaries {
        let v = q.values();
        lo = lo.min(v[0] as f64);
        hi = hi.max(v[4] as f64);
    }
    let (y_min, y_max) = padded_range(lo, hi);

    let names: Vec<&str> = view.series.iter().map(|s| s.name.as_str()).collect();
    let mut chart = ChartBuilder::on(root)
        .caption(
            "Distribution of Drug Sales Volume by Category",
            style.caption_font(),
        )
        .margin(style.margin)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n - 1).into_segmented(), y_min as f32..y_max as f32)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Drug Category")
        .y_desc("Sales Volume")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) if *i < n => names[*i].to_string(),
            _ => String::new(),
        })
        .label_style(style.label_font())
        .draw()
        .map_err(draw_err)?;

    let colors = generate_palette(n);
    chart
        .draw_series(summaries.iter().enumerate().map(|(i, quartiles)| {
            Boxplot::new_vertical(SegmentValue::CenterOf(i), quartiles)
                .width(30)
                .whisker_width(0.5)
                .style(ShapeStyle::from(&colors[i]))
        }))
        .map_err(draw_err)?;

    Ok(())
}
