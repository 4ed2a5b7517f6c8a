//! Annual sales: per-year sums rendered as grouped bars.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::palette::generate_palette;
use super::style::ChartStyle;
use super::{draw_err, stats};
use crate::data::select::SelectedView;
use crate::error::Result;

/// Fraction of each year slot occupied by bars; the rest is gap.
const GROUP_WIDTH: f64 = 0.8;

pub(crate) fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    view: &SelectedView,
    style: &ChartStyle,
) -> Result<()> {
    let (years, totals) = stats::annual_totals(view);
    let n_groups = years.len();
    let n_cols = view.series.len();
    let bar_width = GROUP_WIDTH / n_cols as f64;

    let mut lo = 0.0f64;
    let mut hi = 0.0f64;
    for column in &totals {
        for &t in column {
            lo = lo.min(t);
            hi = hi.max(t);
        }
    }
    if hi == lo {
        hi = lo + 1.0;
    }
    let headroom = (hi - lo) * 0.05;
    let (y_min, y_max) = (if lo < 0.0 { lo - headroom } else { 0.0 }, hi + headroom);

    // Year group g is centered on integer coordinate g, so default axis
    // ticks land under group centers.
    let mut chart = ChartBuilder::on(root)
        .caption("Annual Drug Sales by Category", style.caption_font())
        .margin(style.margin)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.6..(n_groups as f64 - 0.4), y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Year")
        .y_desc("Total Sales Volume")
        .x_labels(n_groups)
        .x_label_formatter(&|x| {
            let i = x.round();
            if (x - i).abs() < 0.01 && i >= 0.0 && (i as usize) < n_groups {
                years[i as usize].to_string()
            } else {
                String::new()
            }
        })
        .label_style(style.label_font())
        .draw()
        .map_err(draw_err)?;

    let colors = generate_palette(n_cols);
    for (col, (series, &color)) in view.series.iter().zip(colors.iter()).enumerate() {
        let column_totals = &totals[col];
        chart
            .draw_series((0..n_groups).map(|g| {
                let x0 = g as f64 - GROUP_WIDTH / 2.0 + col as f64 * bar_width;
                Rectangle::new([(x0, 0.0), (x0 + bar_width, column_totals[g])], color.filled())
            }))
            .map_err(draw_err)?
            .label(&series.name)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(style.label_font())
        .draw()
        .map_err(draw_err)?;

    Ok(())
}
