//! Time-series line chart: one line per selected column over the date index.

use chrono::Duration;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::palette::generate_palette;
use super::style::ChartStyle;
use super::{draw_err, value_range};
use crate::data::select::SelectedView;
use crate::error::Result;

pub(crate) fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    view: &SelectedView,
    style: &ChartStyle,
) -> Result<()> {
    // The index is not necessarily sorted, so take min/max rather than ends.
    let x_min = *view
        .dates
        .iter()
        .min()
        .ok_or(crate::error::Error::EmptyTable)?;
    let mut x_max = *view
        .dates
        .iter()
        .max()
        .ok_or(crate::error::Error::EmptyTable)?;
    if x_min == x_max {
        // A single-date axis has zero span; widen it by a day.
        x_max = x_max + Duration::days(1);
    }
    let (y_min, y_max) = value_range(view)?;

    let mut chart = ChartBuilder::on(root)
        .caption("Monthly Drug Sales Volume Over Time", style.caption_font())
        .margin(style.margin)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Sales Volume")
        .light_line_style(ShapeStyle::from(&RGBColor(230, 230, 230)))
        .label_style(style.label_font())
        .draw()
        .map_err(draw_err)?;

    let colors = generate_palette(view.series.len());
    let line_width = style.line_width;
    for (series, &color) in view.series.iter().zip(colors.iter()) {
        let points = view
            .dates
            .iter()
            .zip(&series.values)
            .filter(|(_, v)| v.is_finite())
            .map(|(d, v)| (*d, *v));

        chart
            .draw_series(LineSeries::new(
                points,
                ShapeStyle::from(&color).stroke_width(line_width),
            ))
            .map_err(draw_err)?
            .label(&series.name)
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 18, y)],
                    ShapeStyle::from(&color).stroke_width(line_width),
                )
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
