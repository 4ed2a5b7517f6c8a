//! Correlation heatmap: annotated pairwise Pearson matrix.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::palette::correlation_color;
use super::style::ChartStyle;
use super::{draw_err, stats};
use crate::data::select::SelectedView;
use crate::error::Result;

pub(crate) fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    view: &SelectedView,
    style: &ChartStyle,
) -> Result<()> {
    let n = view.series.len();
    let matrix = stats::correlation_matrix(view);
    let names: Vec<&str> = view.series.iter().map(|s| s.name.as_str()).collect();

    // Cell (i, j) is centered on integer coordinates so the default
    // integer axis ticks line up with cell centers.
    let extent = n as f64 - 0.5;
    let mut chart = ChartBuilder::on(root)
        .caption(
            "Correlation Between Drug Sales Categories",
            style.caption_font(),
        )
        .margin(style.margin)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5..extent, -0.5..extent)
        .map_err(draw_err)?;

    let label_at = |v: &f64, names: &[&str]| -> String {
        let i = v.round();
        if (v - i).abs() < 0.01 && i >= 0.0 && (i as usize) < names.len() {
            names[i as usize].to_string()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|x| label_at(x, &names))
        .y_label_formatter(&|y| label_at(y, &names))
        .label_style(style.label_font())
        .draw()
        .map_err(draw_err)?;

    // Filled cells.
    chart
        .draw_series((0..n).flat_map(|i| {
            let row = &matrix[i];
            (0..n).map(move |j| {
                let color = correlation_color(row[j]);
                Rectangle::new(
                    [
                        (i as f64 - 0.5, j as f64 - 0.5),
                        (i as f64 + 0.5, j as f64 + 0.5),
                    ],
                    color.filled(),
                )
            })
        }))
        .map_err(draw_err)?;

    // Annotated values, light text on the saturated extremes.
    let white = WHITE.to_rgba();
    let black = BLACK.to_rgba();
    let (white, black) = (&white, &black);
    chart
        .draw_series((0..n).flat_map(|i| {
            let row = matrix[i].clone();
            let font = style.label_font();
            (0..n).map(move |j| {
                let r = row[j];
                let label = if r.is_finite() {
                    format!("{r:.2}")
                } else {
                    "n/a".to_string()
                };
                let text_color = if r.is_finite() && r.abs() > 0.6 {
                    white
                } else {
                    black
                };
                let text_style = TextStyle::from(font.into_font())
                    .pos(Pos::new(HPos::Center, VPos::Center))
                    .color(text_color);
                Text::new(label, (i as f64, j as f64), text_style)
            })
        }))
        .map_err(draw_err)?;

    Ok(())
}
