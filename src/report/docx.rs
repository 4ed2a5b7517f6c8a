//! DOCX report: headings, description paragraph, chart at 6-inch width.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Pic, Run, Style, StyleType};

use super::{cap_description, ReportConfig};
use crate::chart::Chart;
use crate::error::{Error, Result};

const EMU_PER_INCH: u32 = 914_400;
const IMAGE_WIDTH_INCHES: u32 = 6;

/// Render the word-processor report and return it as a byte buffer.
pub fn render_docx(chart: &Chart, description: &str, config: &ReportConfig) -> Result<Vec<u8>> {
    let docx = build_docx(chart, description, config)?;
    let mut out = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut out)
        .map_err(|e| Error::Docx(e.to_string()))?;
    Ok(out.into_inner())
}

fn build_docx(chart: &Chart, description: &str, config: &ReportConfig) -> Result<Docx> {
    let png = chart.to_png()?;

    let width_emu = IMAGE_WIDTH_INCHES * EMU_PER_INCH;
    let height_emu =
        (width_emu as u64 * chart.height() as u64 / chart.width() as u64) as u32;
    let pic = Pic::new(&png).size(width_emu, height_emu);

    // A fresh document carries no style table, so the heading style ids
    // the paragraphs reference have to be registered here.
    Ok(Docx::new()
        .add_style(heading_style("Title", "Title", 40))
        .add_style(heading_style("Heading1", "Heading 1", 28))
        .add_paragraph(heading(&config.title, "Title"))
        .add_paragraph(heading("Description:", "Heading1"))
        .add_paragraph(Paragraph::new().add_run(
            Run::new().add_text(cap_description(description, config.description_cap)),
        ))
        .add_paragraph(heading("Visualization:", "Heading1"))
        .add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic))))
}

/// Half-point sizes: 40 is 20pt, 28 is 14pt.
fn heading_style(id: &str, name: &str, size: usize) -> Style {
    Style::new(id, StyleType::Paragraph).name(name).size(size).bold()
}

fn heading(text: &str, style: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text)).style(style)
}
