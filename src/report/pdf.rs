//! Single-page PDF report: title, wrapped description, embedded chart.

use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
};

use super::{cap_description, wrap_text, ReportConfig};
use crate::chart::Chart;
use crate::error::Result;

// US letter, 1-inch margins.
const PAGE_W_MM: f64 = 215.9;
const PAGE_H_MM: f64 = 279.4;
const MARGIN_MM: f64 = 25.4;
const MM_PER_INCH: f64 = 25.4;

/// Render the fixed-layout single-page PDF and return it as a byte buffer.
/// The chart raster is embedded straight from memory; nothing touches disk.
pub fn render_pdf(chart: &Chart, description: &str, config: &ReportConfig) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        &config.title,
        Mm(PAGE_W_MM as f32),
        Mm(PAGE_H_MM as f32),
        "report",
    );
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let layer = doc.get_page(page).get_layer(layer);

    layer.use_text(
        &config.title,
        16.0,
        Mm(MARGIN_MM as f32),
        Mm((PAGE_H_MM - MARGIN_MM) as f32),
        &bold,
    );
    layer.use_text(
        "Description:",
        12.0,
        Mm(MARGIN_MM as f32),
        Mm((PAGE_H_MM - 35.3) as f32),
        &regular,
    );

    let description = cap_description(description, config.description_cap);
    let mut y = PAGE_H_MM - 42.3;
    for line in wrap_text(description, config.wrap_width) {
        layer.use_text(&line, 10.0, Mm(MARGIN_MM as f32), Mm(y as f32), &regular);
        y -= 4.6;
    }

    // Embed the raster below the text block, scaled to the content width.
    let image = Image::from(ImageXObject {
        width: Px(chart.width() as usize),
        height: Px(chart.height() as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: chart.pixels().to_vec(),
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    });

    let content_w_mm = PAGE_W_MM - 2.0 * MARGIN_MM;
    let natural_w_mm = chart.width() as f64 * MM_PER_INCH / config.image_dpi;
    let scale = content_w_mm / natural_w_mm;
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM as f32)),
            translate_y: Some(Mm(35.3)),
            rotate: None,
            scale_x: Some(scale as f32),
            scale_y: Some(scale as f32),
            dpi: Some(config.image_dpi as f32),
        },
    );

    Ok(doc.save_to_bytes()?)
}
