//! The per-interaction pipeline: one immutable input bundle in, one
//! output bundle out. The hosting UI is a thin caller around
//! [`generate_report`]; nothing here keeps state between interactions.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::chart::{self, Chart, ChartKind};
use crate::data::model::Table;
use crate::data::select::Selection;
use crate::delivery::DownloadLink;
use crate::error::Result;
use crate::report::{render_docx, render_pdf, ReportConfig};

/// Everything one interaction supplies: the picked columns, the chart
/// type, and the caption text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub columns: Vec<String>,
    pub chart: ChartKind,
    pub description: String,
}

/// Everything one interaction produces. The chart is what the UI shows
/// on screen; the buffers and links back the two download buttons.
#[derive(Debug)]
pub struct ReportBundle {
    pub chart: Chart,
    pub pdf: Vec<u8>,
    pub docx: Vec<u8>,
    pub pdf_link: DownloadLink,
    pub docx_link: DownloadLink,
}

/// Run the whole pipeline with default layout settings.
pub fn generate_report(table: &Table, request: &ReportRequest) -> Result<ReportBundle> {
    generate_report_with(table, request, &ReportConfig::default())
}

/// Run the whole pipeline: validate the selection, render the chart,
/// package both documents, build the download links. Validation failures
/// short-circuit before any rendering happens.
pub fn generate_report_with(
    table: &Table,
    request: &ReportRequest,
    config: &ReportConfig,
) -> Result<ReportBundle> {
    let selection = Selection::new(request.columns.iter().cloned(), table)?;
    debug!(
        "rendering {} chart over {} columns",
        request.chart,
        selection.len()
    );

    let chart = chart::render(table, &selection, request.chart)?;
    let pdf = render_pdf(&chart, &request.description, config)?;
    let docx = render_docx(&chart, &request.description, config)?;
    let pdf_link = DownloadLink::new(&config.pdf_filename, &pdf);
    let docx_link = DownloadLink::new(&config.docx_filename, &docx);

    info!(
        "report generated: pdf {} bytes, docx {} bytes",
        pdf.len(),
        docx.len()
    );
    Ok(ReportBundle {
        chart,
        pdf,
        docx,
        pdf_link,
        docx_link,
    })
}
