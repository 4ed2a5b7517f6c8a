//! Drug sales data visualization and report generation.
//!
//! Everything a hosting UI needs for one interaction, as a linear
//! pipeline over immutable inputs:
//!
//! ```text
//!  upload (.csv/.xlsx/.xls)
//!        │
//!        ▼
//!   data::loader  →  Table (date index + named numeric columns)
//!        │
//!        ▼
//!   data::select  →  SelectedView (validated column subset)
//!        │
//!        ▼
//!   chart         →  Chart (in-memory raster, one of four types)
//!        │
//!        ▼
//!   report        →  PDF / DOCX byte buffers embedding the chart
//!        │
//!        ▼
//!   delivery      →  base64 data-URI download links
//! ```
//!
//! [`pipeline::generate_report`] runs the whole chain; the individual
//! stages are public for callers that only need part of it.

pub mod chart;
pub mod data;
pub mod delivery;
pub mod error;
pub mod pipeline;
pub mod report;

pub use chart::{Chart, ChartKind, ChartStyle};
pub use data::loader::{load_bytes, load_file, DateSource, FileFormat, LoadedTable};
pub use data::model::{Series, Table};
pub use data::select::{SelectedView, Selection};
pub use delivery::DownloadLink;
pub use error::{Error, Result};
pub use pipeline::{generate_report, generate_report_with, ReportBundle, ReportRequest};
pub use report::ReportConfig;
