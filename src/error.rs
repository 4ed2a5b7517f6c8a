//! Error types for the load → render → package pipeline.
//!
//! Two families are kept apart on purpose: *validation* errors are
//! user-correctable preconditions (wrong extension, nothing selected),
//! everything else is a genuine load, render, or document failure.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading data or generating a report.
#[derive(Error, Debug)]
pub enum Error {
    /// Upload has an extension none of the loaders handle.
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    /// CSV parse error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet (xlsx/xls) parse error.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// The file parsed but contained no data rows.
    #[error("file has no data rows")]
    EmptyTable,

    /// The file has no columns besides the date column.
    #[error("file has no category columns besides the date column")]
    NoCategories,

    /// Column names must be unique.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// A column is not row-aligned with the date index.
    #[error("column '{column}' has {rows} rows, expected {expected}")]
    MisalignedColumn {
        column: String,
        rows: usize,
        expected: usize,
    },

    /// A cell in the resolved date column did not parse as a date.
    #[error("column '{column}', row {row}: cannot parse '{value}' as a date")]
    DateParse {
        column: String,
        row: usize,
        value: String,
    },

    /// A cell in a category column did not parse as a number.
    #[error("column '{column}', row {row}: cannot parse '{value}' as a number")]
    NumberParse {
        column: String,
        row: usize,
        value: String,
    },

    /// Precondition: at least one category must be selected.
    #[error("selection is empty: pick at least one drug category")]
    EmptySelection,

    /// Precondition: selected names must exist in the table.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Chart drawing failed.
    #[error("chart drawing failed: {0}")]
    Draw(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),

    /// PDF generation failed.
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] printpdf::Error),

    /// DOCX generation failed.
    #[error("DOCX generation failed: {0}")]
    Docx(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this is a user-correctable precondition failure rather than
    /// a load/render/document failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedExtension(_) | Error::EmptySelection | Error::UnknownColumn(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        assert!(Error::EmptySelection.is_validation());
        assert!(Error::UnknownColumn("X".into()).is_validation());
        assert!(Error::UnsupportedExtension("txt".into()).is_validation());
        assert!(!Error::EmptyTable.is_validation());
        assert!(!Error::Draw("boom".into()).is_validation());
    }

    #[test]
    fn messages_name_the_offending_cell() {
        let err = Error::DateParse {
            column: "date".into(),
            row: 3,
            value: "not-a-date".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("date"));
        assert!(msg.contains("3"));
        assert!(msg.contains("not-a-date"));
    }
}
