use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use log::warn;

use super::model::{Series, Table};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Recognized upload formats, inferred from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    /// Excel workbook (`.xlsx` or `.xls`).
    Spreadsheet,
}

impl FileFormat {
    /// Infer the format from a filename. Unknown extensions are a
    /// validation error, reported before any bytes are touched.
    pub fn from_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" | "xls" => Ok(FileFormat::Spreadsheet),
            other => Err(Error::UnsupportedExtension(other.to_string())),
        }
    }
}

/// How the table's date index column was chosen.
///
/// Resolution order: a column literally named `datum`, then one named
/// `date`, then the first column as a fallback. The fallback is surfaced
/// so the caller can warn the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSource {
    Named(String),
    FirstColumnFallback(String),
}

/// Loader output: the parsed table plus how its index was resolved.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    pub date_source: DateSource,
}

/// Load an uploaded file from disk. Dispatch by extension.
pub fn load_file(path: &Path) -> Result<LoadedTable> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let format = FileFormat::from_name(name)?;
    let bytes = std::fs::read(path)?;
    load_bytes(&bytes, format)
}

/// Load an already-uploaded in-memory file.
pub fn load_bytes(bytes: &[u8], format: FileFormat) -> Result<LoadedTable> {
    match format {
        FileFormat::Csv => load_csv(bytes),
        FileFormat::Spreadsheet => load_spreadsheet(bytes),
    }
}

// ---------------------------------------------------------------------------
// Intermediate cell representation
// ---------------------------------------------------------------------------

/// One unparsed cell. CSV only produces `Empty`/`Text`; spreadsheets also
/// carry native numbers and dates.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV bytes into a date-indexed table.
pub fn load_csv(bytes: &[u8]) -> Result<LoadedTable> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    let field = field.trim();
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    build_table(headers, rows)
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Parse xlsx/xls bytes. Only the first worksheet is read; its first row
/// must hold the column headers.
pub fn load_spreadsheet(bytes: &[u8]) -> Result<LoadedTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(Error::EmptyTable)??;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or(Error::EmptyTable)?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();
    let rows: Vec<Vec<Cell>> = rows_iter
        .map(|r| r.iter().map(cell_from_sheet).collect())
        .collect();

    build_table(headers, rows)
}

fn cell_from_sheet(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        // Formula errors (`#DIV/0!`, `#N/A`, ..) keep their display text so
        // the strict cell parsers reject them with column/row context.
        Data::Error(e) => Cell::Text(e.to_string()),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.to_string())
            }
        }
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Cell::Date(ndt.date()),
            None => Cell::Empty,
        },
        // ISO text forms fall through to the text date parser.
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// Table assembly
// ---------------------------------------------------------------------------

fn build_table(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<LoadedTable> {
    if headers.len() < 2 {
        return Err(Error::NoCategories);
    }
    if rows.is_empty() {
        return Err(Error::EmptyTable);
    }

    let (date_idx, date_source) = resolve_date_column(&headers);
    if let DateSource::FirstColumnFallback(name) = &date_source {
        warn!("no 'datum' or 'date' column found; assuming first column '{name}' holds dates");
    }

    let mut dates = Vec::with_capacity(rows.len());
    let mut columns: Vec<Series> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(_, h)| Series::new(h.clone(), Vec::with_capacity(rows.len())))
        .collect();

    for (row_no, row) in rows.iter().enumerate() {
        let date_cell = row.get(date_idx).cloned().unwrap_or(Cell::Empty);
        dates.push(parse_date_cell(&date_cell, &headers[date_idx], row_no)?);

        let mut slot = 0;
        for (i, header) in headers.iter().enumerate() {
            if i == date_idx {
                continue;
            }
            let cell = row.get(i).cloned().unwrap_or(Cell::Empty);
            columns[slot]
                .values
                .push(parse_number_cell(&cell, header, row_no)?);
            slot += 1;
        }
    }

    let table = Table::new(dates, columns)?;
    Ok(LoadedTable { table, date_source })
}

fn resolve_date_column(headers: &[String]) -> (usize, DateSource) {
    let named = headers
        .iter()
        .position(|h| h == "datum")
        .or_else(|| headers.iter().position(|h| h == "date"));

    match named {
        Some(i) => (i, DateSource::Named(headers[i].clone())),
        None => (0, DateSource::FirstColumnFallback(headers[0].clone())),
    }
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

/// Date formats accepted for text cells, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_date_cell(cell: &Cell, column: &str, row: usize) -> Result<NaiveDate> {
    let date_err = |value: String| Error::DateParse {
        column: column.to_string(),
        row,
        value,
    };

    match cell {
        Cell::Date(d) => Ok(*d),
        Cell::Text(s) => parse_date_str(s).ok_or_else(|| date_err(s.clone())),
        Cell::Number(n) => Err(date_err(n.to_string())),
        Cell::Empty => Err(date_err(String::new())),
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // `2014-01` style month stamps: take the first of the month.
    if let Some((y, m)) = s.split_once('-') {
        if let (Ok(y), Ok(m)) = (y.parse::<i32>(), m.parse::<u32>()) {
            return NaiveDate::from_ymd_opt(y, m, 1);
        }
    }
    None
}

fn parse_number_cell(cell: &Cell, column: &str, row: usize) -> Result<f64> {
    let number_err = |value: String| Error::NumberParse {
        column: column.to_string(),
        row,
        value,
    };

    match cell {
        Cell::Number(n) => Ok(*n),
        Cell::Empty => Ok(f64::NAN),
        Cell::Text(s) => s.parse().map_err(|_| number_err(s.clone())),
        Cell::Date(d) => Err(number_err(d.to_string())),
    }
}
