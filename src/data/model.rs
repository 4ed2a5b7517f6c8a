use chrono::NaiveDate;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Series – one named numeric column
// ---------------------------------------------------------------------------

/// A single drug category: a named column of sales volumes, row-aligned
/// with the table's date index. Missing cells are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Series {
            name: name.into(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// In-memory tabular structure: a calendar-date index plus named numeric
/// columns. Column names are unique. The index keeps whatever row order
/// the source file had; monotonicity is not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    dates: Vec<NaiveDate>,
    columns: Vec<Series>,
}

impl Table {
    /// Build a table, checking the unique-name and row-alignment invariants.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<Series>) -> Result<Self> {
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(Error::DuplicateColumn(col.name.clone()));
            }
            if col.values.len() != dates.len() {
                return Err(Error::MisalignedColumn {
                    column: col.name.clone(),
                    rows: col.values.len(),
                    expected: dates.len(),
                });
            }
        }
        Ok(Table { dates, columns })
    }

    /// The date index, in file order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// All category columns, in file order.
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Ordered category names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn builds_aligned_table() {
        let table = Table::new(
            vec![d(2020, 1, 1), d(2020, 2, 1)],
            vec![
                Series::new("DrugA", vec![1.0, 2.0]),
                Series::new("DrugB", vec![3.0, 4.0]),
            ],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names(), vec!["DrugA", "DrugB"]);
        assert_eq!(table.column("DrugB").unwrap().values, vec![3.0, 4.0]);
        assert!(table.column("DrugC").is_none());
    }

    #[test]
    fn rejects_duplicate_column_names() {
        let err = Table::new(
            vec![d(2020, 1, 1)],
            vec![
                Series::new("DrugA", vec![1.0]),
                Series::new("DrugA", vec![2.0]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(name) if name == "DrugA"));
    }

    #[test]
    fn rejects_misaligned_columns() {
        let err = Table::new(
            vec![d(2020, 1, 1), d(2020, 2, 1)],
            vec![Series::new("DrugA", vec![1.0])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MisalignedColumn {
                rows: 1,
                expected: 2,
                ..
            }
        ));
    }
}
