use chrono::NaiveDate;

use super::model::{Series, Table};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Selection: which category columns to visualize
// ---------------------------------------------------------------------------

/// An ordered, de-duplicated set of column names, validated against a
/// table at construction. Construction is the precondition boundary:
/// an empty list or an unknown name never reaches a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection(Vec<String>);

impl Selection {
    /// Validate a user-chosen list of names against `table`. Duplicates
    /// keep their first occurrence; order is otherwise preserved.
    pub fn new<I, S>(names: I, table: &Table) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if table.column(&name).is_none() {
                return Err(Error::UnknownColumn(name));
            }
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        if unique.is_empty() {
            return Err(Error::EmptySelection);
        }
        Ok(Selection(unique))
    }

    /// The default the UI pre-selects: the first three columns, or fewer
    /// when the table is narrower.
    pub fn default_for(table: &Table) -> Result<Self> {
        Selection::new(table.column_names().into_iter().take(3), table)
    }

    /// Selected names, in selection order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of selected columns (always ≥ 1).
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// ---------------------------------------------------------------------------
// SelectedView: the table narrowed to a selection
// ---------------------------------------------------------------------------

/// Borrowed view of a table narrowed to the selected columns, in
/// selection order. This is what the chart renderers consume.
#[derive(Debug, Clone)]
pub struct SelectedView<'a> {
    pub dates: &'a [NaiveDate],
    pub series: Vec<&'a Series>,
}

impl Table {
    /// Narrow the table to a selection. Fails with `UnknownColumn` when
    /// the selection was built against a different table.
    pub fn select(&self, selection: &Selection) -> Result<SelectedView<'_>> {
        let series = selection
            .names()
            .iter()
            .map(|name| {
                self.column(name)
                    .ok_or_else(|| Error::UnknownColumn(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SelectedView {
            dates: self.dates(),
            series,
        })
    }
}

impl SelectedView<'_> {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the view has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Min/max over all finite values in the view, or `None` when every
    /// cell is missing.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let mut extent: Option<(f64, f64)> = None;
        for series in &self.series {
            for &v in &series.values {
                if !v.is_finite() {
                    continue;
                }
                extent = Some(match extent {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let dates = (1..=4)
            .map(|m| NaiveDate::from_ymd_opt(2020, m, 1).unwrap())
            .collect();
        Table::new(
            dates,
            vec![
                Series::new("DrugA", vec![1.0, 2.0, 3.0, 4.0]),
                Series::new("DrugB", vec![5.0, 6.0, 7.0, 8.0]),
                Series::new("DrugC", vec![9.0, f64::NAN, 11.0, 12.0]),
                Series::new("DrugD", vec![0.5, 0.6, 0.7, 0.8]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_selection_is_rejected() {
        let table = sample_table();
        let err = Selection::new(Vec::<String>::new(), &table).unwrap_err();
        assert!(matches!(err, Error::EmptySelection));
        assert!(err.is_validation());
    }

    #[test]
    fn unknown_column_is_rejected() {
        let table = sample_table();
        let err = Selection::new(["DrugA", "DrugX"], &table).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(name) if name == "DrugX"));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let table = sample_table();
        let sel = Selection::new(["DrugB", "DrugA", "DrugB"], &table).unwrap();
        assert_eq!(sel.names(), ["DrugB", "DrugA"]);
    }

    #[test]
    fn default_is_first_three_columns() {
        let table = sample_table();
        let sel = Selection::default_for(&table).unwrap();
        assert_eq!(sel.names(), ["DrugA", "DrugB", "DrugC"]);
    }

    #[test]
    fn view_preserves_selection_order() {
        let table = sample_table();
        let sel = Selection::new(["DrugD", "DrugA"], &table).unwrap();
        let view = table.select(&sel).unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(view.series[0].name, "DrugD");
        assert_eq!(view.series[1].name, "DrugA");
    }

    #[test]
    fn value_extent_skips_missing_cells() {
        let table = sample_table();
        let sel = Selection::new(["DrugC"], &table).unwrap();
        let view = table.select(&sel).unwrap();
        assert_eq!(view.value_extent(), Some((9.0, 12.0)));
    }
}
