//! Pure aggregation helpers behind the renderers. Missing cells (NaN)
//! never participate in an aggregate.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::data::select::SelectedView;

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation between two row-aligned series, skipping rows
/// where either value is missing. Returns NaN when undefined: fewer than
/// two complete pairs, or a zero-variance input.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}

/// Symmetric pairwise correlation matrix over the selected columns, in
/// selection order.
pub fn correlation_matrix(view: &SelectedView) -> Vec<Vec<f64>> {
    let n = view.series.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&view.series[i].values, &view.series[j].values);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    matrix
}

// ---------------------------------------------------------------------------
// Annual aggregation
// ---------------------------------------------------------------------------

/// Calendar years present in the index, ascending, de-duplicated.
pub fn year_buckets(dates: &[NaiveDate]) -> Vec<i32> {
    let mut years: Vec<i32> = dates.iter().map(|d| d.year()).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Per-year sums for each selected column. Returns `(years, totals)`
/// where `totals[column][year_index]` matches `years` ordering.
pub fn annual_totals(view: &SelectedView) -> (Vec<i32>, Vec<Vec<f64>>) {
    let years = year_buckets(view.dates);
    let index: BTreeMap<i32, usize> = years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

    let mut totals = vec![vec![0.0; years.len()]; view.series.len()];
    for (row, date) in view.dates.iter().enumerate() {
        let bucket = index[&date.year()];
        for (col, series) in view.series.iter().enumerate() {
            let v = series.values[row];
            if v.is_finite() {
                totals[col][bucket] += v;
            }
        }
    }
    (years, totals)
}

// ---------------------------------------------------------------------------
// Box plot prep
// ---------------------------------------------------------------------------

/// NaN-free copy of a column, for quartile computation.
pub fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Series, Table};
    use crate::data::select::Selection;

    fn monthly_table(months: u32) -> Table {
        // `months` consecutive months starting 2019-01, two columns.
        let dates: Vec<NaiveDate> = (0..months)
            .map(|i| {
                NaiveDate::from_ymd_opt(2019 + (i / 12) as i32, i % 12 + 1, 1).unwrap()
            })
            .collect();
        let a: Vec<f64> = (0..months).map(|i| i as f64 + 1.0).collect();
        let b: Vec<f64> = (0..months).map(|i| (i as f64) * 2.0).collect();
        Table::new(
            dates,
            vec![Series::new("DrugA", a), Series::new("DrugB", b)],
        )
        .unwrap()
    }

    #[test]
    fn pearson_detects_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_undefined_for_constant_input() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0], &[2.0]).is_nan());
    }

    #[test]
    fn pearson_skips_incomplete_pairs() {
        let xs = [1.0, f64::NAN, 3.0, 4.0];
        let ys = [2.0, 100.0, 6.0, 8.0];
        assert!((pearson(&xs, &ys) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let table = monthly_table(12);
        let sel = Selection::new(["DrugA", "DrugB"], &table).unwrap();
        let view = table.select(&sel).unwrap();
        let m = correlation_matrix(&view);
        assert!((m[0][0] - 1.0).abs() < 1e-12);
        assert!((m[1][1] - 1.0).abs() < 1e-12);
        assert_eq!(m[0][1], m[1][0]);
    }

    #[test]
    fn twenty_four_monthly_rows_make_two_year_buckets() {
        let table = monthly_table(24);
        assert_eq!(year_buckets(table.dates()), vec![2019, 2020]);
    }

    #[test]
    fn annual_totals_equal_per_year_row_sums() {
        let table = monthly_table(24);
        let sel = Selection::new(["DrugA", "DrugB"], &table).unwrap();
        let view = table.select(&sel).unwrap();
        let (years, totals) = annual_totals(&view);

        assert_eq!(years, vec![2019, 2020]);
        for (col, series) in view.series.iter().enumerate() {
            for (y_idx, &year) in years.iter().enumerate() {
                let manual: f64 = view
                    .dates
                    .iter()
                    .zip(&series.values)
                    .filter(|(d, _)| d.year() == year)
                    .map(|(_, &v)| v)
                    .sum();
                assert!((totals[col][y_idx] - manual).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn missing_cells_do_not_poison_annual_sums() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        ];
        let table = Table::new(
            dates,
            vec![Series::new("DrugA", vec![5.0, f64::NAN])],
        )
        .unwrap();
        let sel = Selection::new(["DrugA"], &table).unwrap();
        let view = table.select(&sel).unwrap();
        let (_, totals) = annual_totals(&view);
        assert_eq!(totals[0], vec![5.0]);
    }

    #[test]
    fn finite_values_drops_nan() {
        assert_eq!(
            finite_values(&[1.0, f64::NAN, 3.0]),
            vec![1.0, 3.0]
        );
    }
}
