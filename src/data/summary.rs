use std::collections::HashSet;

use thiserror::Error;

use super::label::hover_label;
use super::model::{BudgetTable, BASELINE_INDEX, COMPARISON_INDEX};

/// Failure to coerce a percentage change to a whole number.
#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    #[error("percentage change for '{label}' is not a whole-number value: {value}")]
    NotWholeNumber { label: String, value: f64 },
}

/// One line of the percentage-change table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub baseline: f64,
    pub comparison: f64,
    /// Percentage change truncated toward zero.
    pub percent_change: i64,
}

/// Build the percentage-change table for the rows at `indices`.
///
/// One entry per distinct hover label in first-seen order; when several rows
/// share a label the first one supplies the values.
pub fn percentage_change_table(
    table: &BudgetTable,
    indices: &[usize],
) -> Result<Vec<SummaryRow>, SummaryError> {
    let mut seen = HashSet::new();
    let mut summary = Vec::new();

    for &i in indices {
        let row = &table.rows[i];
        let label = hover_label(&row.categories);
        if !seen.insert(label.clone()) {
            continue;
        }

        let percent_change = whole_number(row.percent_change).ok_or_else(|| {
            SummaryError::NotWholeNumber {
                label: label.clone(),
                value: row.percent_change,
            }
        })?;

        summary.push(SummaryRow {
            label,
            baseline: row.values[BASELINE_INDEX],
            comparison: row.values[COMPARISON_INDEX],
            percent_change,
        });
    }

    Ok(summary)
}

/// Integer cast semantics: truncate toward zero; NaN, infinities and values
/// outside `i64` have no whole-number form.
fn whole_number(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // i64::MAX is not exactly representable; 2^63 is the first value past it.
    if truncated.is_finite()
        && truncated >= i64::MIN as f64
        && truncated < 9_223_372_036_854_775_808.0
    {
        Some(truncated as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{BudgetRow, Categories};

    fn row(categories: Categories, baseline: f64, comparison: f64, pct: f64) -> BudgetRow {
        let mut values = vec![0.0; 11];
        values[0] = baseline;
        values[5] = comparison;
        BudgetRow {
            categories,
            values,
            percent_change: pct,
        }
    }

    #[test]
    fn one_entry_per_distinct_label() {
        let table = BudgetTable::new(vec![
            row(Categories::new("A", "B", "B", "C", "D"), 100.0, 150.0, 50.0),
            row(Categories::new("A", "B", "C", "D", "E"), 200.0, 100.0, -50.0),
            row(Categories::new("A", "B", "B", "C", "D"), 1.0, 2.0, 100.0),
        ]);

        let summary = percentage_change_table(&table, &[0, 1, 2]).unwrap();
        assert_eq!(
            summary,
            vec![
                SummaryRow {
                    label: "A, B, C, D".to_string(),
                    baseline: 100.0,
                    comparison: 150.0,
                    percent_change: 50,
                },
                SummaryRow {
                    label: "A, B, C, D, E".to_string(),
                    baseline: 200.0,
                    comparison: 100.0,
                    percent_change: -50,
                },
            ]
        );
    }

    #[test]
    fn percentage_truncates_toward_zero() {
        let table = BudgetTable::new(vec![
            row(Categories::new("A", "B", "C", "D", "E"), 1.0, 1.0, 12.9),
            row(Categories::new("F", "G", "H", "I", "J"), 1.0, 1.0, -7.6),
        ]);
        let summary = percentage_change_table(&table, &[0, 1]).unwrap();
        assert_eq!(summary[0].percent_change, 12);
        assert_eq!(summary[1].percent_change, -7);
    }

    #[test]
    fn missing_percentage_fails_coercion() {
        let table = BudgetTable::new(vec![row(
            Categories::new("A", "B", "C", "D", "E"),
            0.0,
            10.0,
            f64::NAN,
        )]);
        let err = percentage_change_table(&table, &[0]).unwrap_err();
        assert!(matches!(
            err,
            SummaryError::NotWholeNumber { ref label, .. } if label == "A, B, C, D, E"
        ));
    }

    #[test]
    fn empty_selection_gives_empty_table() {
        let table = BudgetTable::new(vec![row(Categories::default(), 0.0, 0.0, f64::NAN)]);
        assert_eq!(percentage_change_table(&table, &[]), Ok(Vec::new()));
    }

    #[test]
    fn whole_number_bounds() {
        assert_eq!(whole_number(0.99), Some(0));
        assert_eq!(whole_number(-0.99), Some(0));
        assert_eq!(whole_number(f64::INFINITY), None);
        assert_eq!(whole_number(1e300), None);
    }
}
