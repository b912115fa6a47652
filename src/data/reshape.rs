use super::label::hover_label;
use super::model::{BudgetTable, Categories};

// ---------------------------------------------------------------------------
// Long format
// ---------------------------------------------------------------------------

/// One (row, year) observation of the filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub categories: Categories,
    /// Year-column label, e.g. `"Ist 2018"`.
    pub year: String,
    pub value: f64,
    pub hover_label: String,
}

/// Unpivot the year columns of the rows at `indices`.
///
/// Emits one [`LongRow`] per (row, year column): row-major, then in
/// `table.year_columns` order. Nothing is filtered or aggregated.
pub fn melt(table: &BudgetTable, indices: &[usize]) -> Vec<LongRow> {
    let mut long = Vec::with_capacity(indices.len() * table.year_columns.len());

    for &i in indices {
        let row = &table.rows[i];
        let label = hover_label(&row.categories);

        for (year, &value) in table.year_columns.iter().zip(&row.values) {
            long.push(LongRow {
                categories: row.categories.clone(),
                year: year.clone(),
                value,
                hover_label: label.clone(),
            });
        }
    }

    long
}

/// Distinct hover labels of `long`, in first-seen order.
pub fn series_labels(long: &[LongRow]) -> Vec<&str> {
    let mut labels: Vec<&str> = Vec::new();
    for row in long {
        if !labels.contains(&row.hover_label.as_str()) {
            labels.push(&row.hover_label);
        }
    }
    labels
}
