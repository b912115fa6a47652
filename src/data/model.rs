use std::fmt;

// ---------------------------------------------------------------------------
// Column layout of the budget table
// ---------------------------------------------------------------------------

/// Fiscal-year value columns in chart order.
/// `Ist` = actual, `Soll` = budgeted, `Plan` = planned.
pub const YEAR_COLUMNS: [&str; 11] = [
    "Ist 2018",
    "Soll 2019",
    "Soll 2020",
    "Ist 2021",
    "Ist 2022",
    "Ist 2023",
    "Soll 2024",
    "Soll 2025",
    "Plan 2026",
    "Plan 2027",
    "Plan 2028",
];

/// Year column the percentage change is measured from.
pub const BASELINE_COLUMN: &str = "Ist 2018";
/// Position of [`BASELINE_COLUMN`] in [`YEAR_COLUMNS`].
pub const BASELINE_INDEX: usize = 0;

/// Year column the percentage change is measured to.
pub const COMPARISON_COLUMN: &str = "Ist 2023";
/// Position of [`COMPARISON_COLUMN`] in [`YEAR_COLUMNS`].
pub const COMPARISON_INDEX: usize = 5;

/// Precomputed percentage change between the baseline and comparison columns.
pub const PERCENT_CHANGE_COLUMN: &str = "Percentagechange Ist 2018 vs. Ist 2023";

// ---------------------------------------------------------------------------
// Level – one of the five category columns
// ---------------------------------------------------------------------------

/// A hierarchy level, i.e. one of the five category columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Hauptkategorie,
    Subkategorie1,
    Subkategorie2,
    Produktgruppe,
    Subprodukt,
}

impl Level {
    /// Levels in source-column order, also the order the label rules read them.
    pub const DISPLAY_ORDER: [Level; 5] = [
        Level::Hauptkategorie,
        Level::Subkategorie1,
        Level::Subkategorie2,
        Level::Produktgruppe,
        Level::Subprodukt,
    ];

    /// Levels in the order the cascading filter applies them (senior first).
    pub const FILTER_ORDER: [Level; 5] = [
        Level::Produktgruppe,
        Level::Subprodukt,
        Level::Hauptkategorie,
        Level::Subkategorie1,
        Level::Subkategorie2,
    ];

    /// Header of the source column backing this level.
    pub fn column_name(self) -> &'static str {
        match self {
            Level::Hauptkategorie => "Hauptkategorie",
            Level::Subkategorie1 => "Subkategorie_1",
            Level::Subkategorie2 => "Subkategorie_2",
            Level::Produktgruppe => "Produktgruppe",
            Level::Subprodukt => "Subprodukt",
        }
    }

    /// Position of this level in [`Level::FILTER_ORDER`].
    pub fn filter_position(self) -> usize {
        match self {
            Level::Produktgruppe => 0,
            Level::Subprodukt => 1,
            Level::Hauptkategorie => 2,
            Level::Subkategorie1 => 3,
            Level::Subkategorie2 => 4,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Categories – the five category strings of a row
// ---------------------------------------------------------------------------

/// The category tuple of a budget line item. Values may be empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Categories {
    pub hauptkategorie: String,
    pub subkategorie_1: String,
    pub subkategorie_2: String,
    pub produktgruppe: String,
    pub subprodukt: String,
}

impl Categories {
    #[cfg(test)]
    pub fn new(
        hauptkategorie: impl Into<String>,
        subkategorie_1: impl Into<String>,
        subkategorie_2: impl Into<String>,
        produktgruppe: impl Into<String>,
        subprodukt: impl Into<String>,
    ) -> Self {
        Self {
            hauptkategorie: hauptkategorie.into(),
            subkategorie_1: subkategorie_1.into(),
            subkategorie_2: subkategorie_2.into(),
            produktgruppe: produktgruppe.into(),
            subprodukt: subprodukt.into(),
        }
    }

    /// Value of the given level.
    pub fn get(&self, level: Level) -> &str {
        match level {
            Level::Hauptkategorie => &self.hauptkategorie,
            Level::Subkategorie1 => &self.subkategorie_1,
            Level::Subkategorie2 => &self.subkategorie_2,
            Level::Produktgruppe => &self.produktgruppe,
            Level::Subprodukt => &self.subprodukt,
        }
    }

    /// Mutable access used by the loaders while filling a row.
    pub fn get_mut(&mut self, level: Level) -> &mut String {
        match level {
            Level::Hauptkategorie => &mut self.hauptkategorie,
            Level::Subkategorie1 => &mut self.subkategorie_1,
            Level::Subkategorie2 => &mut self.subkategorie_2,
            Level::Produktgruppe => &mut self.produktgruppe,
            Level::Subprodukt => &mut self.subprodukt,
        }
    }
}

// ---------------------------------------------------------------------------
// BudgetRow – one line item of the source table
// ---------------------------------------------------------------------------

/// A single budget line item (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRow {
    pub categories: Categories,
    /// One value per entry of [`BudgetTable::year_columns`]; NaN for an empty cell.
    pub values: Vec<f64>,
    /// Precomputed percentage change between baseline and comparison year.
    pub percent_change: f64,
}

// ---------------------------------------------------------------------------
// BudgetTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTable {
    pub rows: Vec<BudgetRow>,
    /// Ordered year-column labels; every row's `values` follows this order.
    pub year_columns: Vec<String>,
}

impl BudgetTable {
    /// Table using the standard [`YEAR_COLUMNS`] layout.
    pub fn new(rows: Vec<BudgetRow>) -> Self {
        Self {
            rows,
            year_columns: YEAR_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_order_matches_positions() {
        for (i, level) in Level::FILTER_ORDER.iter().enumerate() {
            assert_eq!(level.filter_position(), i);
        }
    }

    #[test]
    fn comparison_indices_match_year_layout() {
        assert_eq!(YEAR_COLUMNS[BASELINE_INDEX], BASELINE_COLUMN);
        assert_eq!(YEAR_COLUMNS[COMPARISON_INDEX], COMPARISON_COLUMN);
    }

    #[test]
    fn new_table_uses_year_layout() {
        let table = BudgetTable::new(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.year_columns, YEAR_COLUMNS);
    }
}
