use std::collections::{BTreeSet, HashSet};

use super::model::{BudgetTable, Level};

// ---------------------------------------------------------------------------
// FilterSelection: which values are selected per hierarchy level
// ---------------------------------------------------------------------------

/// Per-level selection state, stored in [`Level::FILTER_ORDER`] order.
/// An empty set means "no filter" at that level (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    selected: [BTreeSet<String>; 5],
}

impl FilterSelection {
    /// Selected values at a level.
    pub fn selected(&self, level: Level) -> &BTreeSet<String> {
        &self.selected[level.filter_position()]
    }

    /// Replace the selection at a level.
    pub fn set(&mut self, level: Level, values: impl IntoIterator<Item = String>) {
        self.selected[level.filter_position()] = values.into_iter().collect();
    }

    /// Toggle a single value at a level.
    pub fn toggle(&mut self, level: Level, value: &str) {
        let selected = &mut self.selected[level.filter_position()];
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Clear one level.
    pub fn clear(&mut self, level: Level) {
        self.selected[level.filter_position()].clear();
    }

    /// "Unselect All": drop every level's selection.
    pub fn clear_all(&mut self) {
        for selected in &mut self.selected {
            selected.clear();
        }
    }

    /// Whether no level carries a selection.
    pub fn is_empty(&self) -> bool {
        self.selected.iter().all(BTreeSet::is_empty)
    }

    /// Stage descriptors in application order.
    pub fn stages(&self) -> impl Iterator<Item = FilterStage<'_>> {
        Level::FILTER_ORDER.into_iter().map(|level| FilterStage {
            level,
            selected: self.selected(level),
        })
    }
}

/// One step of the cascade: a level plus the values selected at it.
#[derive(Debug, Clone, Copy)]
pub struct FilterStage<'a> {
    pub level: Level,
    pub selected: &'a BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Cascade result
// ---------------------------------------------------------------------------

/// Output of [`cascade`]: retained rows plus the options offered per level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeResult {
    /// Indices into [`BudgetTable::rows`] that pass every stage, in source order.
    pub indices: Vec<usize>,
    /// Options per level in [`Level::FILTER_ORDER`] order, each in first-seen order.
    options: [Vec<String>; 5],
}

impl CascadeResult {
    /// Distinct values reachable at `level` given the more senior filters.
    pub fn options(&self, level: Level) -> &[String] {
        &self.options[level.filter_position()]
    }
}

/// Distinct values of `level` among `indices`, in first-seen order.
pub fn distinct_values(table: &BudgetTable, indices: &[usize], level: Level) -> Vec<String> {
    let mut seen = HashSet::new();
    indices
        .iter()
        .map(|&i| table.rows[i].categories.get(level))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Run the cascading filter.
///
/// Stages run senior to junior. Each stage first records the distinct values
/// of its column among the rows still retained (the options for that level),
/// then narrows the rows if its selection is non-empty. A stage's options
/// therefore never depend on a more junior selection. Selected values that are
/// not among the options simply match nothing.
pub fn cascade(table: &BudgetTable, selection: &FilterSelection) -> CascadeResult {
    let mut indices: Vec<usize> = (0..table.len()).collect();
    let mut options: [Vec<String>; 5] = Default::default();

    for stage in selection.stages() {
        options[stage.level.filter_position()] = distinct_values(table, &indices, stage.level);

        if !stage.selected.is_empty() {
            indices.retain(|&i| stage.selected.contains(table.rows[i].categories.get(stage.level)));
        }
    }

    CascadeResult { indices, options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{BudgetRow, Categories};

    fn row(h: &str, s1: &str, s2: &str, pg: &str, sp: &str) -> BudgetRow {
        BudgetRow {
            categories: Categories::new(h, s1, s2, pg, sp),
            values: vec![0.0; 11],
            percent_change: 0.0,
        }
    }

    fn table() -> BudgetTable {
        BudgetTable::new(vec![
            row("Bildung", "Schulen", "Schulen", "Grundschule", "Betrieb"),
            row("Bildung", "Schulen", "Gymnasien", "Gymnasium", "Betrieb"),
            row("Soziales", "Jugend", "Kitas", "Kita", "Kita"),
            row("Soziales", "Soziales", "Hilfe", "Grundschule", "Mensa"),
            row("Kultur", "Museen", "Museen", "Museum", "Ausstellung"),
        ])
    }

    fn select(selection: &mut FilterSelection, level: Level, values: &[&str]) {
        selection.set(level, values.iter().map(|v| v.to_string()));
    }

    #[test]
    fn empty_selection_keeps_everything() {
        let table = table();
        let result = cascade(&table, &FilterSelection::default());
        assert_eq!(result.indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(
            result.options(Level::Produktgruppe),
            ["Grundschule", "Gymnasium", "Kita", "Museum"]
        );
        assert_eq!(
            result.options(Level::Hauptkategorie),
            ["Bildung", "Soziales", "Kultur"]
        );
    }

    #[test]
    fn options_cascade_from_senior_levels() {
        let table = table();
        let mut selection = FilterSelection::default();
        select(&mut selection, Level::Produktgruppe, &["Grundschule"]);

        let result = cascade(&table, &selection);
        assert_eq!(result.indices, vec![0, 3]);
        assert_eq!(result.options(Level::Subprodukt), ["Betrieb", "Mensa"]);
        assert_eq!(result.options(Level::Hauptkategorie), ["Bildung", "Soziales"]);

        // A junior selection never changes senior option lists.
        select(&mut selection, Level::Subprodukt, &["Mensa"]);
        let narrowed = cascade(&table, &selection);
        assert_eq!(narrowed.indices, vec![3]);
        assert_eq!(narrowed.options(Level::Produktgruppe), result.options(Level::Produktgruppe));
        assert_eq!(narrowed.options(Level::Subprodukt), result.options(Level::Subprodukt));
        assert_eq!(narrowed.options(Level::Hauptkategorie), ["Soziales"]);
    }

    #[test]
    fn row_count_never_grows_with_more_levels() {
        let table = table();
        let mut selection = FilterSelection::default();
        let mut previous = cascade(&table, &selection).indices.len();

        let steps: [(Level, &[&str]); 5] = [
            (Level::Produktgruppe, &["Grundschule", "Gymnasium", "Kita"]),
            (Level::Subprodukt, &["Betrieb", "Kita"]),
            (Level::Hauptkategorie, &["Bildung"]),
            (Level::Subkategorie1, &["Schulen"]),
            (Level::Subkategorie2, &["Gymnasien"]),
        ];
        for (level, values) in steps {
            select(&mut selection, level, values);
            let count = cascade(&table, &selection).indices.len();
            assert!(count <= previous, "{level} grew the row set");
            previous = count;
        }
        assert_eq!(previous, 1);
    }

    #[test]
    fn clear_all_restores_full_table() {
        let table = table();
        let unfiltered = cascade(&table, &FilterSelection::default());

        let mut selection = FilterSelection::default();
        select(&mut selection, Level::Hauptkategorie, &["Kultur"]);
        select(&mut selection, Level::Subkategorie2, &["Museen"]);
        assert_ne!(cascade(&table, &selection), unfiltered);

        selection.clear_all();
        assert!(selection.is_empty());
        assert_eq!(cascade(&table, &selection), unfiltered);
    }

    #[test]
    fn unmatched_selection_empties_junior_levels() {
        let table = table();
        let mut selection = FilterSelection::default();
        select(&mut selection, Level::Produktgruppe, &["Feuerwehr"]);

        let result = cascade(&table, &selection);
        assert!(result.indices.is_empty());
        assert!(!result.options(Level::Produktgruppe).is_empty());
        for level in &Level::FILTER_ORDER[1..] {
            assert!(result.options(*level).is_empty(), "{level} still has options");
        }
    }

    #[test]
    fn stale_selection_is_inert() {
        let table = table();
        let mut selection = FilterSelection::default();
        select(&mut selection, Level::Produktgruppe, &["Museum"]);
        // "Betrieb" is not reachable under Museum; it matches nothing.
        select(&mut selection, Level::Subprodukt, &["Ausstellung", "Betrieb"]);

        let result = cascade(&table, &selection);
        assert_eq!(result.indices, vec![4]);
        assert_eq!(result.options(Level::Subprodukt), ["Ausstellung"]);
        assert!(selection.selected(Level::Subprodukt).contains("Betrieb"));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = FilterSelection::default();
        selection.toggle(Level::Subkategorie1, "Jugend");
        assert!(selection.selected(Level::Subkategorie1).contains("Jugend"));
        assert!(!selection.is_empty());
        selection.toggle(Level::Subkategorie1, "Jugend");
        assert!(selection.is_empty());
    }
}
