use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{CascadeResult, FilterSelection, cascade};
use crate::data::model::{BudgetTable, Level};
use crate::data::reshape::{LongRow, melt, series_labels};
use crate::data::summary::{SummaryError, SummaryRow, percentage_change_table};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, shared read-only.
    pub dataset: Arc<BudgetTable>,

    /// Per-level filter selections.
    pub selection: FilterSelection,

    /// Retained rows and per-level options for the current selection.
    pub cascade: CascadeResult,

    /// Long-format chart data for the retained rows.
    pub long_rows: Vec<LongRow>,

    /// Percentage-change table, or the coercion failure that prevented it.
    pub summary: Result<Vec<SummaryRow>, SummaryError>,

    /// One colour per chart series.
    pub color_map: ColorMap,
}

impl AppState {
    /// Initial state: nothing selected.
    pub fn new(dataset: Arc<BudgetTable>) -> Self {
        let mut state = Self {
            dataset,
            selection: FilterSelection::default(),
            cascade: CascadeResult::default(),
            long_rows: Vec::new(),
            summary: Ok(Vec::new()),
            color_map: ColorMap::default(),
        };
        state.refresh();
        state
    }

    /// Whether any level has a selection; the chart is only drawn then.
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Recompute everything derived from the selection.
    pub fn refresh(&mut self) {
        self.cascade = cascade(&self.dataset, &self.selection);

        if self.has_selection() {
            self.long_rows = melt(&self.dataset, &self.cascade.indices);
            self.summary = percentage_change_table(&self.dataset, &self.cascade.indices);
        } else {
            self.long_rows.clear();
            self.summary = Ok(Vec::new());
        }

        if let Err(e) = &self.summary {
            log::warn!("Percentage-change table unavailable: {e}");
        }

        self.color_map = ColorMap::new(series_labels(&self.long_rows));

        log::debug!(
            "Filter refresh: {} of {} rows retained, {} long rows",
            self.cascade.indices.len(),
            self.dataset.len(),
            self.long_rows.len()
        );
    }

    /// Toggle a single value at a level.
    pub fn toggle_filter_value(&mut self, level: Level, value: &str) {
        self.selection.toggle(level, value);
        self.refresh();
    }

    /// Select every currently offered value at a level.
    pub fn select_all(&mut self, level: Level) {
        let options = self.cascade.options(level).to_vec();
        self.selection.set(level, options);
        self.refresh();
    }

    /// Deselect all values at a level.
    pub fn select_none(&mut self, level: Level) {
        self.selection.clear(level);
        self.refresh();
    }

    /// "Unselect All": clear every level.
    pub fn unselect_all(&mut self) {
        self.selection.clear_all();
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{BudgetRow, Categories};

    fn dataset() -> Arc<BudgetTable> {
        let row = |categories: Categories, pct: f64| BudgetRow {
            categories,
            values: vec![1.0; 11],
            percent_change: pct,
        };
        Arc::new(BudgetTable::new(vec![
            row(Categories::new("Bildung", "Schulen", "Schulen", "Grundschule", "Betrieb"), 5.5),
            row(Categories::new("Soziales", "Jugend", "Kitas", "Kita", "Kita"), f64::NAN),
        ]))
    }

    #[test]
    fn starts_without_chart_data() {
        let state = AppState::new(dataset());
        assert!(!state.has_selection());
        assert_eq!(state.cascade.indices, vec![0, 1]);
        assert!(state.long_rows.is_empty());
        assert_eq!(state.summary, Ok(Vec::new()));
    }

    #[test]
    fn selection_produces_chart_and_table() {
        let mut state = AppState::new(dataset());
        state.toggle_filter_value(Level::Produktgruppe, "Grundschule");

        assert_eq!(state.cascade.indices, vec![0]);
        assert_eq!(state.long_rows.len(), 11);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].label, "Bildung, Schulen, Grundschule, Betrieb");
        assert_eq!(summary[0].percent_change, 5);
    }

    #[test]
    fn unselect_all_restores_initial_state() {
        let mut state = AppState::new(dataset());
        let initial = state.cascade.clone();

        state.toggle_filter_value(Level::Hauptkategorie, "Soziales");
        state.select_all(Level::Subkategorie1);
        assert!(state.summary.is_err());

        state.unselect_all();
        assert!(!state.has_selection());
        assert_eq!(state.cascade, initial);
        assert!(state.long_rows.is_empty());
    }

    #[test]
    fn select_all_uses_offered_options_only() {
        let mut state = AppState::new(dataset());
        state.toggle_filter_value(Level::Produktgruppe, "Kita");
        state.select_all(Level::Subprodukt);
        assert_eq!(state.selection.selected(Level::Subprodukt).len(), 1);
        assert!(state.selection.selected(Level::Subprodukt).contains("Kita"));
    }
}
