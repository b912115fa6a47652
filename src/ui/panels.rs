use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::Level;
use crate::data::reshape::series_labels;
use crate::state::AppState;

/// A filter change requested from the side panel; applied after rendering so
/// the widgets never hold a borrow of the state while it is recomputed.
enum FilterAction {
    Toggle(Level, String),
    SelectAll(Level),
    SelectNone(Level),
    UnselectAll,
}

// ---------------------------------------------------------------------------
// Left side panel – cascading filter widgets
// ---------------------------------------------------------------------------

/// Header of a level's filter section: selected / offered counts. Selected
/// values no longer offered still filter, so they are counted too.
fn level_header(state: &AppState, level: Level) -> String {
    format!(
        "Select {level}  ({}/{})",
        state.selection.selected(level).len(),
        state.cascade.options(level).len()
    )
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter by categories");
    ui.separator();

    let mut action = None;

    if ui.button("Unselect All").clicked() {
        action = Some(FilterAction::UnselectAll);
    }
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for level in Level::FILTER_ORDER {
                let options = state.cascade.options(level);
                let selected = state.selection.selected(level);
                let header_text = level_header(&*state, level);

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(level.column_name())
                    .default_open(level == Level::Produktgruppe)
                    .show(ui, |ui: &mut Ui| {
                        if options.is_empty() {
                            ui.weak("No options for the current filters.");
                            return;
                        }

                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                action = Some(FilterAction::SelectAll(level));
                            }
                            if ui.small_button("None").clicked() {
                                action = Some(FilterAction::SelectNone(level));
                            }
                        });

                        for value in options {
                            let mut checked = selected.contains(value);
                            let text = if value.is_empty() { "<empty>" } else { value.as_str() };
                            if ui.checkbox(&mut checked, text).changed() {
                                action = Some(FilterAction::Toggle(level, value.clone()));
                            }
                        }
                    });
            }
        });

    match action {
        Some(FilterAction::Toggle(level, value)) => state.toggle_filter_value(level, &value),
        Some(FilterAction::SelectAll(level)) => state.select_all(level),
        Some(FilterAction::SelectNone(level)) => state.select_none(level),
        Some(FilterAction::UnselectAll) => state.unselect_all(),
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with dataset counts.
pub fn top_bar(ui: &mut Ui, state: &AppState, title: &str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(title);

        ui.separator();

        ui.label(format!(
            "{} rows loaded, {} visible",
            state.dataset.len(),
            state.cascade.indices.len()
        ));

        if state.has_selection() {
            ui.separator();
            ui.label(format!("{} series", series_labels(&state.long_rows).len()));
        }
    });
}
