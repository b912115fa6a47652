use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{BASELINE_COLUMN, COMPARISON_COLUMN, PERCENT_CHANGE_COLUMN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Percentage-change table (below the chart)
// ---------------------------------------------------------------------------

/// Cell text for a year value; missing values stay blank.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Render the percentage-change summary for the filtered rows.
pub fn summary_table(ui: &mut Ui, state: &AppState) {
    let rows = match &state.summary {
        Ok(rows) => rows,
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
            return;
        }
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(320.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in ["", BASELINE_COLUMN, COMPARISON_COLUMN, PERCENT_CHANGE_COLUMN] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(20.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(RichText::new(&row.label).strong());
                    });
                    table_row.col(|ui| {
                        ui.label(format_value(row.baseline));
                    });
                    table_row.col(|ui| {
                        ui.label(format_value(row.comparison));
                    });
                    table_row.col(|ui| {
                        ui.label(row.percent_change.to_string());
                    });
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fractional_values() {
        assert_eq!(format_value(1200.0), "1200");
        assert_eq!(format_value(12.5), "12.50");
        assert_eq!(format_value(f64::NAN), "");
    }
}
