use std::sync::Arc;

use eframe::egui::{self, Ui};

use crate::data::model::BudgetTable;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

/// Chart height in the central panel.
const CHART_HEIGHT: f32 = 600.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BudgetViewerApp {
    pub state: AppState,
    title: String,
}

impl BudgetViewerApp {
    pub fn new(dataset: Arc<BudgetTable>, title: impl Into<String>) -> Self {
        Self {
            state: AppState::new(dataset),
            title: title.into(),
        }
    }
}

impl eframe::App for BudgetViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &self.title);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart and percentage-change table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.has_selection() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Please select at least one filter to display the plot.");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Interactive Plot");
                    plot::budget_chart(ui, &self.state, CHART_HEIGHT);
                    ui.separator();
                    table::summary_table(ui, &self.state);
                });
        });
    }
}
