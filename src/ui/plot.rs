use eframe::egui::Ui;
use egui_plot::{Corner, GridMark, Legend, Line, Plot, PlotPoints, Points, uniform_grid_spacer};

use crate::data::reshape::LongRow;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Budget line chart (central panel)
// ---------------------------------------------------------------------------

/// Chart points per series, keyed by hover label in first-seen order.
/// x is the year column's position, y its value; missing values are skipped.
pub fn series_points<'a>(
    long_rows: &'a [LongRow],
    year_columns: &[String],
) -> Vec<(&'a str, Vec<[f64; 2]>)> {
    let mut series: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();

    for row in long_rows {
        let Some(x) = year_columns.iter().position(|y| *y == row.year) else {
            continue;
        };
        let idx = match series.iter().position(|(label, _)| *label == row.hover_label) {
            Some(idx) => idx,
            None => {
                series.push((&row.hover_label, Vec::new()));
                series.len() - 1
            }
        };
        if row.value.is_finite() {
            series[idx].1.push([x as f64, row.value]);
        }
    }

    series
}

/// Axis tick text: the year label at integer positions, nothing in between.
fn year_tick(year_columns: &[String], position: f64) -> String {
    if position.fract() != 0.0 || position < 0.0 {
        return String::new();
    }
    year_columns
        .get(position as usize)
        .cloned()
        .unwrap_or_default()
}

/// Render the yearly line chart for the filtered rows.
pub fn budget_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let tick_years = state.dataset.year_columns.clone();
    let hover_years = state.dataset.year_columns.clone();

    Plot::new("budget_chart")
        .legend(Legend::default().position(Corner::RightTop))
        .height(height)
        .x_axis_label("Year")
        .y_axis_label("Value")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark: GridMark, _range| year_tick(&tick_years, mark.value))
        .label_formatter(move |name, point| {
            let year = year_tick(&hover_years, point.x.round());
            if name.is_empty() {
                format!("{year}\n{:.0}", point.y)
            } else {
                format!("{name}\n{year}: {:.0}", point.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (label, points) in series_points(&state.long_rows, &state.dataset.year_columns) {
                let color = state.color_map.color_for(label);

                let line = Line::new(PlotPoints::from(points.clone()))
                    .name(label)
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);

                // Markers on every observation.
                let markers = Points::new(PlotPoints::from(points))
                    .name(label)
                    .color(color)
                    .radius(3.0);
                plot_ui.points(markers);
            }
        });
}
