use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::charts::DashboardTab;
use crate::data::model::MoodMetric;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: genre multi-select and mood metric.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Genres (multi choice, none selected = all) ----
    let n_selected = state.selection.selected_genres.len();
    let n_total = state.dataset.genres.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Choose your Vibe (Genre)");
        if ui.small_button("Clear").clicked() {
            state.clear_genres();
        }
    });
    if n_selected == 0 {
        ui.label(format!("All {n_total} genres"));
    } else {
        ui.label(format!("{n_selected}/{n_total} selected"));
    }

    let mut toggled: Option<String> = None;
    ScrollArea::vertical()
        .max_height((ui.available_height() - 80.0).max(60.0))
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for genre in &state.dataset.genres {
                let mut checked = state.selection.selected_genres.contains(genre);
                if ui.checkbox(&mut checked, genre).changed() {
                    toggled = Some(genre.clone());
                }
            }
        });

    if let Some(genre) = toggled {
        state.toggle_genre(&genre);
    }
    ui.separator();

    // ---- Mood metric (single choice) ----
    ui.strong("Select Your Mood Metric");
    let mut metric = state.selection.mood_metric;
    egui::ComboBox::from_id_salt("mood_metric")
        .selected_text(metric.column())
        .show_ui(ui, |ui: &mut Ui| {
            for m in MoodMetric::ALL {
                ui.selectable_value(&mut metric, m, m.column());
            }
        });
    state.set_mood_metric(metric);
}

// ---------------------------------------------------------------------------
// Central panel – heading, tabs, active chart
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Music Data Dashboard");
    ui.horizontal(|ui: &mut Ui| {
        for tab in DashboardTab::ALL {
            ui.selectable_value(&mut state.active_tab, tab, tab.title());
        }
    });
    ui.separator();

    crate::ui::plot::chart(ui, state.charts.get(state.active_tab));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} tracks loaded, {} visible",
            state.dataset.len(),
            state.visible_count
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open track data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
