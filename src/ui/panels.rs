use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::color::band_color;
use crate::data::loader::{load_file, LoadedData};
use crate::data::model::CitySource;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – simulation controls
// ---------------------------------------------------------------------------

/// Render the left simulation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Simulation");
    ui.separator();

    let sim = &mut state.simulation;
    ui.add(Slider::new(&mut sim.infrastructure, 0.0..=100.0).text("Infrastructure"));
    ui.add(Slider::new(&mut sim.governance, 0.0..=100.0).text("Governance"));
    ui.add(Slider::new(&mut sim.transparency, 0.0..=100.0).text("Transparency"));
    ui.add(Slider::new(&mut sim.emergency_response, 0.0..=100.0).text("Emergency response"));

    if ui.small_button("Reset").clicked() {
        state.reset_simulation();
    }

    ui.add_space(8.0);
    let score = state.stability();
    let band = state.stability_band();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label("Composite stability");
        ui.label(RichText::new(format!("{score:.1}")).size(32.0).strong().color(band_color(band)));
        ui.label(RichText::new(band.to_string()).color(band_color(band)));
    });

    ui.separator();
    ui.heading("Anomaly detection");
    ui.add(
        Slider::new(&mut state.anomaly_threshold, 0.5..=4.0)
            .step_by(0.1)
            .text("σ threshold"),
    );

    ui.separator();
    ui.checkbox(&mut state.include_methodology, "Include methodology in reports");
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
            if ui.button("Export report…").clicked() {
                export_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let selected = state
            .city
            .map(|c| c.to_string())
            .unwrap_or_else(|| "Select a city".to_string());
        egui::ComboBox::from_id_salt("city")
            .selected_text(selected)
            .show_ui(ui, |ui: &mut Ui| {
                for source in CitySource::ALL {
                    if ui
                        .selectable_label(state.city == Some(source), source.to_string())
                        .clicked()
                    {
                        state.select_city(source);
                    }
                }
            });

        if state.loading {
            ui.spinner();
            ui.label("Fetching…");
        } else if let Some(summary) = &state.summary {
            ui.label(format!(
                "{} records, {} pending",
                summary.total, summary.pending
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open municipal data")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("Feed payload (JSON)", &["json"])
        .add_filter("Spending series (CSV)", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    match load_file(&path) {
        Ok(LoadedData::Records(source, records)) => {
            log::info!(
                "Loaded {} {} records from {}",
                records.len(),
                source.city(),
                path.display()
            );
            state.set_records(source, records);
        }
        Ok(LoadedData::Spending(series)) => {
            log::info!("Loaded {} spending periods from {}", series.len(), path.display());
            state.set_spending(series);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_report_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export report")
        .set_file_name("stability-report.txt")
        .add_filter("Text", &["txt"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = crate::report::write_report(&path, state) {
            log::error!("Failed to export report: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
