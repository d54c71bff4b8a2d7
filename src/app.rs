use std::time::Duration;

use eframe::egui::{self, ScrollArea, Ui};

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CivicPulseApp {
    pub state: AppState,
}

impl CivicPulseApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for CivicPulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_fetch();
        if self.state.loading {
            // Keep polling while the worker thread is busy.
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        // ---- Top panel: menu bar + city picker ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: simulation ----
        egui::SidePanel::left("simulation_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: scores, charts, alerts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let state = &self.state;

                    tables::score_cards(ui, state);
                    ui.separator();

                    ui.columns(2, |cols| {
                        cols[0].strong("Infrastructure spending");
                        plot::spending_plot(&mut cols[0], state);
                        tables::anomaly_list(&mut cols[0], state);

                        cols[1].strong("Stability outlook");
                        plot::forecast_plot(&mut cols[1], state);
                    });
                    ui.separator();

                    if let Some(summary) = &state.summary {
                        ui.columns(2, |cols| {
                            cols[0].strong("Records by category");
                            plot::count_chart(&mut cols[0], "category_chart", &summary.categories);

                            cols[1].strong("Hotspots");
                            plot::count_chart(&mut cols[1], "hotspot_chart", &summary.hotspots);
                        });
                        ui.separator();

                        ui.strong("Risk map");
                        plot::risk_map(ui, &summary.map_risks);
                        ui.separator();
                    }

                    ui.columns(2, |cols| {
                        cols[0].strong("Stability trend");
                        plot::trend_plot(&mut cols[0]);

                        cols[1].strong("Complaint volume trend");
                        plot::complaint_plot(&mut cols[1]);
                    });
                    ui.separator();

                    ui.strong("Procurement anomalies");
                    tables::procurement_table(ui, state);
                    ui.separator();

                    ui.strong("Alerts");
                    tables::alerts_table(ui, state);
                });
        });
    }
}
